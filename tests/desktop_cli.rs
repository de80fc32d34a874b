mod common;

use assert_cmd::{cargo_bin_cmd, Command};
use predicates::str::{contains, is_match};
use std::time::Duration;

fn desktop(db: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("study-desktop");
    cmd.env_remove("STUDY_USER")
        .env_remove("STUDY_PASSWORD")
        .env("UPLOAD_DIR", common::temp_dir("cli_uploads"))
        .args(["--db", db]);
    cmd
}

fn as_ana(db: &str) -> Command {
    let mut cmd = desktop(db);
    cmd.args(["--user", "ana", "--password", "segredo"]);
    cmd
}

#[test]
fn schedule_round_trip_through_the_terminal() {
    let db = common::temp_db("cli_schedule");

    desktop(&db)
        .args(["user", "add", "ana", "--name", "Ana", "--new-password", "segredo"])
        .assert()
        .success()
        .stdout(contains("criado"));

    as_ana(&db)
        .args(["schedule", "set", "segunda", "900", "Algebra", "--color", "#ff0000"])
        .assert()
        .success();

    as_ana(&db)
        .args(["schedule", "merge", "segunda", "9", "--rows", "2", "--cols", "2", "--name", "Algebra"])
        .assert()
        .success();

    as_ana(&db)
        .args(["schedule", "show"])
        .assert()
        .success()
        .stdout(contains("Algebra"))
        .stdout(contains("~"));

    as_ana(&db)
        .args(["schedule", "unmerge", "terca", "10:00"])
        .assert()
        .success()
        .stdout(contains("Fusão desfeita"));

    as_ana(&db)
        .args(["schedule", "unmerge", "segunda", "9"])
        .assert()
        .failure()
        .stderr(contains("não está fundida"));
}

#[test]
fn commands_need_valid_credentials() {
    let db = common::temp_db("cli_auth");
    desktop(&db)
        .args(["user", "add", "ana", "--new-password", "segredo"])
        .assert()
        .success();

    desktop(&db).args(["task", "list"]).assert().failure().stderr(contains("--user"));

    desktop(&db)
        .args(["--user", "ana", "--password", "errada", "task", "list"])
        .assert()
        .failure()
        .stderr(contains("Credenciais inválidas"));

    desktop(&db)
        .args(["user", "add", "ana", "--new-password", "outra"])
        .assert()
        .failure()
        .stderr(contains("já existe"));
}

#[test]
fn tasks_and_points_from_the_terminal() {
    let db = common::temp_db("cli_tasks");
    desktop(&db)
        .args(["user", "add", "ana", "--new-password", "segredo"])
        .assert()
        .success();

    as_ana(&db)
        .args(["task", "add", "Ler capítulo 2", "--day", "sexta"])
        .assert()
        .success()
        .stdout(contains("Tarefa 1 adicionada"));
    as_ana(&db)
        .args(["task", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("concluída"));
    as_ana(&db)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("[x]"))
        .stdout(contains("Sexta"));

    as_ana(&db).args(["points", "add", "12"]).assert().success();
    as_ana(&db).args(["points", "add", "abc"]).assert().failure();
    as_ana(&db)
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("Total de pontos: 12"));
    as_ana(&db).args(["points", "reset"]).assert().success();
    as_ana(&db)
        .args(["points", "show"])
        .assert()
        .success()
        .stdout(contains("Total: 0"))
        .stdout(contains("reset"));
}

#[test]
fn status_watch_keeps_polling() {
    let db = common::temp_db("cli_watch");
    desktop(&db)
        .args(["user", "add", "ana", "--new-password", "segredo"])
        .assert()
        .success();
    as_ana(&db).args(["points", "add", "5"]).assert().success();

    // O ciclo só pára quando o processo é morto
    as_ana(&db)
        .args(["status", "--watch", "--interval", "1"])
        .timeout(Duration::from_secs(15))
        .assert()
        .interrupted()
        .stdout(is_match(r"(?s)Total de pontos: 5.*Total de pontos: 5").unwrap());
}
