// src/grid/time.rs
//! Normalização das horas do horário.
//!
//! O mesmo slot pode chegar escrito de várias formas ("7", "07", "7:00",
//! "0700", "700"). Na base de dados guardamos sempre "HH:00"; na grelha
//! mostramos "H:00", igual às etiquetas de `hour_labels()`.

/// Primeira hora da grelha (coluna 0).
pub const FIRST_HOUR: u32 = 7;
/// Última hora da grelha (inclusive).
pub const LAST_HOUR: u32 = 23;
/// Número de colunas da grelha (7:00 .. 23:00).
pub const HOUR_COUNT: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;
/// Hora usada quando o valor recebido é inválido.
pub const FALLBACK_HOUR: u32 = FIRST_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// "07:00" (coluna `schedule.start_time`)
    Storage,
    /// "7:00" (etiquetas da grelha)
    Display,
}

/// Normaliza um token de hora. Nunca falha: valores fora de [7, 23] ou
/// ilegíveis caem para "07:00" / "7:00" com um aviso no log.
pub fn normalize_time(token: &str, format: TimeFormat) -> String {
    match extract_hour(token) {
        Some(hour) if is_grid_hour(hour) => format_hour(hour, format),
        Some(hour) => {
            tracing::warn!(
                "Hora '{}' fora do intervalo permitido ({}-{}), a usar {}:00",
                hour,
                FIRST_HOUR,
                LAST_HOUR,
                FALLBACK_HOUR
            );
            format_hour(FALLBACK_HOUR, format)
        }
        None => {
            tracing::warn!("Formato de hora inválido '{}', a usar {}:00", token, FALLBACK_HOUR);
            format_hour(FALLBACK_HOUR, format)
        }
    }
}

/// Atalho para o formato de armazenamento.
pub fn to_storage(token: &str) -> String {
    normalize_time(token, TimeFormat::Storage)
}

/// Atalho para o formato de exibição.
pub fn to_display(token: &str) -> String {
    normalize_time(token, TimeFormat::Display)
}

/// Como `normalize_time`, mas sem fallback: devolve `None` se o token não
/// corresponder a uma coluna da grelha.
pub fn parse_hour(token: &str) -> Option<u32> {
    extract_hour(token).filter(|h| is_grid_hour(*h))
}

/// Índice da coluna para um token de hora (sem fallback).
pub fn column_of(token: &str) -> Option<usize> {
    parse_hour(token).map(|h| (h - FIRST_HOUR) as usize)
}

/// Hora correspondente a uma coluna da grelha.
pub fn hour_of_column(column: usize) -> Option<u32> {
    if column < HOUR_COUNT {
        Some(FIRST_HOUR + column as u32)
    } else {
        None
    }
}

/// Valor canónico ("HH:00") da coluna indicada.
pub fn storage_time_of_column(column: usize) -> Option<String> {
    hour_of_column(column).map(|h| format_hour(h, TimeFormat::Storage))
}

/// Etiquetas fixas da grelha: "7:00" .. "23:00".
pub fn hour_labels() -> Vec<String> {
    (FIRST_HOUR..=LAST_HOUR)
        .map(|h| format_hour(h, TimeFormat::Display))
        .collect()
}

fn is_grid_hour(hour: u32) -> bool {
    (FIRST_HOUR..=LAST_HOUR).contains(&hour)
}

fn format_hour(hour: u32, format: TimeFormat) -> String {
    match format {
        TimeFormat::Storage => format!("{:02}:00", hour),
        TimeFormat::Display => format!("{}:00", hour),
    }
}

// Regra de extração: sem espaços e sem ':'; até 2 caracteres é a hora toda;
// 3 caracteres -> primeiro dígito ("730"); 4 caracteres -> segundo dígito se
// começar por '0' ("0700"), senão os dois primeiros ("1430").
fn extract_hour(token: &str) -> Option<u32> {
    let cleaned: String = token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = match cleaned.len() {
        1 | 2 => cleaned.as_str(),
        3 => &cleaned[..1],
        4 if cleaned.starts_with('0') => &cleaned[1..2],
        _ => &cleaned[..2],
    };

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_value_is_a_fixed_point() {
        assert_eq!(to_storage("14:00"), "14:00");
        assert_eq!(to_storage(&to_storage("9")), "09:00");
        assert_eq!(to_display("7:00"), "7:00");
    }

    #[test]
    fn every_spelling_of_an_hour_agrees() {
        for h in FIRST_HOUR..LAST_HOUR {
            let expected = format!("{:02}:00", h);
            assert_eq!(to_storage(&h.to_string()), expected, "h = {h}");
            assert_eq!(to_storage(&format!("{h:02}")), expected, "0h = {h:02}");
            assert_eq!(to_storage(&format!("{h}:00")), expected, "h:00 = {h}:00");
            assert_eq!(to_storage(&format!("{h}00")), expected, "h00 = {h}00");
        }
    }

    #[test]
    fn display_format_drops_the_leading_zero() {
        assert_eq!(to_display("07:00"), "7:00");
        assert_eq!(to_display("0900"), "9:00");
        assert_eq!(to_display("15"), "15:00");
    }

    #[test]
    fn out_of_range_falls_back() {
        assert_eq!(to_storage("6"), "07:00");
        assert_eq!(to_storage("0:00"), "07:00");
        assert_eq!(to_storage("24:00"), "07:00");
        assert_eq!(to_display("99"), "7:00");
    }

    #[test]
    fn garbage_falls_back() {
        assert_eq!(to_storage(""), "07:00");
        assert_eq!(to_storage("abc"), "07:00");
        assert_eq!(to_storage("sete"), "07:00");
        assert_eq!(to_display("  "), "7:00");
    }

    #[test]
    fn spaces_and_minutes_are_ignored() {
        assert_eq!(to_storage(" 8 : 00 "), "08:00");
        assert_eq!(to_storage("8:30"), "08:00");
        assert_eq!(to_storage("14:45"), "14:00");
    }

    #[test]
    fn last_column_is_a_valid_start() {
        // 23:00 é a última etiqueta da grelha, logo também é hora de início
        assert_eq!(to_storage("23"), "23:00");
        assert_eq!(to_display("2300"), "23:00");
        assert_eq!(parse_hour("23:00"), Some(LAST_HOUR));
        assert_eq!(parse_hour("24"), None);
    }

    #[test]
    fn columns_follow_the_labels() {
        let labels = hour_labels();
        assert_eq!(labels.len(), HOUR_COUNT);
        assert_eq!(labels.first().map(String::as_str), Some("7:00"));
        assert_eq!(labels.last().map(String::as_str), Some("23:00"));
        assert_eq!(column_of("07:00"), Some(0));
        assert_eq!(column_of("23:00"), Some(HOUR_COUNT - 1));
        assert_eq!(column_of("05:00"), None);
        assert_eq!(storage_time_of_column(2).as_deref(), Some("09:00"));
        assert_eq!(storage_time_of_column(HOUR_COUNT), None);
    }
}
