// src/grid/day.rs
use super::GridError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Dia da semana de uma linha da grelha. A semana começa ao sábado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Day {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Número de linhas da grelha.
pub const DAY_COUNT: usize = 7;

impl Day {
    pub const ALL: [Day; DAY_COUNT] = [
        Day::Saturday,
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Linha da grelha (sábado = 0).
    pub fn index(self) -> usize {
        match self {
            Day::Saturday => 0,
            Day::Sunday => 1,
            Day::Monday => 2,
            Day::Tuesday => 3,
            Day::Wednesday => 4,
            Day::Thursday => 5,
            Day::Friday => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }

    /// Valor guardado na base de dados.
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
        }
    }

    /// Nome mostrado ao utilizador.
    pub fn label(self) -> &'static str {
        match self {
            Day::Saturday => "Sábado",
            Day::Sunday => "Domingo",
            Day::Monday => "Segunda",
            Day::Tuesday => "Terça",
            Day::Wednesday => "Quarta",
            Day::Thursday => "Quinta",
            Day::Friday => "Sexta",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Day {
        match weekday {
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = GridError;

    /// Aceita o valor guardado, a abreviatura inglesa, o nome em português
    /// (com ou sem acento) ou o número da linha.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let day = match key.as_str() {
            "saturday" | "sat" | "sábado" | "sabado" => Day::Saturday,
            "sunday" | "sun" | "domingo" => Day::Sunday,
            "monday" | "mon" | "segunda" | "segunda-feira" => Day::Monday,
            "tuesday" | "tue" | "terça" | "terca" | "terça-feira" | "terca-feira" => Day::Tuesday,
            "wednesday" | "wed" | "quarta" | "quarta-feira" => Day::Wednesday,
            "thursday" | "thu" | "quinta" | "quinta-feira" => Day::Thursday,
            "friday" | "fri" | "sexta" | "sexta-feira" => Day::Friday,
            other => {
                return other
                    .parse::<usize>()
                    .ok()
                    .and_then(Day::from_index)
                    .ok_or_else(|| GridError::InvalidDay(s.to_string()));
            }
        };
        Ok(day)
    }
}
