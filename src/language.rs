//! Display languages supported by the formatters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GamalyticError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_RU: [&str; 12] = [
    "янв.", "фев.", "мар.", "апр.", "май", "июн.", "июл.", "авг.", "сен.", "окт.", "ноя.", "дек.",
];

/// Unit of a relative timestamp such as "3h ago".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            Language::En => ',',
            Language::Ru => '\u{a0}',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Language::En => '.',
            Language::Ru => ',',
        }
    }

    /// Abbreviated month name, `month0` counting from zero.
    pub fn month(self, month0: usize) -> &'static str {
        let months = match self {
            Language::En => &MONTHS_EN,
            Language::Ru => &MONTHS_RU,
        };
        months[month0 % 12]
    }

    pub fn date(self, day: u32, month0: usize, year: i32) -> String {
        let month = self.month(month0);
        match self {
            Language::En => format!("{} {}, {}", month, day, year),
            Language::Ru => format!("{} {} {} г.", day, month, year),
        }
    }

    pub fn time_ago(self, n: i64, unit: TimeUnit) -> String {
        match (self, unit) {
            (Language::En, TimeUnit::Days) => format!("{}d ago", n),
            (Language::En, TimeUnit::Hours) => format!("{}h ago", n),
            (Language::En, TimeUnit::Minutes) => format!("{}m ago", n),
            (Language::Ru, TimeUnit::Days) => format!("{}д назад", n),
            (Language::Ru, TimeUnit::Hours) => format!("{}ч назад", n),
            (Language::Ru, TimeUnit::Minutes) => format!("{}м назад", n),
        }
    }

    pub fn just_now(self) -> &'static str {
        match self {
            Language::En => "Just now",
            Language::Ru => "Только что",
        }
    }
}

impl FromStr for Language {
    type Err = GamalyticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(GamalyticError::InvalidArgument(format!(
                "unsupported language: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
