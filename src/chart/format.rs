//! Display formatting for chart values

use serde::{Deserialize, Serialize};

/// Non-breaking space, used by pt-PT for grouping and before the symbol.
const NBSP: char = '\u{a0}';

/// How monetary values are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Integer digits required before grouping kicks in.
    pub min_grouping_digits: usize,
    pub symbol_after: bool,
}

impl CurrencyFormat {
    /// Euro as written in Portugal, e.g. `12 345,50 €`.
    pub fn pt_pt_eur() -> Self {
        Self {
            symbol: "€".to_string(),
            decimal_separator: ',',
            group_separator: NBSP,
            min_grouping_digits: 5,
            symbol_after: true,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::pt_pt_eur()
    }
}

/// Integer and two-digit fraction of `|value|`, rounding ties away from zero.
fn two_decimals(value: f64) -> (String, String) {
    let cents = (value.abs() * 100.0).round();
    let int_part = (cents / 100.0).trunc();
    let frac_part = cents - int_part * 100.0;
    (format!("{:.0}", int_part), format!("{:02.0}", frac_part))
}

pub fn format_currency(value: f64, format: &CurrencyFormat) -> String {
    let (int_part, frac_part) = two_decimals(value);
    let int_part = int_part.as_str();

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    if int_part.len() >= format.min_grouping_digits {
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(format.group_separator);
            }
            grouped.push(digit);
        }
    } else {
        grouped.push_str(int_part);
    }

    // Negatives keep their sign even when they round to zero
    let sign = if value < 0.0 { "-" } else { "" };
    let number = format!("{}{}{}{}", sign, grouped, format.decimal_separator, frac_part);

    if format.symbol_after {
        format!("{}{}{}", number, NBSP, format.symbol)
    } else {
        format!("{}{}", format.symbol, number)
    }
}

pub fn format_percentage(value: f64) -> String {
    let (int_part, frac_part) = two_decimals(value);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}%", sign, int_part, frac_part)
}

/// Named formatter referenced from a chart configuration.
///
/// Configurations are plain JSON, so axis and tooltip formatters are stored as
/// marker strings (`"formatter": "currency"`) and resolved by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ValueFormatter {
    Currency,
    Percentage,
    Plain,
}

impl ValueFormatter {
    /// Reads the marker at `config[path...]["formatter"]`, falling back to plain.
    pub fn from_config(config: &serde_json::Value, path: &[&str]) -> Self {
        let node = path.iter().fold(config, |node, key| &node[*key]);
        node["formatter"]
            .as_str()
            .and_then(|name| name.parse().ok())
            .unwrap_or(ValueFormatter::Plain)
    }

    pub fn apply(&self, value: f64, currency: &CurrencyFormat) -> String {
        match self {
            ValueFormatter::Currency => format_currency(value, currency),
            ValueFormatter::Percentage => format_percentage(value),
            ValueFormatter::Plain => value.to_string(),
        }
    }
}
