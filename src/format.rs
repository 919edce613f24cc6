//! pt-BR presentation helpers: currency, month labels, amount parsing and
//! avatar initials.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown wherever a value is absent
pub const PLACEHOLDER: &str = "-";

const MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Format an amount as Brazilian reais: `R$ 1.234,56`, `-R$ 10,00`
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}R$ {},{}", sign, grouped, cents)
}

/// Table cell form of an amount: absent and zero both show the placeholder
pub fn format_amount_cell(value: Option<Decimal>) -> String {
    match value {
        Some(amount) if !amount.is_zero() => format_brl(amount),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Short month and year, e.g. `mar. de 2025`
pub fn format_month(date: NaiveDate) -> String {
    format!("{} de {}", MONTHS[date.month0() as usize], date.year())
}

/// Parse an amount typed by the user.
///
/// Accepts plain (`1234.56`) and pt-BR (`1.234,56`, `1234,56`) notation and
/// an optional `R$` prefix. A comma is always the decimal separator. Dots
/// are thousands separators when a comma is present, when more than one dot
/// appears, or when a single dot splits one to three leading digits from a
/// group of exactly three (`1.234` is one thousand two hundred thirty-four,
/// `1234.567` and `0.123` stay decimals).
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.matches('.').count() > 1 || groups_thousands(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };
    Decimal::from_str(&normalized).ok()
}

/// A lone dot written as a thousands group, as in `1.500`
fn groups_thousands(amount: &str) -> bool {
    let Some((int, group)) = amount.trim_start_matches('-').split_once('.') else {
        return false;
    };
    (1..=3).contains(&int.len())
        && !int.starts_with('0')
        && group.len() == 3
        && int.chars().chain(group.chars()).all(|c| c.is_ascii_digit())
}

/// Two-letter avatar fallback, uppercased
pub fn initials(name: &str) -> String {
    name.trim()
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
