use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::Amount;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("XOF")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("fr-FR")
    }
}

impl LocaleConfig {
    /// French-speaking tags group digits with spaces; anything else uses
    /// the English convention.
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("fr") {
            Self {
                language_tag: tag.to_string(),
                decimal_separator: ',',
                grouping_separator: ' ',
                date_format: DateFormatStyle::Medium,
            }
        } else {
            Self {
                language_tag: tag.to_string(),
                decimal_separator: '.',
                grouping_separator: ',',
                date_format: DateFormatStyle::Medium,
            }
        }
    }

    fn is_french(&self) -> bool {
        self.language_tag.to_ascii_lowercase().starts_with("fr")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    None,
    Symbol,
    Code,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
    Long,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "XOF" | "XAF" => "FCFA".into(),
        "EUR" => "€".into(),
        "USD" => "$".into(),
        "GNF" => "FG".into(),
        "KMF" => "FC".into(),
        _ => code.into(),
    }
}

/// Groups the digits of `value` with the locale separator, sign kept in front.
pub fn format_number(locale: &LocaleConfig, value: Amount) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_digits(&digits, locale.grouping_separator);
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders a whole-unit amount, e.g. `1 250 000 FCFA` for XOF in `fr-FR`.
pub fn format_amount(
    amount: Amount,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let body = group_digits(&amount.unsigned_abs().to_string(), locale.grouping_separator);
    let body = if amount < 0 {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        }
    } else {
        body
    };
    let unit = match options.currency_display {
        CurrencyDisplay::None => return body,
        CurrencyDisplay::Symbol => symbol_for(code.as_str()),
        CurrencyDisplay::Code => code.as_str().to_string(),
    };
    if locale.is_french() || unit.chars().count() > 1 {
        format!("{} {}", body, unit)
    } else if let Some(rest) = body.strip_prefix('-') {
        format!("-{}{}", unit, rest)
    } else {
        format!("{}{}", unit, body)
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short if locale.is_french() => date.format("%d/%m/%Y").to_string(),
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium | DateFormatStyle::Long => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month(), locale.is_french()),
            date.year()
        ),
    }
}

fn month_label(month: u32, french: bool) -> &'static str {
    const FR: [&str; 12] = [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ];
    const EN: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let labels = if french { &FR } else { &EN };
    labels
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}
