use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// Column names of the backing file, in write order.
pub const FIELDNAMES: [&str; 7] = [
    "id",
    "transaction_name",
    "transaction_category",
    "date",
    "income_expense",
    "amount",
    "essential",
];

/// Income/expense discriminator. Unrecognized values are kept verbatim so they
/// survive a load/save cycle, but no aggregate counts them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Income,
    Expense,
    Other(String),
}

impl Kind {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("income") {
            Kind::Income
        } else if trimmed.eq_ignore_ascii_case("expense") {
            Kind::Expense
        } else {
            Kind::Other(raw.to_string())
        }
    }

    /// Strict form used on the write path: only income or expense.
    pub fn parse_known(raw: &str) -> Option<Self> {
        match Kind::parse(raw) {
            Kind::Other(_) => None,
            known => Some(known),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
            Kind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub name: String,
    pub category: String,
    /// ISO `YYYY-MM-DD`; string order is chronological order.
    pub date: String,
    pub kind: Kind,
    pub amount: f64,
    pub essential: bool,
}

impl Transaction {
    /// `YYYY-MM` bucket used by the monthly reports.
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }
}

/// Raw field strings as a caller collects them from user input. Coercion and
/// validation happen in [`TransactionInput::into_transaction`].
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub name: String,
    pub category: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub essential: String,
}

impl TransactionInput {
    pub fn into_transaction(self, id: u64) -> Result<Transaction> {
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| TallyError::InvalidAmount(self.amount.clone()))?;
        let date = parse_date(&self.date).ok_or_else(|| TallyError::InvalidDate(self.date.clone()))?;
        let kind = Kind::parse_known(&self.kind).ok_or_else(|| TallyError::InvalidKind(self.kind.clone()))?;
        let essential = parse_essential(&self.essential)
            .ok_or_else(|| TallyError::InvalidEssential(self.essential.clone()))?;
        Ok(Transaction {
            id,
            name: self.name,
            category: self.category,
            date,
            kind,
            amount,
            essential,
        })
    }
}

/// One line of the backing file, every column still a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TransactionRow {
    pub id: String,
    #[serde(rename = "transaction_name")]
    pub name: String,
    #[serde(rename = "transaction_category")]
    pub category: String,
    pub date: String,
    #[serde(rename = "income_expense")]
    pub kind: String,
    pub amount: String,
    #[serde(default)]
    pub essential: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = String;

    fn try_from(row: TransactionRow) -> std::result::Result<Self, Self::Error> {
        let id = row
            .id
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("bad id {:?}", row.id))?;
        let amount = parse_stored_amount(&row.amount).ok_or_else(|| format!("bad amount {:?}", row.amount))?;
        let essential =
            parse_essential(&row.essential).ok_or_else(|| format!("bad essential flag {:?}", row.essential))?;
        Ok(Transaction {
            id,
            name: row.name,
            category: row.category,
            date: row.date,
            kind: Kind::parse(&row.kind),
            amount,
            essential,
        })
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.to_string(),
            name: t.name.clone(),
            category: t.category.clone(),
            date: t.date.clone(),
            kind: t.kind.as_str().to_string(),
            amount: format_amount(t.amount),
            essential: if t.essential { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Parse a user-entered amount: `$` prefix and thousands separators are
/// tolerated. Negative, NaN and infinite values are rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_prefix('$').unwrap_or(s).replace(',', "");
    let value = s.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        // -0.0 passes the comparison; store it as plain zero
        Some(value.abs())
    } else {
        None
    }
}

/// Parse an amount as written in the backing file: a plain number only, no
/// currency formatting. Same range rules as [`parse_amount`].
pub fn parse_stored_amount(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.abs())
    } else {
        None
    }
}

/// Canonical on-file form of an amount. Whole numbers keep one decimal place
/// (`100.0`); everything else uses the shortest round-trip representation.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}

pub fn parse_essential(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "no" | "n" | "false" | "0" => Some(false),
        "yes" | "y" | "true" | "1" => Some(true),
        _ => None,
    }
}

/// Validate a `YYYY-MM-DD` date and return it in canonical form.
pub fn parse_date(raw: &str) -> Option<String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}
