use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::path::Path;

use crate::error::Result;
use crate::models::{Kind, Transaction};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

pub fn total_income(records: &[Transaction]) -> f64 {
    records.iter().filter(|t| t.is_income()).fold(0.0, |acc, t| acc + t.amount)
}

pub fn total_expenses(records: &[Transaction]) -> f64 {
    records.iter().filter(|t| t.is_expense()).fold(0.0, |acc, t| acc + t.amount)
}

pub fn balance(records: &[Transaction]) -> f64 {
    total_income(records) - total_expenses(records)
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

impl std::fmt::Display for MonthTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "income={:.2};expense={:.2}", self.income, self.expense)
    }
}

/// Income and expense sums keyed by `YYYY-MM`. Records of an unrecognized
/// kind never create a month on their own.
pub fn monthly_summary(records: &[Transaction]) -> BTreeMap<String, MonthTotals> {
    let mut summary: BTreeMap<String, MonthTotals> = BTreeMap::new();
    for t in records {
        match t.kind {
            Kind::Income => summary.entry(t.month().to_string()).or_default().income += t.amount,
            Kind::Expense => summary.entry(t.month().to_string()).or_default().expense += t.amount,
            Kind::Other(_) => {}
        }
    }
    summary
}

// ---------------------------------------------------------------------------
// Category summaries
// ---------------------------------------------------------------------------

/// Amount per category regardless of kind: an income category and an expense
/// category with the same name share one total.
pub fn category_summary(records: &[Transaction]) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();
    for t in records {
        *summary.entry(t.category.clone()).or_insert(0.0) += t.amount;
    }
    summary
}

/// Amount per category, counting only records of `kind`.
pub fn category_summary_by_kind(records: &[Transaction], kind: &Kind) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();
    for t in records.iter().filter(|t| &t.kind == kind) {
        *summary.entry(t.category.clone()).or_insert(0.0) += t.amount;
    }
    summary
}

/// Pie chart data: total expense per category.
pub fn expense_by_category(records: &[Transaction]) -> BTreeMap<String, f64> {
    category_summary_by_kind(records, &Kind::Expense)
}

// ---------------------------------------------------------------------------
// Top expenses
// ---------------------------------------------------------------------------

/// The `n` largest expenses, largest first. Equal amounts keep their input order.
pub fn top_expenses(records: &[Transaction], n: usize) -> Vec<Transaction> {
    if n == 0 {
        return Vec::new();
    }
    let mut expenses: Vec<Transaction> = records.iter().filter(|t| t.is_expense()).cloned().collect();
    // sort_by is stable
    expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    expenses.truncate(n);
    expenses
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BalancePoint {
    pub date: String,
    pub balance: f64,
}

/// Running balance after each record, in date order. Income adds, expense
/// subtracts, other kinds leave the balance unchanged.
pub fn cumulative_balance(records: &[Transaction]) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = records.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut running = 0.0f64;
    ordered
        .into_iter()
        .map(|t| {
            match t.kind {
                Kind::Income => running += t.amount,
                Kind::Expense => running -= t.amount,
                Kind::Other(_) => {}
            }
            BalancePoint {
                date: t.date.clone(),
                balance: running,
            }
        })
        .collect()
}

/// Month x category expense totals for a stacked bar chart.
/// `values[i][j]` is the expense for `months[i]` in `categories[j]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseMatrix {
    pub months: Vec<String>,
    pub categories: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

pub fn monthly_expense_matrix(records: &[Transaction]) -> ExpenseMatrix {
    let expenses: Vec<&Transaction> = records.iter().filter(|t| t.is_expense()).collect();
    let months: Vec<String> = expenses
        .iter()
        .map(|t| t.month().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let categories: Vec<String> = expenses
        .iter()
        .map(|t| t.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut values = vec![vec![0.0f64; categories.len()]; months.len()];
    for t in expenses {
        // both lookups are over sorted, deduplicated keys built from these records
        if let (Ok(i), Ok(j)) = (
            months.binary_search_by(|m| m.as_str().cmp(t.month())),
            categories.binary_search(&t.category),
        ) {
            values[i][j] += t.amount;
        }
    }

    ExpenseMatrix {
        months,
        categories,
        values,
    }
}

// ---------------------------------------------------------------------------
// Combined summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub monthly: BTreeMap<String, MonthTotals>,
    pub top_expenses: Vec<Transaction>,
}

pub fn summarize(records: &[Transaction], top_n: usize) -> Summary {
    let total_income = total_income(records);
    let total_expenses = total_expenses(records);
    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        monthly: monthly_summary(records),
        top_expenses: top_expenses(records, top_n),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write a `Key,Value` CSV with one row per entry, in iteration order.
pub fn export_summary<I, K, V>(entries: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Key", "Value"])?;
    for (key, value) in entries {
        writer.write_record([key.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
