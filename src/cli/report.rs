use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::models::{Kind, Transaction};
use crate::reports::{self, BalancePoint, ExpenseMatrix, MonthTotals, Summary};
use crate::store::{RecordStore, TransactionFilter};

fn signed(val: f64) -> String {
    if val >= 0.0 {
        money(val).green().to_string()
    } else {
        money(val).red().to_string()
    }
}

// ---------------------------------------------------------------------------
// `tally reports`: fixed plain-text rundown
// ---------------------------------------------------------------------------

pub fn run_reports(store: &RecordStore, filter: &TransactionFilter, top_n: usize) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_reports(&reports::summarize(&records, top_n)));
    Ok(())
}

pub fn format_reports(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total Income: {}\n", money(summary.total_income)));
    out.push_str(&format!("Total Expenses: {}\n", money(summary.total_expenses)));
    out.push_str(&format!("Net Balance: {}\n", money(summary.balance)));

    out.push_str("\nMonthly Summary:\n");
    for (month, totals) in &summary.monthly {
        out.push_str(&format!(
            "{month}: Income = {}, Expenses = {}\n",
            money(totals.income),
            money(totals.expense)
        ));
    }

    out.push_str("\nTop Expenses:\n");
    for t in &summary.top_expenses {
        out.push_str(&format!("{} - {} - {}\n", t.date, t.name, money(t.amount)));
    }
    out.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// `tally report ...`: tables
// ---------------------------------------------------------------------------

pub fn summary(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_summary(&records));
    Ok(())
}

pub fn monthly(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_monthly(&reports::monthly_summary(&records)));
    Ok(())
}

pub fn categories(store: &RecordStore, filter: &TransactionFilter, kind: Option<&str>) -> Result<()> {
    let records = store.get(filter)?;
    let (title, data) = category_data(&records, kind);
    println!("{}", format_categories(&title, &data));
    Ok(())
}

pub fn expenses(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_categories("Expense Breakdown", &reports::expense_by_category(&records)));
    Ok(())
}

pub fn top(store: &RecordStore, filter: &TransactionFilter, n: usize) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_top(&reports::top_expenses(&records, n)));
    Ok(())
}

pub fn balance(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_balance(&reports::cumulative_balance(&records)));
    Ok(())
}

pub fn matrix(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_matrix(&reports::monthly_expense_matrix(&records)));
    Ok(())
}

/// Category totals for `kind`, or for every kind combined when none is given.
pub(crate) fn category_data(records: &[Transaction], kind: Option<&str>) -> (String, BTreeMap<String, f64>) {
    match kind.map(Kind::parse) {
        Some(k) => (
            format!("Categories ({k})"),
            reports::category_summary_by_kind(records, &k),
        ),
        None => ("Categories".to_string(), reports::category_summary(records)),
    }
}

pub fn format_summary(records: &[Transaction]) -> String {
    let income = reports::total_income(records);
    let expenses = reports::total_expenses(records);
    let net = reports::balance(records);

    let mut table = Table::new();
    table.set_header(vec!["Item", "Amount"]);
    table.add_row(vec![Cell::new("Total Income"), Cell::new(money(income))]);
    table.add_row(vec![Cell::new("Total Expenses"), Cell::new(money(expenses))]);
    table.add_row(vec![Cell::new("Balance".bold()), Cell::new(signed(net))]);
    format!("Summary ({} transactions)\n{table}", records.len())
}

pub fn format_monthly(data: &BTreeMap<String, MonthTotals>) -> String {
    if data.is_empty() {
        return "No monthly activity.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Net"]);
    for (month, totals) in data {
        table.add_row(vec![
            Cell::new(month),
            Cell::new(money(totals.income)),
            Cell::new(money(totals.expense)),
            Cell::new(signed(totals.net())),
        ]);
    }
    format!("Monthly Summary\n{table}")
}

pub fn format_categories(title: &str, data: &BTreeMap<String, f64>) -> String {
    if data.is_empty() {
        return "No categories found.".to_string();
    }

    let total: f64 = data.values().sum();
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%"]);
    for (name, amount) in data {
        let pct = if total != 0.0 { amount / total * 100.0 } else { 0.0 };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(money(*amount)),
            Cell::new(format!("{pct:.1}%")),
        ]);
    }
    table.add_row(vec![Cell::new("Total".bold()), Cell::new(money(total)), Cell::new("")]);
    format!("{title}\n{table}")
}

pub fn format_top(rows: &[Transaction]) -> String {
    if rows.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Name", "Category", "Amount"]);
    for (rank, t) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&t.date),
            Cell::new(&t.name),
            Cell::new(&t.category),
            Cell::new(money(t.amount)),
        ]);
    }
    format!("Top Expenses\n{table}")
}

pub fn format_balance(points: &[BalancePoint]) -> String {
    if points.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Balance"]);
    for p in points {
        table.add_row(vec![Cell::new(&p.date), Cell::new(signed(p.balance))]);
    }
    format!("Running Balance\n{table}")
}

pub fn format_matrix(data: &ExpenseMatrix) -> String {
    if data.months.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut header = vec!["Month".to_string()];
    header.extend(data.categories.iter().cloned());
    header.push("Total".to_string());

    let mut table = Table::new();
    table.set_header(header);
    for (month, row) in data.months.iter().zip(&data.values) {
        let mut cells = vec![Cell::new(month)];
        cells.extend(row.iter().map(|v| Cell::new(money(*v))));
        cells.push(Cell::new(money(row.iter().sum())));
        table.add_row(cells);
    }
    format!("Expenses by Month and Category\n{table}")
}
