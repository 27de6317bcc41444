use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::models::{Kind, Transaction, TransactionInput};
use crate::store::{RecordStore, TransactionFilter};

pub fn add(store: &RecordStore, input: TransactionInput) -> Result<()> {
    let name = input.name.clone();
    let id = store.add(input)?;
    println!("Added transaction {id}: {name}");
    Ok(())
}

pub fn list(store: &RecordStore, filter: &TransactionFilter) -> Result<()> {
    let records = store.get(filter)?;
    println!("{}", format_list(&records));
    Ok(())
}

pub fn update(store: &RecordStore, id: u64, input: TransactionInput) -> Result<()> {
    store.update(id, input)?;
    println!("Updated transaction {id}");
    Ok(())
}

pub fn delete(store: &RecordStore, id: u64) -> Result<()> {
    if store.delete(id)? {
        println!("Deleted transaction {id}");
    } else {
        println!("No transaction with ID {id}");
    }
    Ok(())
}

pub fn format_list(records: &[Transaction]) -> String {
    if records.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Name", "Category", "Kind", "Amount", "Essential"]);
    for t in records {
        let amt = match t.kind {
            Kind::Income => money(t.amount).green().to_string(),
            Kind::Expense => money(t.amount).red().to_string(),
            Kind::Other(_) => money(t.amount),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.date),
            Cell::new(&t.name),
            Cell::new(&t.category),
            Cell::new(&t.kind),
            Cell::new(amt),
            Cell::new(if t.essential { "yes" } else { "no" }),
        ]);
    }
    format!("Transactions ({})\n{table}", records.len())
}
