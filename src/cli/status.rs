use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::settings_path;
use crate::store::RecordStore;

pub fn run(store: &RecordStore) -> Result<()> {
    let path = store.path();
    println!("Settings:     {}", settings_path().display());
    println!("Data file:    {}", path.display());

    if !store.exists() {
        println!();
        println!("Transactions file not found. Run `tally init` or `tally add` to create it.");
        return Ok(());
    }

    let size = std::fs::metadata(path)?.len();
    println!("File size:    {}", format_bytes(size));

    let outcome = store.load_with_outcome()?;
    let income = outcome.records.iter().filter(|t| t.is_income()).count();
    let expenses = outcome.records.iter().filter(|t| t.is_expense()).count();

    println!();
    println!("Transactions: {}", outcome.records.len());
    println!("  Income:     {income}");
    println!("  Expenses:   {expenses}");
    if outcome.skipped > 0 {
        println!("Skipped rows: {} (malformed, ignored on load)", outcome.skipped);
    }
    Ok(())
}
