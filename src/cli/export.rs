use std::path::{Path, PathBuf};

use crate::cli::report::category_data;
use crate::error::Result;
use crate::reports;
use crate::store::{RecordStore, TransactionFilter};

/// `<data file dir>/exports/<name>-YYYY-MM-DD.csv`
fn default_path(store: &RecordStore, name: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let base = store
        .path()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    base.join("exports").join(format!("{name}-{date}.csv"))
}

pub fn monthly(store: &RecordStore, filter: &TransactionFilter, output: Option<PathBuf>) -> Result<PathBuf> {
    let records = store.get(filter)?;
    let summary = reports::monthly_summary(&records);
    let path = output.unwrap_or_else(|| default_path(store, "monthly-summary"));
    reports::export_summary(&summary, &path)?;
    println!("Wrote {}", path.display());
    Ok(path)
}

pub fn categories(
    store: &RecordStore,
    filter: &TransactionFilter,
    kind: Option<&str>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let records = store.get(filter)?;
    let (_, summary) = category_data(&records, kind);
    let path = output.unwrap_or_else(|| default_path(store, "category-summary"));
    reports::export_summary(&summary, &path)?;
    println!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionInput;

    fn seeded_store(dir: &Path) -> RecordStore {
        let store = RecordStore::new(dir.join("transactions.csv"));
        for (name, category, date, kind, amount) in [
            ("Groceries", "Food", "2025-01-01", "expense", "100"),
            ("Salary", "Salary", "2025-01-02", "income", "200"),
        ] {
            store
                .add(TransactionInput {
                    name: name.into(),
                    category: category.into(),
                    date: date.into(),
                    kind: kind.into(),
                    amount: amount.into(),
                    essential: String::new(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_default_path_sits_next_to_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("transactions.csv"));
        let path = default_path(&store, "monthly-summary");
        assert!(path.starts_with(dir.path().join("exports")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("monthly-summary-") && name.ends_with(".csv"), "got: {name}");
    }

    #[test]
    fn test_export_categories_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let out = dir.path().join("cats.csv");
        let written = categories(&store, &TransactionFilter::default(), Some("expense"), Some(out.clone())).unwrap();
        assert_eq!(written, out);
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["Key,Value", "Food,100"]);
    }

    #[test]
    fn test_export_monthly_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let written = monthly(&store, &TransactionFilter::default(), None).unwrap();
        assert!(written.exists());
        let content = std::fs::read_to_string(&written).unwrap();
        assert!(content.contains("2025-01,income=200.00;expense=100.00"), "got: {content}");
    }
}
