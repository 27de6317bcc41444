use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{expand_home, load_settings, save_settings, settings_path};
use crate::store::RecordStore;

/// Remember the transactions file in settings and create it when missing.
/// `data_file` wins over the file the current store was opened on.
pub fn run(current: &RecordStore, data_file: Option<String>) -> Result<()> {
    let store = match data_file {
        Some(p) => RecordStore::new(PathBuf::from(expand_home(&p))),
        None => current.clone(),
    };
    let resolved = store.path();

    if store.init()? {
        println!("Created {}", resolved.display());
    } else {
        println!("Using existing {}", resolved.display());
    }

    let mut settings = load_settings();
    settings.data_file = resolved.to_string_lossy().to_string();
    save_settings(&settings)?;
    println!("Settings saved to {}", settings_path().display());
    Ok(())
}
