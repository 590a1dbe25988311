//! Commands that modify the file

use anyhow::{bail, Result};

use super::output::Output;
use crate::storage::IniStore;

pub fn set(
    store: &mut IniStore,
    output: &Output,
    section: &str,
    key: &str,
    value: String,
) -> Result<()> {
    store.set_value(section, key, value)?;
    output.success(&format!("Set [{}] {}", section.trim(), key.trim()));
    Ok(())
}

pub fn delete_key(store: &mut IniStore, output: &Output, section: &str, key: &str) -> Result<()> {
    if !store.delete_key(section, key)? {
        bail!("Key not found: [{}] {}", section, key);
    }

    output.success(&format!("Deleted [{}] {}", section, key));
    Ok(())
}

pub fn delete_section(store: &mut IniStore, output: &Output, section: &str) -> Result<()> {
    let removed = store.delete_section(section)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "removed": removed,
        }));
    } else {
        output.success(&format!("Deleted {} entries from [{}]", removed, section));
    }

    Ok(())
}
