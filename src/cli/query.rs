//! Read-only commands

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::Value;
use crate::storage::IniStore;

pub fn sections(store: &IniStore, output: &Output) -> Result<()> {
    let sections = store.sections()?;

    if output.is_json() {
        output.data(&sections);
    } else {
        for section in &sections {
            println!("{}", section);
        }
    }

    Ok(())
}

pub fn keys(store: &IniStore, output: &Output, section: &str) -> Result<()> {
    let keys = store.keys(section)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "keys": keys,
        }));
    } else {
        for key in &keys {
            println!("{}", key);
        }
    }

    Ok(())
}

pub fn get(
    store: &mut IniStore,
    output: &Output,
    section: &str,
    key: &str,
    as_number: bool,
) -> Result<()> {
    let value = if as_number {
        // The lookup refreshes the cache, so the checks below see the same entries
        let number = store.get_number(section, key)?;
        if !store.key_exists(section, key)? {
            bail!("Key not found: [{}] {}", section, key);
        }
        if !store.is_number(section, key)? {
            bail!("Value of [{}] {} is not a number", section, key);
        }
        Value::Number(number)
    } else {
        match store.get_string(section, key)? {
            Some(text) => Value::Text(text),
            None => bail!("Key not found: [{}] {}", section, key),
        }
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "key": key,
            "value": value,
        }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Prints whether `section` (or `section`/`key`) exists and returns the answer
pub fn exists(store: &IniStore, output: &Output, section: &str, key: Option<&str>) -> Result<bool> {
    let present = match key {
        Some(key) => store.key_exists(section, key)?,
        None => store.section_exists(section)?,
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "key": key,
            "exists": present,
        }));
    } else {
        println!("{}", present);
    }

    Ok(present)
}

pub fn show(store: &IniStore, output: &Output) -> Result<()> {
    let entries = store.entries()?;

    if output.is_json() {
        output.data(&entries);
    } else if entries.is_empty() {
        println!("No entries");
    } else {
        for entry in entries {
            let value = entry.value().to_string();
            output.row(&[entry.section(), entry.key(), &value]);
        }
    }

    Ok(())
}
