//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print one row of a listing: identifier, then name (or a dimmed dash).
pub fn row(id: &str, name: Option<&str>, detail: &str) {
    let name = match name {
        Some(name) => name.normal(),
        None => "-".dimmed(),
    };
    if detail.is_empty() {
        println!("{}  {}", id.bold(), name);
    } else {
        println!("{}  {}  {}", id.bold(), name, detail.dimmed());
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
