//! CSV export of the currently filtered vendor list.
//!
//! The file lands in the working directory as `vendors_data.csv`. Fields
//! containing the delimiter, quotes or newlines are quoted per RFC 4180, so
//! an address like `"1 Main St, Springfield"` cannot shear its row apart.

use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};

use crate::vendor::Vendor;

pub const EXPORT_FILE: &str = "vendors_data.csv";

const HEADER: &str = "ID,Name,Contact,Email,Phone,Category";

fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serializes rows in their current order under the fixed header.
pub fn to_csv(rows: &[&Vendor]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for vendor in rows {
        let fields = [
            vendor.id.to_string(),
            vendor.name.clone(),
            vendor.contact.clone(),
            vendor.email.clone(),
            vendor.phone.clone(),
            vendor.category.to_string(),
        ];
        let line: Vec<String> = fields.iter().map(|f| escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Writes the export file into `dir` and returns its path.
pub fn write_csv(rows: &[&Vendor], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE);
    std::fs::write(&path, to_csv(rows))?;
    Ok(path)
}
