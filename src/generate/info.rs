use std::path::Path;

use anyhow::Context as _;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::foundation::error::MaskforgeResult;

/// Free-text description block for a generated dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Human-readable description.
    pub description: String,
    /// Project or source URL.
    pub url: String,
    /// Dataset version string.
    pub version: String,
    /// Contributor name.
    pub contributor: String,
    /// Year of creation.
    pub year: i32,
    /// Creation date, `MM/DD/YYYY`.
    pub date_created: String,
}

impl DatasetInfo {
    /// Build an info block stamped with the current local date.
    pub fn stamped(
        description: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
        contributor: impl Into<String>,
    ) -> Self {
        let now = chrono::Local::now();
        Self {
            description: description.into(),
            url: url.into(),
            version: version.into(),
            contributor: contributor.into(),
            year: now.year(),
            date_created: now.format("%m/%d/%Y").to_string(),
        }
    }
}

/// License attached to the generated imagery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLicense {
    /// Numeric license id.
    pub id: u32,
    /// License name; `None` when unlicensed.
    pub name: String,
    /// License URL; empty when unlicensed.
    pub url: String,
}

impl Default for DatasetLicense {
    fn default() -> Self {
        Self {
            id: 0,
            name: "None".to_string(),
            url: String::new(),
        }
    }
}

#[derive(Serialize)]
struct DatasetInfoDoc<'a> {
    info: &'a DatasetInfo,
    license: &'a DatasetLicense,
}

/// Write `dataset_info.json` content to `path`.
///
/// Pure serialization; any interactive prompting that fills the record lives
/// with the caller.
pub fn write_dataset_info(
    path: &Path,
    info: &DatasetInfo,
    license: &DatasetLicense,
) -> MaskforgeResult<()> {
    let doc = DatasetInfoDoc { info, license };
    let json = serde_json::to_string_pretty(&doc).context("serialize dataset info")?;
    std::fs::write(path, json)
        .with_context(|| format!("write dataset info '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/info.rs"]
mod tests;
