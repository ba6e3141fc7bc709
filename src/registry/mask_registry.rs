use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::MaskColor;
use crate::foundation::error::MaskforgeResult;

/// Structured association between one mask color and its labels.
///
/// Colors are stringified only at serialization time; core logic never keys on
/// strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCategory {
    /// Flat palette color as painted in the mask raster.
    pub color: MaskColor,
    /// Category name.
    pub category: String,
    /// Super-category name.
    pub super_category: String,
}

#[derive(Clone, Debug)]
struct MaskEntry {
    mask_relpath: String,
    colors: Vec<ColorCategory>,
}

/// Accumulates per-sample mask entries and the global category taxonomy.
///
/// Owned by the caller and threaded through the generation pipeline
/// explicitly, so headless tests can inspect it without any file IO. Exported
/// once, at end of run.
#[derive(Clone, Debug, Default)]
pub struct MaskRegistry {
    masks: BTreeMap<String, MaskEntry>,
    super_categories: BTreeMap<String, BTreeSet<String>>,
}

impl MaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered samples.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// `true` when no sample has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Add a category to its super-category's set.
    ///
    /// Returns `false` (no-op) when the pair is already present. The same
    /// category name may live under several super-categories; membership is
    /// tracked per set, not globally.
    pub fn add_category(&mut self, category: &str, super_category: &str) -> bool {
        self.super_categories
            .entry(super_category.to_string())
            .or_default()
            .insert(category.to_string())
    }

    /// Register one generated sample keyed by its composite image relpath.
    ///
    /// Returns `false` (no-op) when the relpath was already registered.
    /// Otherwise inserts the entry and folds every color's labels into the
    /// taxonomy.
    pub fn add_mask(
        &mut self,
        image_relpath: impl Into<String>,
        mask_relpath: impl Into<String>,
        colors: Vec<ColorCategory>,
    ) -> bool {
        let image_relpath = image_relpath.into();
        if self.masks.contains_key(&image_relpath) {
            return false;
        }

        for cc in &colors {
            self.add_category(&cc.category, &cc.super_category);
        }
        self.masks.insert(
            image_relpath,
            MaskEntry {
                mask_relpath: mask_relpath.into(),
                colors,
            },
        );
        true
    }

    /// Produce the serializable snapshot of everything accumulated so far.
    pub fn export(&self) -> RegistrySnapshot {
        let masks = self
            .masks
            .iter()
            .map(|(image, entry)| {
                let color_categories = entry
                    .colors
                    .iter()
                    .map(|cc| {
                        (
                            cc.color.json_key(),
                            ColorLabels {
                                category: cc.category.clone(),
                                super_category: cc.super_category.clone(),
                            },
                        )
                    })
                    .collect();
                (
                    image.clone(),
                    MaskEntrySnapshot {
                        mask: entry.mask_relpath.clone(),
                        color_categories,
                    },
                )
            })
            .collect();

        let super_categories = self
            .super_categories
            .iter()
            .map(|(sc, categories)| (sc.clone(), categories.iter().cloned().collect()))
            .collect();

        RegistrySnapshot {
            masks,
            super_categories,
        }
    }

    /// Serialize the exported snapshot to `path` as JSON.
    pub fn write_json(&self, path: &Path) -> MaskforgeResult<()> {
        let json =
            serde_json::to_string_pretty(&self.export()).context("serialize mask definitions")?;
        std::fs::write(path, json)
            .with_context(|| format!("write mask definitions '{}'", path.display()))?;
        Ok(())
    }
}

/// Serialized form of the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Per-sample entries keyed by composite image relpath.
    pub masks: BTreeMap<String, MaskEntrySnapshot>,
    /// Super-category to deduplicated category list.
    pub super_categories: BTreeMap<String, Vec<String>>,
}

/// One sample's mask file and color associations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskEntrySnapshot {
    /// Mask raster relpath.
    pub mask: String,
    /// Color key (`"(r, g, b)"`) to labels, for this sample only.
    pub color_categories: BTreeMap<String, ColorLabels>,
}

/// Category labels attached to one mask color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLabels {
    /// Category name.
    pub category: String,
    /// Super-category name.
    pub super_category: String,
}

#[cfg(test)]
#[path = "../../tests/unit/registry/mask_registry.rs"]
mod tests;
