use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::Rng;

use crate::foundation::error::{MaskforgeError, MaskforgeResult};

/// File extensions accepted for background photos.
pub const BACKGROUND_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A single foreground cutout discovered under the input tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForegroundAsset {
    /// Source image path (RGBA PNG).
    pub path: PathBuf,
    /// Category name, e.g. `horse`.
    pub category: String,
    /// Super-category name, e.g. `animal`.
    pub super_category: String,
}

/// Nested foreground map: super-category to category to assets.
pub type ForegroundMap = BTreeMap<String, BTreeMap<String, Vec<ForegroundAsset>>>;

/// Read-only catalog of discovered input assets.
///
/// Built once at startup and immutable for the run. Ordered maps and sorted
/// asset lists keep two-stage random selection reproducible under a seeded RNG.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    foregrounds: ForegroundMap,
    backgrounds: Vec<PathBuf>,
}

impl AssetCatalog {
    /// Build a catalog from an already-assembled foreground map and background list.
    pub fn from_parts(foregrounds: ForegroundMap, backgrounds: Vec<PathBuf>) -> Self {
        Self {
            foregrounds,
            backgrounds,
        }
    }

    /// Scan `input_dir` for `foregrounds/<super>/<category>/*.png` and
    /// `backgrounds/*.{png,jpg,jpeg}`.
    ///
    /// Unexpected entries (stray files where directories are expected, non-PNG
    /// foregrounds, directories among backgrounds) are logged and skipped; an
    /// empty result on either side is an asset error.
    pub fn scan(input_dir: &Path) -> MaskforgeResult<Self> {
        if !input_dir.is_dir() {
            return Err(MaskforgeError::asset(format!(
                "input directory does not exist: '{}'",
                input_dir.display()
            )));
        }
        let foregrounds_dir = input_dir.join("foregrounds");
        if !foregrounds_dir.is_dir() {
            return Err(MaskforgeError::asset(format!(
                "'foregrounds' not found in input directory '{}'",
                input_dir.display()
            )));
        }
        let backgrounds_dir = input_dir.join("backgrounds");
        if !backgrounds_dir.is_dir() {
            return Err(MaskforgeError::asset(format!(
                "'backgrounds' not found in input directory '{}'",
                input_dir.display()
            )));
        }

        Ok(Self {
            foregrounds: scan_foregrounds(&foregrounds_dir)?,
            backgrounds: scan_backgrounds(&backgrounds_dir)?,
        })
    }

    /// The nested foreground map.
    pub fn foregrounds(&self) -> &ForegroundMap {
        &self.foregrounds
    }

    /// The discovered background paths.
    pub fn backgrounds(&self) -> &[PathBuf] {
        &self.backgrounds
    }

    /// Total number of foreground assets across all categories.
    pub fn foreground_count(&self) -> usize {
        self.foregrounds
            .values()
            .flat_map(|categories| categories.values())
            .map(Vec::len)
            .sum()
    }

    /// Pick a background uniformly at random.
    pub fn pick_background<R: Rng + ?Sized>(&self, rng: &mut R) -> MaskforgeResult<&Path> {
        if self.backgrounds.is_empty() {
            return Err(MaskforgeError::asset("catalog has no backgrounds"));
        }
        Ok(&self.backgrounds[rng.gen_range(0..self.backgrounds.len())])
    }

    /// Pick a foreground by explicit two-stage uniform selection: first a
    /// super-category key, then a category key within it, then an asset.
    pub fn pick_foreground<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> MaskforgeResult<&ForegroundAsset> {
        let supers: Vec<&String> = self.foregrounds.keys().collect();
        if supers.is_empty() {
            return Err(MaskforgeError::asset("catalog has no foregrounds"));
        }
        let super_category = supers[rng.gen_range(0..supers.len())];

        let categories = &self.foregrounds[super_category];
        let cats: Vec<&String> = categories.keys().collect();
        if cats.is_empty() {
            return Err(MaskforgeError::asset(format!(
                "super-category '{super_category}' has no categories"
            )));
        }
        let category = cats[rng.gen_range(0..cats.len())];

        let assets = &categories[category];
        if assets.is_empty() {
            return Err(MaskforgeError::asset(format!(
                "category '{category}' has no assets"
            )));
        }
        Ok(&assets[rng.gen_range(0..assets.len())])
    }
}

fn scan_foregrounds(dir: &Path) -> MaskforgeResult<ForegroundMap> {
    let mut map = ForegroundMap::new();

    for super_dir in read_dir_sorted(dir)? {
        if !super_dir.is_dir() {
            tracing::warn!(
                path = %super_dir.display(),
                "expected super-category directory in foregrounds, skipping file"
            );
            continue;
        }
        let super_category = utf8_name(&super_dir)?;

        for category_dir in read_dir_sorted(&super_dir)? {
            if !category_dir.is_dir() {
                tracing::warn!(
                    path = %category_dir.display(),
                    "expected category directory in super-category, skipping file"
                );
                continue;
            }
            let category = utf8_name(&category_dir)?;

            for file in read_dir_sorted(&category_dir)? {
                if !file.is_file() {
                    tracing::warn!(
                        path = %file.display(),
                        "directory inside category, skipping"
                    );
                    continue;
                }
                if !has_extension(&file, &["png"]) {
                    tracing::warn!(path = %file.display(), "foreground must be .png, skipping");
                    continue;
                }
                map.entry(super_category.clone())
                    .or_default()
                    .entry(category.clone())
                    .or_default()
                    .push(ForegroundAsset {
                        path: file,
                        category: category.clone(),
                        super_category: super_category.clone(),
                    });
            }
        }
    }

    if map.is_empty() {
        return Err(MaskforgeError::asset(format!(
            "no valid foregrounds found under '{}'",
            dir.display()
        )));
    }
    Ok(map)
}

fn scan_backgrounds(dir: &Path) -> MaskforgeResult<Vec<PathBuf>> {
    let mut backgrounds = Vec::new();

    for file in read_dir_sorted(dir)? {
        if !file.is_file() {
            tracing::warn!(path = %file.display(), "directory among backgrounds, skipping");
            continue;
        }
        if !has_extension(&file, &BACKGROUND_EXTENSIONS) {
            tracing::warn!(
                path = %file.display(),
                allowed = ?BACKGROUND_EXTENSIONS,
                "background has unsupported extension, skipping"
            );
            continue;
        }
        backgrounds.push(file);
    }

    if backgrounds.is_empty() {
        return Err(MaskforgeError::asset(format!(
            "no valid backgrounds found under '{}'",
            dir.display()
        )));
    }
    Ok(backgrounds)
}

fn read_dir_sorted(dir: &Path) -> MaskforgeResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read directory '{}'", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("read directory entry in '{}'", dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

fn utf8_name(path: &Path) -> MaskforgeResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            MaskforgeError::asset(format!(
                "directory name is not valid UTF-8: '{}'",
                path.display()
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
