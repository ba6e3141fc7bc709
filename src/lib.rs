//! Maskforge synthesizes labeled segmentation datasets.
//!
//! It composites cut-out foreground objects onto random crops of background
//! photos, producing per-sample composite/mask image pairs and a JSON index
//! that maps mask colors to semantic categories:
//!
//! - Discover assets with [`AssetCatalog::scan`] (or build one in memory)
//! - Configure a run with [`GenerateConfig`]
//! - Drive it with [`Generator`], collecting results in a [`MaskRegistry`]
//! - Export the registry snapshot once, at end of run
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Input asset discovery, validation, and selection.
pub mod assets;
/// The compositing core: placement, blending, and mask painting.
pub mod compose;
/// Run configuration and sample generation.
pub mod generate;
/// Mask metadata accumulation and export.
pub mod registry;
/// Cutout jitter (rotation, scale, brightness).
pub mod transform;

pub use crate::foundation::core::{MASK_PALETTE, MIN_OUTPUT_DIM, MaskColor, OutputSize};
pub use crate::foundation::error::{MaskforgeError, MaskforgeResult};

pub use crate::assets::catalog::{AssetCatalog, ForegroundAsset, ForegroundMap};
pub use crate::compose::compositor::{
    ALPHA_THRESHOLD, ComposedSample, ForegroundLayer, compose, crop_background,
};
pub use crate::generate::config::{GenerateConfig, OutputFormat};
pub use crate::generate::driver::{
    GenerateOpts, Generator, IMAGES_DIR, MASK_DEFINITIONS_FILE, MASKS_DIR, RunStats,
};
pub use crate::generate::info::{DatasetInfo, DatasetLicense, write_dataset_info};
pub use crate::registry::mask_registry::{
    ColorCategory, ColorLabels, MaskEntrySnapshot, MaskRegistry, RegistrySnapshot,
};
pub use crate::transform::augment::AugmentParams;
