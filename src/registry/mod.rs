/// Accumulation and export of mask metadata and the category taxonomy.
pub mod mask_registry;
