/// Discovery and selection of input assets.
pub mod catalog;
/// Raster loading and cutout validation.
pub mod decode;
