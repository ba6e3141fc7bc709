/// Validated run parameters.
pub mod config;
/// Sample generation orchestration.
pub mod driver;
/// Free-text dataset info document.
pub mod info;
