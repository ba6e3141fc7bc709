use std::path::PathBuf;

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::assets::catalog::AssetCatalog;
use crate::assets::decode;
use crate::compose::compositor::{ForegroundLayer, compose, crop_background};
use crate::foundation::core::MASK_PALETTE;
use crate::foundation::error::{MaskforgeError, MaskforgeResult};
use crate::generate::config::GenerateConfig;
use crate::registry::mask_registry::{ColorCategory, MaskRegistry};
use crate::transform::augment::AugmentParams;

/// Subdirectory of the output root holding composite images.
pub const IMAGES_DIR: &str = "images";
/// Subdirectory of the output root holding mask rasters.
pub const MASKS_DIR: &str = "masks";
/// File name of the exported mask index.
pub const MASK_DEFINITIONS_FILE: &str = "mask_definitions.json";

/// Threading controls for a generation run.
#[derive(Clone, Debug, Default)]
pub struct GenerateOpts {
    /// Generate samples on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Aggregated counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Samples generated and registered.
    pub samples: u64,
    /// Master seed the run was keyed on.
    pub seed: u64,
}

struct SampleRecord {
    image_relpath: String,
    mask_relpath: String,
    colors: Vec<ColorCategory>,
}

/// Orchestrates sample generation over a read-only asset catalog.
pub struct Generator {
    catalog: AssetCatalog,
    config: GenerateConfig,
    output_dir: PathBuf,
}

impl Generator {
    /// Validate `config` and prepare the output directory layout.
    pub fn new(
        catalog: AssetCatalog,
        config: GenerateConfig,
        output_dir: impl Into<PathBuf>,
    ) -> MaskforgeResult<Self> {
        config.validate()?;
        if catalog.foreground_count() == 0 {
            return Err(MaskforgeError::asset("catalog has no foregrounds"));
        }
        if catalog.backgrounds().is_empty() {
            return Err(MaskforgeError::asset("catalog has no backgrounds"));
        }

        let output_dir = output_dir.into();
        for sub in [IMAGES_DIR, MASKS_DIR] {
            let dir = output_dir.join(sub);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))?;
        }

        Ok(Self {
            catalog,
            config,
            output_dir,
        })
    }

    /// Generate all samples sequentially, registering each into `registry`.
    pub fn run(&self, registry: &mut MaskRegistry) -> MaskforgeResult<RunStats> {
        self.run_with_opts(registry, &GenerateOpts::default())
    }

    /// Generate all samples with explicit threading controls.
    ///
    /// Filename indices and per-sample RNG seeds are fixed up front, so a
    /// parallel run with the same master seed produces the same dataset as a
    /// sequential one. Registration always happens in index order, after the
    /// sample's files are on disk. Any sample failure aborts the run; files
    /// already written stay in place and the index is simply never exported.
    pub fn run_with_opts(
        &self,
        registry: &mut MaskRegistry,
        opts: &GenerateOpts,
    ) -> MaskforgeResult<RunStats> {
        let master_seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let mut master = StdRng::seed_from_u64(master_seed);
        let seeds: Vec<u64> = (0..self.config.count).map(|_| master.r#gen()).collect();

        tracing::info!(
            count = self.config.count,
            seed = master_seed,
            parallel = opts.parallel,
            "generating samples"
        );

        let records = if opts.parallel {
            let pool = build_thread_pool(opts.threads)?;
            let results: Vec<MaskforgeResult<SampleRecord>> = pool.install(|| {
                seeds
                    .par_iter()
                    .enumerate()
                    .map(|(index, &seed)| {
                        self.generate_sample(index as u64, StdRng::seed_from_u64(seed))
                    })
                    .collect()
            });
            results
                .into_iter()
                .collect::<MaskforgeResult<Vec<SampleRecord>>>()?
        } else {
            let mut out = Vec::with_capacity(seeds.len());
            for (index, &seed) in seeds.iter().enumerate() {
                out.push(self.generate_sample(index as u64, StdRng::seed_from_u64(seed))?);
            }
            out
        };

        for record in records {
            let registered = registry.add_mask(
                record.image_relpath.clone(),
                record.mask_relpath,
                record.colors,
            );
            if !registered {
                tracing::warn!(image = %record.image_relpath, "sample was already registered");
            }
        }

        tracing::info!(count = self.config.count, "generation finished");
        Ok(RunStats {
            samples: self.config.count,
            seed: master_seed,
        })
    }

    /// Produce and persist one sample, returning what to register for it.
    #[tracing::instrument(level = "debug", skip(self, rng))]
    fn generate_sample(&self, index: u64, mut rng: StdRng) -> MaskforgeResult<SampleRecord> {
        let size = self.config.output_size()?;

        let background_path = self.catalog.pick_background(&mut rng)?;
        let background = decode::load_background(background_path)?;
        let crop = crop_background(&background, size, &mut rng)?;

        let slot_count = rng.gen_range(1..=self.config.max_foregrounds);
        let mut layers = Vec::with_capacity(slot_count);
        let mut colors = Vec::with_capacity(slot_count);
        for slot in 0..slot_count {
            let asset = self.catalog.pick_foreground(&mut rng)?;
            let cutout = decode::load_foreground(&asset.path)?;
            let params = AugmentParams::sample(&mut rng);
            let color = MASK_PALETTE[slot];
            tracing::debug!(
                slot,
                category = %asset.category,
                angle_deg = params.angle_deg,
                scale = params.scale,
                "placing foreground"
            );

            layers.push(ForegroundLayer {
                image: params.apply(&cutout),
                color,
            });
            colors.push(ColorCategory {
                color,
                category: asset.category.clone(),
                super_category: asset.super_category.clone(),
            });
        }

        let sample = compose(&crop, &layers, &mut rng)?;

        let stem = filename_stem(index, self.config.zero_padding);
        let image_relpath = format!(
            "{IMAGES_DIR}/{stem}.{}",
            self.config.output_format.extension()
        );
        let mask_relpath = format!("{MASKS_DIR}/{stem}.png");

        sample
            .image
            .save(self.output_dir.join(&image_relpath))
            .with_context(|| format!("write composite '{image_relpath}'"))?;
        sample
            .mask
            .save(self.output_dir.join(&mask_relpath))
            .with_context(|| format!("write mask '{mask_relpath}'"))?;

        Ok(SampleRecord {
            image_relpath,
            mask_relpath,
            colors,
        })
    }
}

/// Zero-padded sequential file stem, e.g. `00000023` for index 23 at width 8.
pub(crate) fn filename_stem(index: u64, zero_padding: usize) -> String {
    format!("{index:0zero_padding$}")
}

fn build_thread_pool(threads: Option<usize>) -> MaskforgeResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(MaskforgeError::validation(
            "generate threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon thread pool")?)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/driver.rs"]
mod tests;
