use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;

use maskforge::{
    AssetCatalog, DatasetInfo, DatasetLicense, GenerateConfig, GenerateOpts, Generator,
    IMAGES_DIR, MASK_DEFINITIONS_FILE, MaskRegistry, OutputFormat, write_dataset_info,
};

#[derive(Parser, Debug)]
#[command(
    name = "maskforge",
    version,
    about = "Composite cutouts onto background crops and emit color-coded segmentation masks"
)]
struct Cli {
    /// Input directory containing `foregrounds/<super>/<category>/*.png`
    /// (cutouts on transparent backgrounds) and `backgrounds/` (pngs or jpgs).
    #[arg(long)]
    input_dir: PathBuf,

    /// Output directory for `images/`, `masks/`, and the JSON index.
    #[arg(long)]
    output_dir: PathBuf,

    /// Number of composed images to create.
    #[arg(long)]
    count: u64,

    /// Output width in pixels.
    #[arg(long)]
    width: u32,

    /// Output height in pixels.
    #[arg(long)]
    height: u32,

    /// Composite format: png, jpg, or jpeg. Masks are always png.
    #[arg(long, default_value = "jpg")]
    output_type: OutputFormat,

    /// Maximum foregrounds per sample.
    #[arg(long, default_value_t = 3)]
    max_foregrounds: usize,

    /// RNG seed for reproducible datasets.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip interactive prompts; existing output is overwritten.
    #[arg(long, default_value_t = false)]
    silent: bool,

    /// Generate samples in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Enable per-sample debug logging.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if !cli.silent {
        confirm_overwrite(&cli.output_dir)?;
    }

    let catalog = AssetCatalog::scan(&cli.input_dir)?;
    let config = GenerateConfig {
        output_format: cli.output_type,
        max_foregrounds: cli.max_foregrounds,
        seed: cli.seed,
        ..GenerateConfig::new(cli.width, cli.height, cli.count)
    };

    let generator = Generator::new(catalog, config, &cli.output_dir)?;
    let mut registry = MaskRegistry::new();
    let opts = GenerateOpts {
        parallel: cli.parallel,
        threads: cli.threads,
    };
    let stats = generator.run_with_opts(&mut registry, &opts)?;
    registry.write_json(&cli.output_dir.join(MASK_DEFINITIONS_FILE))?;

    eprintln!(
        "wrote {} samples and {} under {}",
        stats.samples,
        MASK_DEFINITIONS_FILE,
        cli.output_dir.display()
    );

    if !cli.silent {
        create_info_interactive(&cli.output_dir)?;
    }
    Ok(())
}

/// Ask before clobbering a non-empty images directory.
fn confirm_overwrite(output_dir: &Path) -> anyhow::Result<()> {
    let has_images = match std::fs::read_dir(output_dir.join(IMAGES_DIR)) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    };
    if !has_images {
        return Ok(());
    }

    if !ask_yes("output_dir is not empty, existing files will be overwritten.\nContinue (y/n)? ")? {
        std::process::exit(0);
    }
    Ok(())
}

fn create_info_interactive(output_dir: &Path) -> anyhow::Result<()> {
    if !ask_yes("Create dataset_info.json (y/n)? ")? {
        eprintln!("Skipped. You can always write dataset_info.json by hand.");
        return Ok(());
    }

    let info = DatasetInfo::stamped(
        ask("Description: ")?,
        ask("URL: ")?,
        ask("Version: ")?,
        ask("Contributor: ")?,
    );
    let license = if ask_yes("Add a license (y/n)? ")? {
        DatasetLicense {
            id: 0,
            name: ask("License name: ")?,
            url: ask("License URL: ")?,
        }
    } else {
        DatasetLicense::default()
    };

    let path = output_dir.join("dataset_info.json");
    write_dataset_info(&path, &info, &license)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn ask(msg: &str) -> anyhow::Result<String> {
    eprint!("{msg}");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read stdin")?;
    Ok(line.trim().to_string())
}

fn ask_yes(msg: &str) -> anyhow::Result<bool> {
    let answer = ask(msg)?.to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
