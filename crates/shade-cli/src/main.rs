use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shade_core::{default_catalog, AnalyzeResult, SamplingRegion, ShadeAnalyzer, ShadeCatalog};
use shade_image::{Photo, UploadPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "shade", about = "Foundation shade finder CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more face photos and recommend shades
    Analyze {
        /// JPEG or PNG photos
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print one JSON result per photo instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print the persistable shade profile for a photo
    Profile {
        file: PathBuf,
    },
    /// Inspect the shade catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// List every catalog entry
    List,
    /// Verify that every depth/undertone combination has shades
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Analyze { files, json } => run_analyze(&config, files, json).await,
        Commands::Profile { file } => run_profile(&config, &file),
        Commands::Catalog { action } => {
            let catalog = load_catalog(&config)?;
            match action {
                CatalogCommand::List => {
                    print_catalog(&catalog);
                    Ok(())
                }
                CatalogCommand::Check => check_catalog(&catalog),
            }
        }
    }
}

fn load_catalog(config: &Config) -> Result<Arc<ShadeCatalog>> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = ShadeCatalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display()))?;
            let missing = catalog.missing_keys();
            if !missing.is_empty() {
                tracing::warn!(?missing, "catalog does not cover every profile");
            }
            Ok(Arc::new(catalog))
        }
        None => Ok(default_catalog()),
    }
}

fn build_analyzer(config: &Config) -> Result<ShadeAnalyzer> {
    let region = SamplingRegion::with_stride(config.sample_stride);
    Ok(ShadeAnalyzer::new(region, load_catalog(config)?))
}

fn analyze_file(analyzer: &ShadeAnalyzer, policy: &UploadPolicy, path: &Path) -> Result<AnalyzeResult> {
    let photo = Photo::open(path, policy).with_context(|| format!("failed to load {}", path.display()))?;
    analyzer
        .analyze(&photo)
        .with_context(|| format!("failed to process {}", path.display()))
}

async fn run_analyze(config: &Config, files: Vec<PathBuf>, json: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let policy = UploadPolicy::with_max_bytes(config.max_upload_bytes);

    // One blocking task per photo; results are reported in argument order.
    let tasks: Vec<_> = files
        .iter()
        .cloned()
        .map(|path| {
            let analyzer = analyzer.clone();
            tokio::task::spawn_blocking(move || analyze_file(&analyzer, &policy, &path))
        })
        .collect();

    let mut failed = 0usize;
    for (path, task) in files.iter().zip(tasks) {
        let outcome = task.await.context("analysis task panicked")?;
        match outcome {
            Ok(result) if json => println!("{}", serde_json::to_string(&result)?),
            Ok(result) => print_result(path, &result),
            Err(e) => {
                failed += 1;
                tracing::error!(file = %path.display(), error = %format!("{e:#}"), "analysis failed");
                eprintln!("{}: {e:#}", path.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} photos could not be processed", files.len());
    }
    Ok(())
}

fn run_profile(config: &Config, file: &Path) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let policy = UploadPolicy::with_max_bytes(config.max_upload_bytes);
    let result = analyze_file(&analyzer, &policy, file)?;
    match result.profile() {
        Some(profile) => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        None => bail!("{}: {}", file.display(), result.reason().unwrap_or("image unusable")),
    }
}

fn print_result(path: &Path, result: &AnalyzeResult) {
    println!("{}", path.display());
    match result {
        AnalyzeResult::Usable { rgb, shade } => {
            println!("  undertone: {}", shade.undertone);
            println!("  depth:     {}", shade.depth);
            println!("  avg color: {rgb}");
            match shade.advice() {
                Some(advice) => println!("  {advice}"),
                None => {
                    println!("  shades:");
                    for (i, name) in shade.shades.iter().enumerate() {
                        println!("    {}. {name}", i + 1);
                    }
                }
            }
        }
        AnalyzeResult::Unusable { rgb, reason } => {
            println!("  unusable ({rgb}): {reason}");
            println!("  Try a new photo facing natural daylight without harsh shadows.");
        }
    }
}

fn print_catalog(catalog: &ShadeCatalog) {
    for (key, shades) in catalog.iter() {
        println!("{key}: {}", shades.join(", "));
    }
}

fn check_catalog(catalog: &ShadeCatalog) -> Result<()> {
    for key in catalog.unknown_keys() {
        println!("unused key: {key}");
    }
    let missing = catalog.missing_keys();
    if missing.is_empty() {
        println!("catalog OK: {} entries cover every depth/undertone profile", catalog.len());
        return Ok(());
    }
    for key in &missing {
        println!("missing: {key}");
    }
    bail!("catalog is missing {} of 15 profiles", missing.len());
}
