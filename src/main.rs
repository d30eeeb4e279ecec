use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tracer::analysis::UploadedFile;
use tracer::config::Config;
use tracer::extract::DefaultExtractor;

/// Tracer: find near-duplicate and plagiarized documents in a batch.
///
/// Every document is turned into a TF-IDF vector over unigrams and bigrams,
/// and every pair is scored by cosine similarity.
#[derive(Parser)]
#[command(name = "tracer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP upload API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Compare local files and print the similar pairs
    Compare {
        /// Files to compare (.pdf, .docx, .doc, .txt)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Minimum similarity percentage to report (overrides TRACER_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write a markdown report to this path
        #[arg(long)]
        report: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tracer=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            serve(config).await?;
        }

        Commands::Compare {
            paths,
            threshold,
            json,
            report,
        } => {
            let mut config = Config::load()?;
            if let Some(threshold) = threshold {
                config.threshold_pct = threshold;
                config.validate()?;
            }

            let files = read_files(&paths, !json)?;
            let analyzer = config.analyzer();
            let outcome = analyzer.analyze(&DefaultExtractor, &files)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                tracer::output::terminal::display_report(&outcome, config.threshold_pct);
            }

            if let Some(path) = report {
                let written = tracer::output::markdown::generate_report(
                    &outcome,
                    config.threshold_pct,
                    &path,
                )?;
                if !json {
                    println!(
                        "\n{}",
                        format!("Markdown report saved to: {written}").bold()
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "web")]
async fn serve(config: Config) -> Result<()> {
    info!(
        threshold = config.threshold_pct,
        max_files = config.max_files,
        "Starting Tracer API"
    );
    tracer::web::run_server(config).await
}

#[cfg(not(feature = "web"))]
async fn serve(_config: Config) -> Result<()> {
    anyhow::bail!(
        "The HTTP server is not compiled in.\n\
         Rebuild with: cargo build --features web"
    );
}

/// Read every path into memory, using the file name as the upload name.
fn read_files(paths: &[PathBuf], show_progress: bool) -> Result<Vec<UploadedFile>> {
    let pb = if show_progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Reading [{bar:30}] {pos}/{len} {msg}")
            .context("invalid progress bar template")?,
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = display_name(path);
        pb.set_message(filename.clone());
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        files.push(UploadedFile { filename, bytes });
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(files = files.len(), "Loaded files from disk");
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
