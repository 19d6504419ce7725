use anyhow::Result;
use bestiary_core::config::{ExtractConfig, TextEncoding};
use bestiary_core::file_utils::{find_files_with_extension, read_text_file};
use bestiary_core::{CreatureRecord, extract_text};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "bestiary",
    version = "0.1.0",
    about = "Extract creature records from d20 stat-block text",
    long_about = None
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to log file
    #[arg(long, global = true, default_value = "/tmp/bestiary.log")]
    log_file: PathBuf,

    /// Verbosity level (repeat for more verbose output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Input text encoding (utf8 or latin1), overrides the config file
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one stat block (first non-blank line is the header)
    Extract {
        /// Stat-block text file
        #[arg(long)]
        input: PathBuf,
        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Extract every stat-block file in a directory
    Batch {
        /// Directory searched recursively for stat-block files
        #[arg(long)]
        input_dir: PathBuf,
        /// Directory receiving one <stem>.json per input
        #[arg(long)]
        output_dir: PathBuf,
        /// File extension to look for, overrides the config file
        #[arg(long)]
        extension: Option<String>,
        /// Quiet mode (0=show messages/warnings, 1=suppress messages, 2=suppress both)
        #[arg(long, default_value_t = 0)]
        quiet: u8,
    },
}

fn setup_logging(verbose: u8, log_file: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let filter_level = match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(filter_level.into());

    let file_appender = tracing_appender::rolling::never(
        log_file.parent().unwrap_or(Path::new(".")),
        log_file.file_name().unwrap_or(std::ffi::OsStr::new("bestiary.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::Layer::new().with_writer(std::io::stderr).with_ansi(true))
        .with(fmt::Layer::new().with_writer(non_blocking).with_ansi(false));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

fn extract_file(path: &Path, encoding: TextEncoding) -> Result<CreatureRecord> {
    let text = read_text_file(path, encoding)?;
    Ok(extract_text(&text)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = setup_logging(cli.verbose, &cli.log_file)?;

    info!("Starting bestiary CLI");

    let config = match &cli.config {
        Some(path) => ExtractConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?,
        None => ExtractConfig::default(),
    };
    let encoding = cli.encoding.unwrap_or(config.input.encoding);
    let pretty = cli.pretty || config.output.pretty;

    match cli.command {
        Commands::Extract { input, output } => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {:?}", input);
            }

            let record = extract_file(&input, encoding)?;
            info!(
                "Extracted {} (CR {}, {:.2}) from {:?}",
                record.name,
                record.challenge_rating,
                record.challenge_rating.value(),
                input
            );

            let json = record.to_json(pretty)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    info!("Wrote {:?}", path);
                }
                None => println!("{}", json),
            }
        }
        Commands::Batch { input_dir, output_dir, extension, quiet } => {
            if !input_dir.exists() {
                anyhow::bail!("Input directory not found: {:?}", input_dir);
            }
            std::fs::create_dir_all(&output_dir)?;

            let extension = extension.unwrap_or(config.input.extension);
            let files = find_files_with_extension(&input_dir, &extension)?;
            if quiet == 0 {
                info!("Found {} .{} files in {:?}", files.len(), extension, input_dir);
            }

            // Each stat block is independent, so files are extracted in parallel
            let results: Vec<(PathBuf, Result<()>)> = files
                .par_iter()
                .map(|path| {
                    let result = extract_file(path, encoding).and_then(|record| {
                        let stem = path
                            .file_stem()
                            .ok_or_else(|| anyhow::anyhow!("No file stem in {:?}", path))?;
                        let target = output_dir.join(stem).with_extension("json");
                        std::fs::write(&target, record.to_json(pretty)?)?;
                        Ok(())
                    });
                    (path.clone(), result)
                })
                .collect();

            let mut extracted = 0usize;
            let mut failed = 0usize;
            for (path, result) in &results {
                match result {
                    Ok(()) => extracted += 1,
                    Err(e) => {
                        failed += 1;
                        if quiet < 2 {
                            tracing::warn!("Failed to extract {:?}: {}", path, e);
                        }
                    }
                }
            }

            if quiet == 0 {
                info!("--- Summary ---");
                info!("Total processed: {}", results.len());
                info!("Extracted: {}", extracted);
                info!("Errors: {}", failed);
            }
        }
    }

    info!("Bestiary CLI finished");
    Ok(())
}
