use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use transcript_convert::{
    PipelineConfig, convert_subtitles, execute_merge, execute_segment_batch, run_pipeline,
};

#[derive(Parser)]
#[command(name = "transcript-convert")]
#[command(author, version, about = "Merge transcript JSON fragments into SRT subtitles and speaker documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing transcript JSON files (prompted for when omitted)
    #[arg(short, long, global = true)]
    input_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge fragments, then write the SRT and the document (default)
    Convert,

    /// Only merge the JSON fragments into one transcript
    Merge,

    /// Convert every JSON fragment to its own SRT file
    Srt,

    /// Render documents from an SRT file or a directory of SRT files
    Docx {
        /// SRT file or directory
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = PipelineConfig::default();
    let outcome = match cli.command.unwrap_or(Commands::Convert) {
        Commands::Convert => resolve_input_dir(cli.input_dir).and_then(|dir| convert(&dir, &config)),
        Commands::Merge => resolve_input_dir(cli.input_dir).and_then(|dir| merge(&dir, &config)),
        Commands::Srt => resolve_input_dir(cli.input_dir).and_then(|dir| srt_batch(&dir, &config)),
        Commands::Docx { input } => docx(&input, &config),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
    }
    println!("✅ Done. Thank you!");
    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Use the directory from the command line or ask the operator for one
fn resolve_input_dir(input_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = input_dir {
        return Ok(dir);
    }

    print!("📁 Enter your directory containing JSON files: ");
    std::io::stdout().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read directory from stdin")?;
    Ok(PathBuf::from(line.trim()))
}

fn convert(input_dir: &Path, config: &PipelineConfig) -> Result<()> {
    let report = run_pipeline(input_dir, config).context("Conversion failed")?;

    info!(
        "Merged {} fragments into {:?}",
        report.sources.len(),
        report.merged_path
    );
    println!("✅ SRT created: {}", report.srt_path.display());
    println!(
        "📄 Final DOCX saved: {} ({} dialogue blocks)",
        report.docx_path.display(),
        report.dialogue_blocks
    );
    Ok(())
}

fn merge(input_dir: &Path, config: &PipelineConfig) -> Result<()> {
    let result = execute_merge(input_dir, &config.merged_prefix).context("Merge failed")?;
    println!(
        "✅ Successfully merged {} files into: {}",
        result.sources.len(),
        result.output_path.display()
    );
    Ok(())
}

fn srt_batch(input_dir: &Path, config: &PipelineConfig) -> Result<()> {
    let report = execute_segment_batch(input_dir, &config.merged_prefix, &config.srt_dir_name)
        .context("SRT conversion failed")?;

    for path in &report.converted {
        println!("✅ SRT created: {}", path.display());
    }
    for (path, reason) in &report.failed {
        println!("❌ Error processing {}: {}", path.display(), reason);
    }
    println!(
        "Processed {} files: {} converted, {} failed",
        report.total(),
        report.converted.len(),
        report.failed.len()
    );
    Ok(())
}

fn docx(input: &Path, config: &PipelineConfig) -> Result<()> {
    let written = convert_subtitles(input, config).context("Document conversion failed")?;
    for path in &written {
        println!("📄 DOCX saved: {}", path.display());
    }
    Ok(())
}
