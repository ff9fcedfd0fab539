mod logger;

use anyhow::{Context, Result};
use booklet_impose::{CancellationToken, ImposeError, ImpositionConfig};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "booklet",
    about = "Impose a PDF as a saddle-stitched booklet",
    version
)]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output PDF file (defaults to booklet_<input name> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sheet margin in mm, clamped to 0-10
    #[arg(long)]
    margin_mm: Option<f32>,

    /// Add fold and corner trim marks
    #[arg(long)]
    crop_marks: bool,

    /// Leave out fold and corner trim marks
    #[arg(long, conflicts_with = "crop_marks")]
    no_crop_marks: bool,

    /// Load settings from a JSON file; explicit flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Log imposition stages
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose).init()?;

    let config = match &cli.config {
        Some(path) => ImpositionConfig::load(path).await.map_err(describe)?,
        None => ImpositionConfig::default(),
    };
    let config = apply_overrides(config, &cli);

    if let Some(path) = &cli.save_config {
        config.save(path).await.map_err(describe)?;
        log::info!("Saved settings to {}", path.display());
    }

    let source_bytes = tokio::fs::read(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    if cli.stats_only {
        let document = booklet_impose::load_document(&source_bytes).map_err(describe)?;
        let stats = booklet_impose::calculate_statistics(&document).map_err(describe)?;
        println!("Imposition Statistics:");
        println!("  Source pages: {}", stats.source_pages);
        println!("  Blank pages added: {}", stats.blank_pages_added);
        println!("  Booklet pages: {}", stats.normalized_page_count);
        println!("  Sheets: {}", stats.total_sheets);
        println!("  Output pages: {}", stats.output_pages);
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let booklet = booklet_impose::impose(source_bytes, config, CancellationToken::new())
        .await
        .map_err(describe)?;

    tokio::fs::write(&output, &booklet.bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} pages processed in {} sheets",
        booklet.summary.normalized_page_count, booklet.summary.total_sheets
    );
    println!("Booklet → {}", output.display());

    Ok(())
}

/// Explicit flags win over loaded settings
fn apply_overrides(config: ImpositionConfig, cli: &Cli) -> ImpositionConfig {
    let margin_mm = cli.margin_mm.unwrap_or(config.margin_mm);
    let add_crop_marks = if cli.crop_marks {
        true
    } else if cli.no_crop_marks {
        false
    } else {
        config.add_crop_marks
    };
    ImpositionConfig::new(margin_mm, add_crop_marks)
}

/// `booklet_<name>` in the input's directory
fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    input.with_file_name(format!("booklet_{}", name))
}

fn describe(err: ImposeError) -> anyhow::Error {
    match err {
        ImposeError::EmptyDocument => anyhow::anyhow!("The input PDF has no pages"),
        ImposeError::Decode(e) => anyhow::anyhow!("Could not read the input as a PDF: {}", e),
        ImposeError::ImpositionFailed {
            sheet,
            side,
            source,
        } => anyhow::anyhow!(
            "Failed to compose the {} of sheet {}: {}",
            side,
            sheet + 1,
            source
        ),
        ImposeError::Encode(msg) => anyhow::anyhow!("Failed to encode the booklet: {}", msg),
        ImposeError::Cancelled => anyhow::anyhow!("Imposition was cancelled"),
        ImposeError::Config(msg) => anyhow::anyhow!("Invalid settings: {}", msg),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklet_impose::SheetSide;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/docs/zine.pdf")),
            PathBuf::from("/tmp/docs/booklet_zine.pdf")
        );
        assert_eq!(
            default_output_path(Path::new("zine.pdf")),
            PathBuf::from("booklet_zine.pdf")
        );
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["booklet", "in.pdf", "--margin-mm", "3", "--crop-marks"]);
        assert_eq!(cli.margin_mm, Some(3.0));
        assert!(cli.crop_marks);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let loaded = ImpositionConfig::new(8.0, true);

        let cli = Cli::parse_from(["booklet", "in.pdf", "--no-crop-marks"]);
        let config = apply_overrides(loaded, &cli);
        assert!(!config.add_crop_marks);
        assert_eq!(config.margin_mm, 8.0);

        let cli = Cli::parse_from(["booklet", "in.pdf", "--margin-mm", "20"]);
        let config = apply_overrides(loaded, &cli);
        assert!(config.add_crop_marks);
        assert_eq!(config.margin_mm, 10.0);

        let cli = Cli::parse_from(["booklet", "in.pdf", "--crop-marks"]);
        assert!(apply_overrides(ImpositionConfig::default(), &cli).add_crop_marks);
    }

    #[test]
    fn test_crop_mark_flags_conflict() {
        let result =
            Cli::try_parse_from(["booklet", "in.pdf", "--crop-marks", "--no-crop-marks"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_each_error_kind_has_its_own_message() {
        let decode = match booklet_impose::load_document(b"x") {
            Err(e @ ImposeError::Decode(_)) => e,
            other => panic!("Expected Decode error, got {:?}", other.map(|_| ())),
        };
        let errors = vec![
            ImposeError::EmptyDocument,
            decode,
            ImposeError::ImpositionFailed {
                sheet: 0,
                side: SheetSide::Back,
                source: lopdf::Error::ObjectNotFound((12, 0)),
            },
            ImposeError::Encode("disk full".to_string()),
            ImposeError::Cancelled,
            ImposeError::Config("bad json".to_string()),
            ImposeError::Io(std::io::Error::other("no such file")),
        ];

        let messages: Vec<String> = errors.into_iter().map(|e| describe(e).to_string()).collect();
        for (i, a) in messages.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[0], "The input PDF has no pages");
        assert!(messages[1].starts_with("Could not read the input as a PDF"));
        assert!(messages[2].starts_with("Failed to compose the back of sheet 1"));
        assert_eq!(messages[4], "Imposition was cancelled");
    }
}
