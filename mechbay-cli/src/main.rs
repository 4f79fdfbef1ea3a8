use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use walkdir::WalkDir;

use mechbay_core::{export_text, load_unit_from_file, LoadError, UnitDesign};

#[derive(Debug, Parser)]
#[command(name = "mechbay", version, about = "Combat unit design file decoder")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a design file and print a report.
    Decode {
        file: PathBuf,

        /// Emit the full decoded unit as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Convert a design file to canonical unit-definition text.
    Convert { input: PathBuf, output: PathBuf },

    /// Convert every .hmb file under a directory. Files that fail to
    /// decode are reported and skipped.
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Decode { file, json } => decode(&file, json),
        Command::Convert { input, output } => convert(&input, &output),
        Command::Batch {
            input_dir,
            output_dir,
        } => batch(&input_dir, &output_dir),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn decode(file: &Path, json: bool) -> Result<(), CliError> {
    let unit = load_unit_from_file(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&unit)?);
    } else {
        print!("{}", report(&unit));
    }
    Ok(())
}

fn convert(input: &Path, output: &Path) -> Result<(), CliError> {
    let unit = load_unit_from_file(input)?;
    fs::write(output, export_text(&unit))?;
    Ok(())
}

fn batch(input_dir: &Path, output_dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(output_dir)?;

    let mut converted = 0usize;
    let mut failed = 0usize;
    for entry in WalkDir::new(input_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Skipping unreadable entry: {err}");
                failed += 1;
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("hmb")
        {
            continue;
        }

        // One bad file must not sink the batch.
        match load_unit_from_file(path) {
            Ok(unit) => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "unit".to_string());
                fs::write(output_dir.join(format!("{name}.txt")), export_text(&unit))?;
                converted += 1;
            }
            Err(err) => {
                eprintln!("Failed to decode {}: {err}", path.display());
                failed += 1;
            }
        }
    }

    println!("Converted {converted} file(s), {failed} failure(s)");
    Ok(())
}

/// Human-readable decode report: the canonical text plus any critical
/// codes that missed every lookup table.
fn report(unit: &UnitDesign) -> String {
    let mut out = export_text(unit);
    if !unit.loaded_cleanly() {
        out.push_str("\nUnresolved criticals:\n");
        for entry in &unit.failed_equipment {
            out.push_str(&format!(
                "  {} in {} (code 0x{:08X})\n",
                entry.label,
                entry.location.name(),
                entry.code
            ));
        }
    }
    out
}
