//! Example: Compare two recordings
//!
//! Usage:
//!   cargo run --release --example compare_recordings -- [--plot PATH] [--log FILE] [--json] <file1> <file2>
//!
//! Notes:
//! - Prints the three scores as percentages.
//! - `--log` appends one line per comparison, named by file basename.
//! - Set RUST_LOG=debug for pipeline details.

use std::env;
use std::path::{Path, PathBuf};

use swara_similarity::visualization::renderer::display_name;
use swara_similarity::{append_log_entry, format_log_line, AnalysisConfig, Comparator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut plot: Option<PathBuf> = None;
    let mut log_file: Option<PathBuf> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--plot" => {
                let v = args.first().ok_or("--plot requires a path")?.clone();
                args.remove(0);
                plot = Some(PathBuf::from(v));
            }
            "--log" => {
                let v = args.first().ok_or("--log requires a path")?.clone();
                args.remove(0);
                log_file = Some(PathBuf::from(v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: compare_recordings [--plot PATH] [--log FILE] [--json] <file1> <file2>\n\
                     \n\
                     --plot PATH  Write the SVG comparison chart\n\
                     --log FILE   Append the result line to FILE\n\
                     --json       Print the full result as JSON\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.len() != 2 {
        eprintln!("ERROR: Provide exactly two audio file paths. Use --help for usage.");
        std::process::exit(2);
    }

    let (file1, file2) = (Path::new(&paths[0]), Path::new(&paths[1]));

    let mut comparator = Comparator::new(AnalysisConfig::default())?;
    let result = comparator.analyze_similarity(file1, file2, plot.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let (overall, pattern, swara) = result.percentages();
        println!("{} vs {}", display_name(file1), display_name(file2));
        println!("  Overall Similarity: {:.2}%", overall);
        println!("  Pattern Similarity: {:.2}%", pattern);
        println!("  Swara Similarity:   {:.2}%", swara);
        if let Some(chart) = &result.visualization_file {
            println!("  Chart: {}", chart);
        }
        for warning in &result.metadata.warnings {
            eprintln!("WARNING: {}", warning);
        }
    }

    if let Some(log_file) = log_file {
        let line = format_log_line(&display_name(file1), &display_name(file2), &result);
        append_log_entry(&log_file, &line)?;
    }

    Ok(())
}
