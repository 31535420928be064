//! CLI for facial harmony analysis of detector landmarks.
//!
//! Usage:
//!   face-harmony <landmarks.json>                      # Human-readable output
//!   face-harmony <landmarks.json> --gender female      # Female reference bands
//!   face-harmony <landmarks.json> --json -o out.json   # JSON saved to file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use face_harmony::{analyze, load_config, to_fixed, Analysis, Gender, LandmarkSet};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "face-harmony")]
#[command(author, version, about = "Facial proportion and harmony metrics from 68 landmarks", long_about = None)]
struct Args {
    /// Landmark JSON: an array of 68 {x, y} points or {"positions": [...]}
    #[arg(required = true)]
    landmarks: PathBuf,

    /// Gender category for jaw reference bands (male|female)
    #[arg(short, long, default_value = "male")]
    gender: Gender,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config with quality thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref()).with_context(|| {
        format!(
            "loading config {}",
            args.config.as_deref().map_or("<default>".into(), |p| p.display().to_string())
        )
    })?;
    debug!("quality thresholds: {:?}", config.quality);

    let raw = std::fs::read_to_string(&args.landmarks)
        .with_context(|| format!("reading landmarks {}", args.landmarks.display()))?;
    let landmarks = LandmarkSet::from_json(&raw)
        .with_context(|| format!("parsing landmarks {}", args.landmarks.display()))?;

    let analysis = analyze(&landmarks, args.gender, &config.quality);

    let output_str = if args.json {
        serde_json::to_string_pretty(&analysis)?
    } else {
        format_human_readable(&analysis)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Output written to {}", path.display());
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(analysis: &Analysis) -> String {
    let mut s = String::new();

    s.push_str(&format!("Overall score: {}/100 ({})\n", analysis.score, analysis.gender));
    s.push_str(&format!("{}\n", analysis.summary));

    s.push_str("\nPhoto quality:\n");
    s.push_str(&format!(
        "  Roll: {}°  Yaw: {}  IPD: {}px\n",
        to_fixed(analysis.quality.roll, 1),
        to_fixed(analysis.quality.yaw, 2),
        to_fixed(analysis.quality.ipd, 1)
    ));
    if analysis.quality_report.is_reliable() {
        s.push_str("  Good, all measurements are reliable\n");
    } else {
        for issue in &analysis.quality_report.issues {
            s.push_str(&format!("  ! {}\n", issue));
        }
    }

    s.push_str("\nMetrics:\n");
    let width = analysis
        .interpreted
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);
    for m in &analysis.interpreted {
        s.push_str(&format!(
            "  {:<width$}  {:>18}  [{:<6}]  {}\n",
            m.name,
            m.value,
            m.confidence.to_string(),
            m.feedback,
            width = width
        ));
    }

    s
}
