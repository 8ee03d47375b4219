//! Replays a recorded performance against a reference and reports the alignment scores.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use motion_coach::{
    config::Config,
    reference::ReferenceSequence,
    scoring::Verdict,
    session::Session,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reference (coach) sequence, JSON [frames][17][2]
    #[arg(short, long)]
    reference: PathBuf,

    /// Recorded user sequence in the same format
    #[arg(short = 'u', long)]
    recording: PathBuf,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Waiting window length override
    #[arg(long)]
    window: Option<usize>,

    /// Coach buffer length override
    #[arg(long)]
    coach_buffer: Option<usize>,

    /// Trailing compare count override
    #[arg(long)]
    trailing: Option<usize>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Motion Coach - reference replay");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(window) = args.window {
        config.comparison.waiting_window_length = window;
    }
    if let Some(coach_buffer) = args.coach_buffer {
        config.comparison.coach_buffer_length = coach_buffer;
    }
    if let Some(trailing) = args.trailing {
        config.comparison.trailing_compare_count = trailing;
    }
    config.reference.path = Some(args.reference.clone());
    config.reference.required = true;
    config.validate()?;

    let mut session = Session::open(&args.reference, &config)
        .with_context(|| format!("Cannot start session with reference {}", args.reference.display()))?;
    let recording = ReferenceSequence::load(&args.recording)
        .with_context(|| format!("Cannot read recording {}", args.recording.display()))?;

    for (index, frame) in recording.iter().enumerate() {
        let update = session.process(frame);
        if update.matched {
            let label = match update.verdict {
                Some(Verdict::Good) => "good",
                _ => "bad",
            };
            info!(
                "Frame {:>5}: score {:.4} ({}) deviated limbs {:?}",
                index, update.score, label, update.deviated
            );
        }
        if update.finished {
            info!("Reference performance finished at recording frame {}", index);
            break;
        }
    }

    let report = session.report();
    match report.percentage {
        Some(percentage) => println!(
            "{} of {} steps good ({}%), mean score {:.4}{}",
            report.good_steps,
            report.matched_steps,
            percentage,
            report.mean_score.unwrap_or(f64::NAN),
            if report.finished { "" } else { ", reference not finished" }
        ),
        None => println!("No steps matched ({} recording frames)", recording.len()),
    }

    Ok(())
}
