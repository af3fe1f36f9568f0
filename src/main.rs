use anyhow::{Context, Result};
use codesniff_lib::init_logging;
use codesniff_lib::services::{
    render_text, AppConfig, ConfigStore, Detector, OutputFormat,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Flags that consume the following argument as their value
const VALUE_FLAGS: &[&str] = &["--path", "-p", "--format", "-f", "--threshold", "--config"];

fn parse_arg_value(args: &[String], keys: &[&str]) -> Option<String> {
    args.iter()
        .position(|a| keys.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn positional_arg(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for a in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&a.as_str()) {
            skip_next = true;
            continue;
        }
        if !a.starts_with('-') {
            return Some(a.clone());
        }
    }
    None
}

fn load_config(args: &[String]) -> Result<AppConfig> {
    let store = match parse_arg_value(args, &["--config"]) {
        Some(file) => ConfigStore::at_file(PathBuf::from(file)),
        None => match ConfigStore::default_config_dir() {
            Some(dir) => ConfigStore::new(dir),
            None => return Ok(AppConfig::default()),
        },
    };
    store
        .load()
        .with_context(|| format!("loading {}", store.config_file().display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = load_config(&args)?;
    if let Some(t) = parse_arg_value(&args, &["--threshold"]) {
        config.detection.threshold = t
            .parse()
            .with_context(|| format!("invalid --threshold value: {}", t))?;
    }
    if let Some(f) = parse_arg_value(&args, &["--format", "-f"]) {
        config.detection.format = OutputFormat::parse(&f)?;
    }
    if has_flag(&args, "--parallel") {
        config.detection.parallel = true;
    }

    init_logging();

    let detector_config = config.detection.to_detector_config()?;
    let detector = Arc::new(Detector::new(detector_config));

    let path = parse_arg_value(&args, &["--path", "-p"])
        .or_else(|| positional_arg(&args))
        .unwrap_or_else(|| ".".to_string());
    let path = PathBuf::from(path);

    let metadata = std::fs::metadata(&path)
        .with_context(|| format!("cannot access {}", path.display()))?;

    let result = if metadata.is_dir() {
        info!(
            path = %path.display(),
            threshold = detector.threshold().percent(),
            parallel = config.detection.parallel,
            "detect.scan_directory"
        );
        if config.detection.format == OutputFormat::Text {
            println!("Scanning {} for AI-generated code...\n", path.display());
        }

        let stop = Arc::new(AtomicBool::new(false));
        let signal_stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping scan");
                signal_stop.store(true, Ordering::Relaxed);
            }
        });

        let parallel = config.detection.parallel;
        let scan_detector = detector.clone();
        let scan_path = path.clone();
        let scanned = tokio::task::spawn_blocking(move || {
            if parallel {
                scan_detector.scan_directory_parallel(&scan_path, &stop)
            } else {
                scan_detector.scan_directory_cancellable(&scan_path, &stop)
            }
        })
        .await
        .context("scan task failed")?;

        scanned?
    } else {
        let r = detector
            .analyze_file(&path)
            .with_context(|| format!("analyzing {}", path.display()))?;
        detector.single_file_scan(r)
    };

    match config.detection.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print!("{}", render_text(&result)),
    }

    Ok(())
}
