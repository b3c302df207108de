//! VRTK harness CLI
//!
//! Runs the bundled interaction suites on a simulated frame loop and writes
//! their console lines through `tracing`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vrtk_testkit::{HarnessConfig, MarkupMode, TracingLogSink};

#[derive(Parser)]
#[command(name = "vrtk-harness")]
#[command(about = "Run VRTK interaction suites on a simulated frame loop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "vrtk-harness.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable the bundled suites and drive frames until they have run
    Run {
        /// Frames to drive before joining
        #[arg(short, long)]
        frames: Option<u64>,

        /// Emit bare text instead of rich-text tags
        #[arg(long)]
        plain: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Effective config plus whether it came from a file on disk
fn load_config(
    cli: &Cli,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(HarnessConfig, bool)> {
    let from_file = cli.config.exists();
    let mut config = HarnessConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    config.merge_with_vars(lookup)?;

    if let Commands::Run { frames, plain } = &cli.command {
        if let Some(frames) = frames {
            config.frames = *frames;
        }
        if *plain {
            config.markup = MarkupMode::Plain;
        }
    }

    config.validate()?;
    Ok((config, from_file))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, from_file) = load_config(&cli, |key| std::env::var(key).ok())?;

    let log_filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    tracing_subscriber::fmt().with_env_filter(log_filter).init();
    if !from_file {
        tracing::info!(path = %cli.config.display(), "config file not found, using defaults");
    }

    match cli.command {
        Commands::Run { .. } => {
            let ran = vrtk_harness::run_suites(&config, TracingLogSink::new()).await?;
            tracing::info!(activations = ran, "suites finished");
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn frames_from_env(key: &str) -> Option<String> {
        (key == "VRTK_FRAMES").then(|| "5".to_string())
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("vrtk-harness.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cli_flags_override_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "frames = 3\nmarkup = \"rich_text\"\n");
        let path = path.to_str().unwrap();

        let cli = parse(&["vrtk-harness", "--config", path, "run", "--frames", "9", "--plain"]);
        let (config, from_file) = load_config(&cli, frames_from_env).unwrap();
        assert!(from_file);
        assert_eq!(config.frames, 9);
        assert_eq!(config.markup, MarkupMode::Plain);

        let cli = parse(&["vrtk-harness", "--config", path, "run"]);
        let (config, _) = load_config(&cli, frames_from_env).unwrap();
        assert_eq!(config.frames, 5);
        assert_eq!(config.markup, MarkupMode::RichText);

        let (config, _) = load_config(&cli, |_| None).unwrap();
        assert_eq!(config.frames, 3);
    }

    #[test]
    fn test_config_subcommand_ignores_run_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "frames = 3\n");

        let cli = parse(&["vrtk-harness", "config", "--config", path.to_str().unwrap()]);
        let (config, _) = load_config(&cli, frames_from_env).unwrap();
        assert_eq!(config.frames, 5);
    }

    #[test]
    fn test_missing_config_file_reports_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let cli = parse(&["vrtk-harness", "--config", missing.to_str().unwrap(), "run"]);
        let (config, from_file) = load_config(&cli, |_| None).unwrap();
        assert!(!from_file);
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_invalid_toml_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "markup = \"ansi\"\n");

        let cli = parse(&["vrtk-harness", "--config", path.to_str().unwrap(), "run"]);
        let err = load_config(&cli, |_| None).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(&path.display().to_string()));
        assert!(message.contains("Invalid TOML"));
    }

    #[test]
    fn test_zero_frames_flag_fails_validation() {
        let cli = parse(&["vrtk-harness", "--config", "no-such-file.toml", "run", "--frames", "0"]);
        assert!(load_config(&cli, |_| None).is_err());
    }
}
