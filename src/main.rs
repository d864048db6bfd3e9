use anyhow::{Context, Result};
use clap::Parser;
use inkboard::config::AppConfig;
use inkboard::core::Scheduler;
use inkboard_displayers::ConsoleDisplay;
use inkboard_sources::QuoteSource;
use inkboard_types::{closest_font_index, DisplayMode, FONTS};
use log::{error, info, warn};
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

/// inkboard - Rotating quotes and countdowns for a 2.13" e-paper panel
#[derive(Parser, Debug, Clone)]
#[command(name = "inkboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Turn the panel on, show one quote and exit
    #[arg(long = "on", conflicts_with = "off")]
    on: bool,

    /// Clear the panel, power it off and exit
    #[arg(long = "off")]
    off: bool,

    /// Quote font height in pixels (the closest supported size is used)
    #[arg(long = "font-size", value_name = "PX")]
    font_size: Option<u32>,

    /// Quote cache file
    #[arg(long = "quotes", value_name = "FILE")]
    quotes: Option<PathBuf>,

    /// Endpoint to fetch quotes from ("none" disables fetching)
    #[arg(long = "endpoint", value_name = "URL")]
    endpoint: Option<String>,

    /// Draw light text on a dark background
    #[arg(long = "dark")]
    dark: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides the -d level
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting inkboard v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("inkboard: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    apply_overrides(&mut config, &cli);

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    runtime.block_on(run_async(cli, config))
}

async fn run_async(cli: Cli, config: AppConfig) -> Result<()> {
    let source = QuoteSource::new(&config.source).context("Failed to set up quote source")?;
    let display = ConsoleDisplay::new(config.display.viewport, config.display.mode);
    let mut scheduler = Scheduler::new(&config, Box::new(source), Box::new(display));

    if cli.off {
        scheduler.turn_off().await.context("Failed to turn off display")?;
        info!("Display turned off");
        return Ok(());
    }

    if cli.on {
        scheduler.show_once().await.context("Failed to show quote")?;
        info!("Quote shown");
        return Ok(());
    }

    let shutdown = shutdown_signal()?;
    scheduler
        .run(shutdown)
        .await
        .context("Scheduler failed to start")?;
    Ok(())
}

/// Fold command line flags into the loaded configuration
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(px) = cli.font_size {
        let index = closest_font_index(px);
        if FONTS[index].height_px != px {
            warn!(
                "Font size {}px not available, using {}px",
                px, FONTS[index].height_px
            );
        }
        config.display.font_index = index;
    }
    if let Some(path) = &cli.quotes {
        config.source.cache_path = path.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        let endpoint = endpoint.trim();
        config.source.endpoint = if endpoint.is_empty() || endpoint.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(endpoint.to_string())
        };
    }
    if cli.dark {
        config.display.mode = DisplayMode::Dark;
    }
}

/// Install the SIGINT and SIGTERM handlers and return a future that
/// resolves on the first of them
///
/// Handlers are registered before this returns, so a signal that arrives
/// while the scheduler is still starting up is not lost.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?;
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;

    Ok(async move {
        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    Ok(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("inkboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_on_and_off_conflict() {
        assert!(Cli::try_parse_from(["inkboard", "--on", "--off"]).is_err());
        assert!(parse(&["--on"]).on);
        assert!(parse(&["--off"]).off);
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "--font-size",
            "13",
            "--quotes",
            "/tmp/q.json",
            "--endpoint",
            "none",
            "--dark",
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.display.font_index, 2);
        assert_eq!(config.source.cache_path, PathBuf::from("/tmp/q.json"));
        assert_eq!(config.source.endpoint, None);
        assert_eq!(config.display.mode, DisplayMode::Dark);
    }

    #[tokio::test]
    async fn test_signal_handlers_install_eagerly() {
        let shutdown = shutdown_signal().unwrap();
        // Nothing has been received, so the future stays pending
        let pending =
            tokio::time::timeout(std::time::Duration::from_millis(10), shutdown).await;
        assert!(pending.is_err());
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &parse(&[]));
        assert_eq!(config, AppConfig::default());

        apply_overrides(&mut config, &parse(&["--endpoint", "http://localhost/q.json"]));
        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("http://localhost/q.json")
        );
    }
}
