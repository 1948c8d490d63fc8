mod args;
mod error;

use std::path::Path;

use args::{Args, OutputFormat};
use clap::Parser;
use error::CliError;
use playbook_report_core::api::{load_default, parse_results_stream_async_with, LoggingConfig};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();
    let mut cfg =
        load_default(args.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(fold) = args.stats_fold {
        cfg.merge.stats_fold = fold.into();
    }
    init_tracing(&cfg.logging, args.verbose).map_err(CliError::Logging)?;

    let results = match args.input.as_deref() {
        Some(path) if !args.reads_stdin() => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| CliError::Input {
                    path: path.display().to_string(),
                    source: e,
                })?;
            parse_results_stream_async_with(file, &cfg.merge).await?
        }
        _ => parse_results_stream_async_with(tokio::io::stdin(), &cfg.merge).await?,
    };

    tracing::info!(
        plays = results.plays.len(),
        tasks = results.task_count(),
        hosts = results.stats.len(),
        "results merged"
    );

    let out = match args.format {
        OutputFormat::Text => results.render(),
        OutputFormat::Json => {
            let mut s = results.to_json_pretty()?;
            s.push('\n');
            s
        }
    };
    let mut stdout = tokio::io::stdout();
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    if args.no_check {
        return Ok(0);
    }

    match results.check_stats() {
        Ok(()) => Ok(0),
        Err(e) => {
            for failed in results.failed_outcomes() {
                tracing::warn!(
                    host = failed.host,
                    task = failed.task.name(),
                    msg = %failed.outcome.message(),
                    "task failed"
                );
            }
            eprintln!("{e}");
            Ok(2)
        }
    }
}

/// Stdout carries the report, so diagnostics only ever go to stderr or the log file.
/// `-v` beats `RUST_LOG`, which beats the configured level.
fn init_tracing(logging: &LoggingConfig, verbose: u8) -> Result<(), String> {
    if logging.is_silent() {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if verbose == 0 && !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.filter_directive(verbose)).map_err(|e| e.to_string())?,
    };

    let file_layer = match logging.file.as_deref() {
        Some(path) => {
            let name = path
                .file_name()
                .ok_or_else(|| format!("log file {} has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("create log dir {} failed: {e}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    // One run is short; timestamps on the terminal are noise.
    let stderr_layer = logging.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
