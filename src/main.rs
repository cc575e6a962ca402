//! Coub Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use coub_downloader::{
    api::CoubApi,
    cli::{can_prompt, prompt_for_settings, Args},
    config::{validate_config, Config},
    download::{export_liked, ExportOptions, ExportPhase},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_export_stats, print_info,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Authentication(_) | Error::Fetch { .. } => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Cancelled => ExitCode::from(exit_codes::ABORT as u8),
                Error::Download(_) | Error::Persistence { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!(
            "Configuration file not found: {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    if config.account.remember_token.is_empty() && can_prompt() {
        prompt_for_settings(&mut config)?;
    }

    validate_config(&config)?;

    print_config_summary(
        &config.download_directory().display().to_string(),
        &config.options.sanitize_mode.to_string(),
        config.options.item_concurrency,
    );

    let api = CoubApi::new(&config.account.remember_token, config.request_timeout())?;

    // Ctrl-C stops the run at the next page or item boundary
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_warning("Interrupted, finishing current items...");
            on_interrupt.cancel();
        }
    });

    print_info("Collecting liked coubs...");
    let report = export_liked(&api, &ExportOptions::from_config(&config), &cancel).await?;

    print_export_stats(&report.stats);

    if report.phase == ExportPhase::Cancelled {
        print_warning("Export cancelled before all coubs were saved");
        return Ok(exit_codes::ABORT);
    }

    if report.stats.items_failed > 0 {
        print_warning(&format!(
            "{} coub(s) could not be saved, see the log above",
            report.stats.items_failed
        ));
        return Ok(exit_codes::SOME_ITEMS_FAILED);
    }

    print_success("All liked coubs exported");
    Ok(exit_codes::SUCCESS)
}
