use std::{process::ExitCode, sync::Arc};

use dtb_core::{
    config::Config,
    launch,
    logging::{log, LogLevel},
    ports::ChatBot,
    state::AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dtb_core::logging::init("dtb") {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            log(LogLevel::Critical, &e.to_string());
            return ExitCode::FAILURE;
        }
    };
    log(LogLevel::Info, &format!("config loaded: {cfg:?}"));

    let state = AppState::new(cfg);

    // Discord and Twitch adapters implement `ChatBot` and are pushed here.
    let bots: Vec<Arc<dyn ChatBot>> = Vec::new();
    if bots.is_empty() {
        log(
            LogLevel::Info,
            "no chat platform adapters registered, waiting for ctrl-c",
        );
        shutdown_signal().await;
        return ExitCode::SUCCESS;
    }

    let report = launch::run(state, bots, shutdown_signal()).await;

    log(
        LogLevel::Info,
        &format!(
            "bots started: {}, failed: {}",
            report.started, report.failed
        ),
    );
    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log(LogLevel::Error, &format!("cannot listen for ctrl-c: {e}"));
        std::future::pending::<()>().await;
    }
    log(LogLevel::Info, "ctrl-c received");
}
