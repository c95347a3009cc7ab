use std::io;

use anyhow::Context;
use gs_core::config::SimulatorConfig;
use tokio::io::BufReader;
use tracing::info;

use super::{load_config, tracing::init_tracing_subscriber, wire_onboarding, HostArgs};
use crate::terminal;

/// Run the terminal host with the given command line.
///
/// Configuration is loaded before tracing is installed because the log
/// directory lives under the configured data directory.
pub fn run_app(args: HostArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    if args.fast {
        config.simulator.latency_ms = SimulatorConfig::instant().latency_ms;
    }
    let locale = args
        .locale
        .clone()
        .unwrap_or_else(|| config.general.default_locale.clone());

    let context = wire_onboarding(&config, &locale)?;
    init_tracing_subscriber(Some(&context.data_dir.join("logs")), args.verbose)?;
    info!(
        config = %args.config.display(),
        fast = args.fast,
        locale = %locale,
        session_id = %context.session.id(),
        "govservices host starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build the tokio runtime")?;

    runtime.block_on(async {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = io::stdout();
        terminal::drive(&*context.session, &context.renderer, stdin, &mut stdout).await
    })?;

    if context.session.is_finished() {
        info!(path = %context.session_result_path.display(), "session result stored");
        println!(
            "{} {}",
            context.renderer.text("msg.saved"),
            context.session_result_path.display()
        );
    }
    Ok(())
}
