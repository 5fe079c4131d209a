pub mod app;

use std::process::ExitCode;

use anyhow::Context;
use decen_fetch::ReqwestClient;
use decen_mirror::{MirrorConfig, MirrorOrchestrator, MirrorReport, RunOutcome};
use decen_verify::Digest;

use crate::ui::table::{AssetRow, AttemptRow, Formatter, SummaryRow};
use app::{DigestArg, MirrorArg};

pub fn digest(arg: &DigestArg) -> ExitCode {
    println!("{}", Digest::resolve(&arg.input));
    ExitCode::SUCCESS
}

pub fn mirror(arg: &MirrorArg) -> anyhow::Result<ExitCode> {
    let input = arg.input.as_deref().context("no input given")?;
    let config = load_config(arg)?;
    let digest = Digest::resolve(input);
    tracing::info!(%input, %digest, "resolved input");

    let servers = match config.load_servers() {
        Ok(servers) => Some(servers),
        Err(e) => {
            tracing::warn!(error = %e, "continuing without a server list");
            None
        }
    };

    let client = ReqwestClient::new(&config.fetch_options()).context("failed to set up HTTP")?;
    let orchestrator = MirrorOrchestrator::from_config(client, &config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime
        .block_on(orchestrator.run(&digest, servers.as_deref()))
        .with_context(|| format!("failed to mirror {digest}"))?;

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.outcome.is_done() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// File and environment layers, then command-line overrides.
fn load_config(arg: &MirrorArg) -> anyhow::Result<MirrorConfig> {
    let mut config = match &arg.config {
        Some(path) => MirrorConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => MirrorConfig::load().context("failed to load configuration")?,
    };

    if let Some(servers) = &arg.servers {
        config.servers_file = servers.clone();
    }
    if let Some(cache_root) = &arg.cache_root {
        config.cache_root = cache_root.clone();
    }
    if let Some(store_root) = &arg.store_root {
        config.store_root = store_root.clone();
    }
    Ok(config)
}

fn print_report(report: &MirrorReport) {
    println!("Digest: {}", report.digest);

    if !report.attempts.is_empty() {
        let rows = report.attempts.iter().map(AttemptRow::from);
        println!("{}", Formatter::header("Servers").build(rows));
    }

    match &report.outcome {
        RunOutcome::CacheHit { origin: Some(origin) } => {
            println!("Using cached document (origin {origin})");
        }
        RunOutcome::CacheHit { origin: None } => {
            println!("Using cached document (origin unknown, relative assets skipped)");
        }
        RunOutcome::Mirrored { server } => println!("Mirrored from {server}"),
        RunOutcome::NotFound => {
            println!("Content not found on any server.");
            return;
        }
        RunOutcome::NoServers => {
            println!("Not cached and no server list available.");
            return;
        }
        RunOutcome::PersistFailed { server, detail } => {
            println!("Found on {server} but could not cache it: {detail}");
            return;
        }
    }

    if let Some(path) = &report.index_path {
        println!("Document: {}", path.display());
    }

    if !report.assets.is_empty() {
        let rows = report.assets.records().map(AssetRow::from);
        println!("{}", Formatter::header("Assets").build(rows));
    }
    println!("{}", Formatter::header("Summary").build([SummaryRow::from(&report.summary)]));
    println!("Note: the cached document links assets on the origin server, not the local copies.");
}
