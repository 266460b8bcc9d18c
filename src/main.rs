use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use coastwatch::alerts;
use coastwatch::conditions::ConditionsService;
use coastwatch::config::Config;
use coastwatch::location::{self, format_coords};
use coastwatch::server;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Coastwatch — coastal threat alerts for any location.
///
/// Resolves city names, directory keys or "lat,lon" pairs to coordinates,
/// and serves readings and alerts over HTTP.
///
/// Examples:
///   coastwatch mumbai
///   coastwatch "Cape Town" --snapshot
///   coastwatch 25.7617,-80.1918
///   coastwatch --list
///   coastwatch --serve --port 8080
#[derive(Parser)]
#[command(name = "coastwatch", version, about, long_about = None)]
struct Cli {
    /// City name, directory key, or "lat,lon". Defaults to the configured location.
    #[arg(index = 1, allow_hyphen_values = true)]
    query: Option<String>,

    /// Also print the coastal snapshot and the alerts it would raise.
    #[arg(long, short = 's')]
    snapshot: bool,

    /// List the built-in coastal cities.
    #[arg(long, short = 'l')]
    list: bool,

    /// Run the HTTP API server.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long)]
    host: Option<String>,

    /// Port for --serve.
    #[arg(long)]
    port: Option<u16>,

    /// Config file (default: ~/.coastwatch/config.json).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coastwatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
        return runtime
            .block_on(server::start(&config))
            .with_context(|| format!("serving on {}", config.bind_addr()));
    }

    if cli.list {
        for city in location::directory() {
            eprintln!(
                "  {:<12} {:<26} {}",
                city.key,
                city.display_name,
                format_coords(city.latitude, city.longitude)
            );
        }
        println!("{}", serde_json::to_string_pretty(&location::city_list())?);
        return Ok(());
    }

    let query = cli.query.unwrap_or_else(|| config.default_location.clone());
    let resolved = location::resolve(&query);
    eprintln!("  {}", resolved.display_line());

    if !cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    let conditions = ConditionsService::from_config(&config);
    let snapshot = conditions.snapshot(&resolved, Utc::now());
    let findings = alerts::evaluate(&snapshot);
    for finding in &findings {
        eprintln!("  \u{26A0}\u{FE0F}  [{:?}] {}: {}", finding.severity, finding.kind, finding.description);
    }

    let output = json!({
        "location": resolved,
        "snapshot": snapshot,
        "alerts": findings
            .iter()
            .map(|f| json!({
                "alert_type": f.kind,
                "severity": f.severity,
                "description": f.description,
            }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
