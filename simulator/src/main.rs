use anyhow::Context;
use clap::Parser;
use copcore::prelude::{now_millis, LatLng};
use copcore::view::{UserRole, ViewAction};
use report::console::ConsoleReporter;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ScenarioConfig;
use workflow::runner::Session;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the tactical COP simulation")]
struct Args {
    /// Load a scenario config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Advance this many simulation ticks synchronously, print the picture as JSON, and exit
    #[arg(long)]
    offline: Option<u32>,
    /// Seconds to keep the live picture running
    #[arg(long, default_value_t = 10)]
    duration: u64,
    /// Override the simulation tick period
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Start in commander view
    #[arg(long, default_value_t = false)]
    commander: bool,
    /// Start with the network degraded (simulation frozen)
    #[arg(long, default_value_t = false)]
    degraded: bool,
    /// Callsign search applied to the visible track list
    #[arg(long)]
    search: Option<String>,
    /// Request a sitrep from the configured summary strategy
    #[arg(long, default_value_t = false)]
    sitrep: bool,
    /// Free-text tactical query answered with location-grounded retrieval
    #[arg(long)]
    intel: Option<String>,
    /// Latitude the intel query is grounded at
    #[arg(long, default_value_t = 34.0522, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude the intel query is grounded at
    #[arg(long, default_value_t = -118.2437, allow_hyphen_values = true)]
    lng: f64,
    /// Number of synthetic contacts layered over the seed picture
    #[arg(long)]
    contacts: Option<usize>,
    /// Seed for the synthetic contact generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply_overrides(&self, config: &mut ScenarioConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(count) = self.contacts {
            config.contacts.count = count;
        }
        if let Some(seed) = self.seed {
            config.contacts.seed = seed;
        }
    }

    fn initial_actions(&self) -> Vec<ViewAction> {
        let mut actions = Vec::new();
        if self.commander {
            actions.push(ViewAction::SetRole(UserRole::Commander));
        }
        if self.degraded {
            actions.push(ViewAction::SetOnline(false));
        }
        if let Some(query) = &self.search {
            actions.push(ViewAction::SetSearch(query.clone()));
        }
        actions
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        ScenarioConfig::load(path)?
    } else {
        ScenarioConfig::default()
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating runtime for the simulation")?;
    runtime.block_on(run(args, config))
}

async fn run(args: Args, config: ScenarioConfig) -> anyhow::Result<()> {
    let reporter = ConsoleReporter::new();
    let mut session = Session::new(&config, now_millis())?;
    for action in args.initial_actions() {
        session.dispatch(action);
    }

    if let Some(ticks) = args.offline {
        for _ in 0..ticks {
            session.step(now_millis())?;
        }
        let snapshot = session.snapshot(now_millis())?;
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?
        );
        if args.sitrep {
            reporter.publish_sitrep(&session.sitrep().await?);
        }
    } else {
        session.start()?;
        reporter.publish_status(&format!(
            "Live picture running for {}s (Ctrl+C to stop)...",
            args.duration
        ));
        if args.sitrep {
            session.spawn_sitrep()?;
        }
        run_live(&mut session, &reporter, Duration::from_secs(args.duration)).await?;
    }

    if let Some(query) = &args.intel {
        let location = LatLng {
            latitude: args.lat,
            longitude: args.lng,
        };
        let report = session.query_local_intel(query, location).await;
        reporter.publish_report("INTEL", &report);
    }

    session.shutdown();
    Ok(())
}

async fn run_live(
    session: &mut Session,
    reporter: &ConsoleReporter,
    duration: Duration,
) -> anyhow::Result<()> {
    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);
    let mut status = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            interrupted = signal::ctrl_c() => {
                interrupted.context("awaiting Ctrl+C to exit")?;
                reporter.publish_status("Interrupted; tearing down.");
                break;
            }
            _ = status.tick() => {
                let now = session.clock_millis();
                reporter.publish(&session.snapshot(now)?);
                if let Some(outcome) = session.take_finished_sitrep().await? {
                    reporter.publish_sitrep(&outcome);
                }
            }
        }
    }
    Ok(())
}
