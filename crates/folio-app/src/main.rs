//! Folio headless driver.
//!
//! Replays a scenario (page layout plus a script of scrolls, nav clicks,
//! waits, toggles and form input) against a simulated page, logging every
//! navigation transition, then prints the history log.
//!
//! Usage: `folio-app <scenario.toml> [--prefs <file.json>] [--offline]`

mod runner;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use folio_core::platform::{FormRelay, JsonFileStore, MemoryStore, OfflineRelay, PreferenceStore};
use folio_net::HttpFormRelay;

use runner::Report;
use scenario::Scenario;

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    scenario: PathBuf,
    prefs: Option<PathBuf>,
    offline: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut scenario = None;
        let mut prefs = None;
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--prefs" => {
                    let path = args.next().context("--prefs needs a file path")?;
                    prefs = Some(PathBuf::from(path));
                },
                "--offline" => offline = true,
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ if scenario.is_some() => bail!("unexpected argument {arg}"),
                _ => scenario = Some(PathBuf::from(&arg)),
            }
        }

        Ok(Self {
            scenario: scenario
                .context("usage: folio-app <scenario.toml> [--prefs <file.json>] [--offline]")?,
            prefs,
            offline,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;

    let store: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(
            JsonFileStore::open(path)
                .with_context(|| format!("opening preferences {}", path.display()))?,
        ),
        None => Box::new(MemoryStore::new()),
    };
    let relay: Box<dyn FormRelay> = if args.offline {
        Box::new(OfflineRelay)
    } else {
        Box::new(HttpFormRelay::with_rustls())
    };

    let report = runner::run(&scenario, store, relay)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!("Transitions ({}):", report.transitions.len());
    for (from, to) in &report.transitions {
        println!("  {from} -> {to}");
    }
    println!("History ({} writes):", report.history.len());
    for (i, hash) in report.history.iter().enumerate() {
        let shown = if hash.is_empty() { "(cleared)" } else { hash };
        println!("  {:>3}  {shown}", i + 1);
    }
    println!(
        "Final: section={} hash={:?} scroll_y={:.0}",
        report.final_section, report.final_hash, report.scroll_y
    );
    println!(
        "Prefs: theme={:?} language={} | form: {:?}",
        report.theme, report.language, report.form_status
    );
    if let Some(banner) = report.form_banner {
        println!("Banner: {banner}");
    }
    if report.errors > 0 {
        println!("{} host errors were logged", report.errors);
    }
}
