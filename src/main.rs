//! solar-sizer entry point: CLI wiring over the location index, the
//! calculator, and the ROI view.

use std::fs;
use std::path::Path;
use std::process;

use solar_sizer::calc::FormInput;
use solar_sizer::config::SizingConfig;
use solar_sizer::io::export::{export_metrics_csv, export_roi_csv};
use solar_sizer::location::{LocationTable, LookupIndex};
use solar_sizer::logging;
use solar_sizer::roi::RoiSeries;
use solar_sizer::session::{Estimator, Snapshot};

mod cli;

use cli::CliArgs;

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

/// Loads and indexes the location table; `None` (logged) on failure.
fn load_index(path: &Path) -> Option<LookupIndex> {
    match LocationTable::from_path(path) {
        Ok(table) => {
            let index = LookupIndex::build(table);
            tracing::info!(
                entries = index.len(),
                regions = index.regions().len(),
                "location table loaded"
            );
            Some(index)
        }
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}

/// Reads a previous snapshot; an unreadable one is ignored with a warning.
fn load_snapshot(path: &Path) -> Option<Snapshot> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("cannot read snapshot \"{}\": {e}", path.display());
            return None;
        }
    };
    match Snapshot::from_json(&raw) {
        Ok(snap) => Some(snap),
        Err(e) => {
            tracing::warn!("ignoring malformed snapshot \"{}\": {e}", path.display());
            None
        }
    }
}

fn run_estimate(cli: &CliArgs, config: &SizingConfig, index: Option<&LookupIndex>) {
    let Some(index) = index else {
        fail("location table unavailable; cannot estimate");
    };
    let prior = cli.snapshot_in.as_deref().and_then(load_snapshot);
    let estimator = Estimator::new(index, config.model());

    let snapshot = match estimator.estimate(FormInput::from_raw(&cli.form), prior.as_ref()) {
        Ok(snapshot) => snapshot,
        Err(e) => fail(&e.to_string()),
    };

    println!("{}", snapshot.metrics);

    if let Some(ref path) = cli.metrics_out {
        if let Err(e) = export_metrics_csv(&snapshot.metrics, path) {
            fail(&format!("failed to write CSV: {e}"));
        }
        eprintln!("Metrics written to {}", path.display());
    }

    if let Some(ref path) = cli.snapshot_out {
        let written = snapshot
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            fail(&format!("failed to write snapshot: {e}"));
        }
        eprintln!("Snapshot written to {}", path.display());
    }
}

fn run_roi(cli: &CliArgs, config: &SizingConfig) {
    let series = match RoiSeries::from_path(&config.data.roi) {
        Ok(series) => series,
        Err(e) => {
            tracing::error!("{e}");
            fail("roi view unavailable");
        }
    };

    if cli.show_roi {
        println!("\n{}", series.summary());
    }

    if let Some(ref path) = cli.roi_out {
        if let Err(e) = export_roi_csv(&series, path) {
            fail(&format!("failed to write CSV: {e}"));
        }
        eprintln!("ROI series written to {}", path.display());
    }
}

fn main() {
    logging::init();
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    let mut config = match cli.config_path {
        Some(ref path) => match SizingConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => fail(&e.to_string()),
        },
        None => SizingConfig::default(),
    };
    if let Some(ref path) = cli.locations {
        config.data.locations = path.clone();
    }
    if let Some(ref path) = cli.roi {
        config.data.roi = path.clone();
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_sizer::api::AppState::load(&config));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(cli::DEFAULT_PORT)));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(&format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(solar_sizer::api::serve(state, addr)) {
            fail(&format!("server error: {e}"));
        }
        return;
    }

    if !cli.has_work() {
        cli::print_usage();
        process::exit(1);
    }

    let index = if cli.wants_index() {
        load_index(&config.data.locations)
    } else {
        None
    };

    if cli.list_regions {
        match index {
            Some(ref index) => index.regions().iter().for_each(|r| println!("{r}")),
            None => fail("location table unavailable"),
        }
    }

    if let Some(ref region) = cli.list_localities {
        let Some(ref index) = index else {
            fail("location table unavailable");
        };
        if !index.has_region(region) {
            fail(&format!("unknown region \"{region}\""));
        }
        index.localities(region).iter().for_each(|l| println!("{l}"));
    }

    if cli.has_form {
        run_estimate(&cli, &config, index.as_ref());
    } else if cli.replay_only() {
        // Render a previous result without recomputing it.
        match cli.snapshot_in.as_deref().and_then(load_snapshot) {
            Some(snapshot) => println!("{}", snapshot.metrics),
            None => fail("no usable snapshot"),
        }
    }

    if cli.wants_roi() {
        run_roi(&cli, &config);
    }
}
