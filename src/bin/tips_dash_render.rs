use std::fs;
use std::path::PathBuf;

use tips_dash::api::{ControlChanged, ControlId, NullPresenter, Presenter, RawControlValue};
use tips_dash::core::Dataset;
use tips_dash::telemetry::init_default_tracing;
use tips_dash::{Dashboard, DashboardConfig};

const USAGE: &str = "usage: tips-dash-render <tips.csv> [--config <path>] [--catalog] [control-id=value ...]";

#[derive(Debug)]
struct CliArgs {
    dataset: PathBuf,
    config: Option<PathBuf>,
    catalog: bool,
    events: Vec<ControlChanged>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let dataset = Dataset::from_csv_path(&args.dataset)
        .map_err(|err| format!("failed to load `{}`: {err}", args.dataset.display()))?;
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    let mut dashboard = Dashboard::new(&dataset, config).map_err(|err| err.to_string())?;
    let mut presenter = NullPresenter::default();
    for event in &args.events {
        dashboard
            .dispatch_to(event, &mut presenter)
            .map_err(|err| format!("control `{}`: {err}", event.control))?;
    }

    let json = if args.catalog {
        dashboard.control_catalog_json_contract_v1_pretty()
    } else {
        let outcome = dashboard.render_all().map_err(|err| err.to_string())?;
        presenter.present(&outcome).map_err(|err| err.to_string())?;
        outcome.to_json_contract_v1_pretty()
    }
    .map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let dataset = args.next().map(PathBuf::from).ok_or_else(|| USAGE.to_owned())?;

    let mut config = None::<PathBuf>;
    let mut catalog = false;
    let mut events = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--catalog" => catalog = true,
            assignment => events.push(parse_assignment(assignment)?),
        }
    }

    Ok(CliArgs {
        dataset,
        config,
        catalog,
        events,
    })
}

/// `control-id=value`, where `value` is `lo,hi`, a number, or text.
fn parse_assignment(input: &str) -> Result<ControlChanged, String> {
    let (id, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected control-id=value, got `{input}`\n{USAGE}"))?;
    let control: ControlId = id.parse()?;

    let value = if let Some((lo, hi)) = value.split_once(',') {
        let parse = |bound: &str| {
            bound
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid range bound `{bound}`: {err}"))
        };
        RawControlValue::Pair([parse(lo)?, parse(hi)?])
    } else if let Ok(number) = value.trim().parse::<f64>() {
        RawControlValue::Number(number)
    } else {
        RawControlValue::text(value)
    };
    Ok(ControlChanged::new(control, value))
}
