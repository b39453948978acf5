mod cli;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Command};
use jyotish::{AyanamsaModel, ChartEngine, SwissEphemerisAdapter, TimeInstant};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = jyotish_config::load_config(cli.config.as_deref())?;
    if let Some(name) = &cli.ayanamsa {
        config.chart.ayanamsa = name
            .parse::<AyanamsaModel>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    let adapter = SwissEphemerisAdapter::new(Some(config.ephemeris_path.clone()))
        .context("Failed to initialise Swiss Ephemeris")?;
    let engine = ChartEngine::new(adapter, config.chart.clone());
    let record = cli.command.birth().to_record();

    match &cli.command {
        Command::Chart(_) => print_json(&engine.compute_chart(&record)?, cli.pretty),
        Command::Planets(_) => print_json(&engine.positions(&record)?, cli.pretty),
        Command::Ascendant(_) => print_json(&engine.ascendant(&record)?, cli.pretty),
        Command::Houses(_) => print_json(&engine.houses(&record)?, cli.pretty),
        Command::Dashas { at, .. } => {
            let schedule = engine.dasha_schedule(&record)?;
            let Some(at) = at else {
                return print_json(&schedule, cli.pretty);
            };
            let instant = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("--at must be an RFC 3339 timestamp, got '{at}'"))?;
            let active = schedule.period_at(TimeInstant::from_utc(instant.with_timezone(&Utc)));
            if active.is_none() {
                log::warn!("{at} falls outside the computed dasha sequence");
            }
            print_json(
                &serde_json::json!({ "schedule": schedule, "active": active }),
                cli.pretty,
            )
        }
        Command::Nakshatra { body, .. } => {
            let placement = engine.nakshatra_of(&record, body)?;
            if placement.is_none() {
                log::warn!("No position available for {body}");
            }
            print_json(&placement, cli.pretty)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
