//! ELD Trip Planner - Hours-of-Service trip scheduling and compliance
//!
//! Plans a pickup-and-delivery trip into an HOS-legal duty timeline, checks
//! it against the property-carrying driver rules and prints the result as a
//! JSON envelope on stdout. Logs go to stderr and a daily log file.

mod cli;
mod config;
mod defaults;
mod error;
mod services;
mod types;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use error::PlannerError;
use services::hos::ScheduleOptions;
use services::routing::create_route_provider;
use services::trip_planner::{plan_with_route, TripPlanner};
use types::{BatchItem, ErrorDetail, ErrorResponse, RouteModel, ScheduleRequest, SuccessResponse, TripRequest};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the JSON result, so console logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,eld_trip_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Starting ELD trip planner");

    let pretty = match &cli.command {
        Command::Plan { pretty, .. } | Command::Schedule { pretty, .. } | Command::Batch { pretty, .. } => *pretty,
    };

    match run(cli.command, &config).await {
        Ok(payload) => {
            println!("{}", render(&SuccessResponse::new(payload), pretty)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Planning failed: {:#}", e);
            let response = ErrorResponse::new(error_code(&e), format!("{:#}", e));
            println!("{}", render(&response, pretty)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(command: Command, config: &config::Config) -> Result<serde_json::Value> {
    match command {
        Command::Plan { current, pickup, dropoff, cycle_used, sleeper, .. } => {
            let request = TripRequest {
                current_location: current,
                pickup_location: pickup,
                dropoff_location: dropoff,
                current_cycle_used: cycle_used,
            };
            let plan = planner(config, sleeper)?.plan_trip(&request).await?;
            Ok(serde_json::to_value(plan)?)
        }
        Command::Schedule { input, sleeper, .. } => {
            let raw = read_input(input.as_deref())?;
            let request: ScheduleRequest = serde_json::from_str(&raw)
                .map_err(|e| PlannerError::InvalidInput(format!("malformed schedule input: {}", e)))?;
            let route = RouteModel::new(request.route.to_pickup, request.route.to_dropoff)?;
            let plan = plan_with_route(&request.trip, &route, &schedule_options(sleeper))?;
            Ok(serde_json::to_value(plan)?)
        }
        Command::Batch { input, sleeper, .. } => {
            let raw = read_input(input.as_deref())?;
            let requests: Vec<TripRequest> = serde_json::from_str(&raw)
                .map_err(|e| PlannerError::InvalidInput(format!("malformed batch input: {}", e)))?;

            let results = planner(config, sleeper)?.plan_batch(&requests).await;
            let items: Vec<_> = results
                .into_iter()
                .map(|result| match result {
                    Ok(plan) => BatchItem::Planned { plan },
                    Err(e) => BatchItem::Failed {
                        error: ErrorDetail {
                            code: e.code().to_string(),
                            message: e.to_string(),
                        },
                    },
                })
                .collect();
            Ok(serde_json::to_value(items)?)
        }
    }
}

fn planner(config: &config::Config, sleeper: bool) -> Result<TripPlanner> {
    let provider = create_route_provider(config)?;
    info!("Route provider: {}", provider.name());
    Ok(TripPlanner::new(provider, Duration::from_secs(config.route_timeout_seconds))
        .with_options(schedule_options(sleeper)))
}

fn schedule_options(sleeper: bool) -> ScheduleOptions {
    if sleeper {
        ScheduleOptions::sleeper_berth()
    } else {
        ScheduleOptions::default()
    }
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Envelope code for a failed run; anything outside the planner taxonomy is internal.
fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<PlannerError>()
        .map(PlannerError::code)
        .unwrap_or("INTERNAL")
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_for_planner_errors() {
        let err = anyhow::Error::from(PlannerError::InvalidInput("pickupLocation must not be empty".into()));
        assert_eq!(error_code(&err), "INVALID_INPUT");

        let err = anyhow::Error::from(PlannerError::RouteUnavailable("timed out".into()));
        assert_eq!(error_code(&err), "ROUTE_UNAVAILABLE");
    }

    #[test]
    fn test_error_code_defaults_to_internal() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(error_code(&err), "INTERNAL");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/trips.json"))).unwrap_err();
        assert_eq!(error_code(&err), "INTERNAL");
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let value = serde_json::json!({"a": 1});
        assert_eq!(render(&value, false).unwrap(), r#"{"a":1}"#);
        assert!(render(&value, true).unwrap().contains('\n'));
    }
}
