use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tasklane_core::app::umbrella::{decide_umbrella, umbrella_context};
use tasklane_core::app::{Runner, Validation};
use tasklane_core::domain::{Decision, DomainEvent, RunReport};
use tasklane_core::ports::{EventSink, TracingEventSink};

/// Decide whether to bring an umbrella from weather and humidity.
#[derive(Debug, Parser)]
#[command(name = "tasklane", version)]
struct Args {
    /// Current weather (Sunny, Rainy, Cloudy)
    #[arg(long, env = "TASKLANE_WEATHER", default_value = "Cloudy")]
    weather: String,

    /// Current humidity (High, Low)
    #[arg(long, env = "TASKLANE_HUMIDITY", default_value = "High")]
    humidity: String,

    /// Leave humidity out of the context entirely
    #[arg(long)]
    no_humidity: bool,

    /// Validate inputs before running and refuse to decide on bad ones
    #[arg(long)]
    strict: bool,

    /// Print the run report and decision as JSON
    #[arg(long)]
    json: bool,
}

/// Prints the human transcript on stdout, and forwards to tracing.
struct ConsoleEventSink;

impl EventSink for ConsoleEventSink {
    fn emit(&self, event: &DomainEvent) {
        TracingEventSink.emit(event);
        if let Some(line) = render(event) {
            println!("{line}");
        }
    }
}

/// Transcript line for an event, if it has one.
fn render(event: &DomainEvent) -> Option<String> {
    match event {
        DomainEvent::TaskStarted { label, .. } => Some(format!("Executing task: {label}")),
        DomainEvent::Note { message, .. } => Some(message.clone()),
        DomainEvent::TaskCompleted { label, result, .. } => {
            Some(format!("Result of '{label}': {result}\n"))
        }
        _ => None,
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    decision: &'a Decision,
    message: &'a str,
    report: Option<&'a RunReport>,
}

fn main() -> anyhow::Result<()> {
    // ログは stderr、transcript は stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let validation = if args.strict {
        Validation::Strict
    } else {
        Validation::AsCoded
    };
    let humidity = (!args.no_humidity).then_some(args.humidity.as_str());
    let context = umbrella_context(&args.weather, humidity);
    tracing::debug!(?validation, weather = %args.weather, ?humidity, "inputs");

    if args.json {
        let runner = Runner::default();
        let outcome = decide_umbrella(&runner, context, validation)
            .context("umbrella decision failed")?;
        let out = JsonOutput {
            decision: &outcome.decision,
            message: outcome.decision.message(),
            report: outcome.report.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Agent is starting the decision-making process...\n");
    let runner = Runner::default().with_sink(Arc::new(ConsoleEventSink));
    let outcome =
        decide_umbrella(&runner, context, validation).context("umbrella decision failed")?;

    if outcome.report.is_some() {
        println!("Agent has completed the tasks. Now making the final decision...\n");
    }
    println!("Final Decision: {}", outcome.decision);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklane_core::domain::{RunId, TaskLabel};
    use tasklane_core::ports::{IdGenerator, SystemClock, UlidGenerator};

    fn run_id() -> RunId {
        UlidGenerator::new(SystemClock).generate_run_id()
    }

    #[test]
    fn render_matches_transcript_lines() {
        let run_id = run_id();
        let label = TaskLabel::new("Check if weather is rainy");

        let started = DomainEvent::TaskStarted {
            run_id,
            index: 0,
            label: label.clone(),
        };
        assert_eq!(
            render(&started).as_deref(),
            Some("Executing task: Check if weather is rainy")
        );

        let note = DomainEvent::Note {
            run_id,
            index: 0,
            message: "Checking if weather 'Cloudy' is 'rainy'".to_string(),
        };
        assert_eq!(
            render(&note).as_deref(),
            Some("Checking if weather 'Cloudy' is 'rainy'")
        );

        let completed = DomainEvent::TaskCompleted {
            run_id,
            index: 0,
            label,
            result: false,
        };
        assert_eq!(
            render(&completed).as_deref(),
            Some("Result of 'Check if weather is rainy': false\n")
        );
    }

    #[test]
    fn render_skips_run_level_events() {
        let event = DomainEvent::RunStarted {
            run_id: run_id(),
            task_count: 3,
        };
        assert_eq!(render(&event), None);
    }

    #[test]
    fn args_default_to_cloudy_and_high() {
        let args = Args::try_parse_from(["tasklane"]).unwrap();
        assert_eq!(args.weather, "Cloudy");
        assert_eq!(args.humidity, "High");
        assert!(!args.no_humidity && !args.strict && !args.json);
    }

    #[test]
    fn args_accept_overrides() {
        let args = Args::try_parse_from([
            "tasklane",
            "--weather",
            "Rainy",
            "--no-humidity",
            "--strict",
        ])
        .unwrap();
        assert_eq!(args.weather, "Rainy");
        assert!(args.no_humidity);
        assert!(args.strict);
    }
}
