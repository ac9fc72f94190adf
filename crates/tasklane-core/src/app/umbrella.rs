//! Umbrella - 「傘を持っていくべきか」の判定シナリオ
//!
//! 3 つのタスクを順に実行し、結果マップから判定する:
//! rain → umbrella、cloudy & high humidity → umbrella、それ以外 → no umbrella。

use thiserror::Error;

use crate::app::builder::{Process, ProcessBuilder};
use crate::app::runner::Runner;
use crate::domain::decision::lookup;
use crate::domain::{
    BuildError, Check, Context, Decider, Decision, DecisionError, InputError, RunError, RunReport,
    RunResults,
};

pub const WEATHER: &str = "weather";
pub const HUMIDITY: &str = "humidity";

pub const IS_RAINY: &str = "Check if weather is rainy";
pub const IS_CLOUDY: &str = "Check if weather is cloudy";
pub const IS_HUMID: &str = "Check if humidity is high";

const KNOWN_WEATHER: [&str; 3] = ["sunny", "rainy", "cloudy"];
const KNOWN_HUMIDITY: [&str; 2] = ["high", "low"];

/// How inputs are checked before the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// No input checks. A missing key fails the run, any humidity other
    /// than "high" counts as not high.
    #[default]
    AsCoded,

    /// Reject unknown weather/humidity values up front and answer with an
    /// undecidable decision. Humidity is only required for cloudy weather.
    Strict,
}

#[derive(Debug, Error)]
pub enum UmbrellaError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Decision(#[from] DecisionError),
}

/// The three umbrella tasks, in order.
pub fn umbrella_process(validation: Validation) -> Result<Process, BuildError> {
    let humidity = match validation {
        Validation::AsCoded => Check::equals_ignore_case(HUMIDITY, "high"),
        Validation::Strict => Check::equals_ignore_case_or(HUMIDITY, "high", false),
    };

    ProcessBuilder::new()
        .task(IS_RAINY, Check::equals_ignore_case(WEATHER, "rainy"))?
        .task(IS_CLOUDY, Check::equals_ignore_case(WEATHER, "cloudy"))?
        .task(IS_HUMID, humidity)?
        .expect_labels(UmbrellaDecider.required_labels())
        .build()
}

/// Builds the initial context from raw inputs.
pub fn umbrella_context(weather: &str, humidity: Option<&str>) -> Context {
    let ctx = Context::new().with(WEATHER, weather);
    match humidity {
        Some(h) => ctx.with(HUMIDITY, h),
        None => ctx,
    }
}

/// Strict input checks.
pub fn validate_inputs(ctx: &Context) -> Result<(), InputError> {
    let weather = match ctx.get(WEATHER) {
        Some(v) => v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()),
        None => return Err(InputError::InvalidWeather(String::new())),
    };
    let weather_lc = weather.to_lowercase();
    if !KNOWN_WEATHER.contains(&weather_lc.as_str()) {
        return Err(InputError::InvalidWeather(weather));
    }

    if weather_lc == "cloudy" {
        let humidity = ctx.get(HUMIDITY).ok_or(InputError::MissingHumidity)?;
        let valid = humidity
            .as_str()
            .is_some_and(|h| KNOWN_HUMIDITY.contains(&h.to_lowercase().as_str()));
        if !valid {
            let raw = humidity
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| humidity.to_string());
            return Err(InputError::InvalidHumidity(raw));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UmbrellaDecider;

impl Decider for UmbrellaDecider {
    fn required_labels(&self) -> &[&'static str] {
        &[IS_RAINY, IS_CLOUDY, IS_HUMID]
    }

    fn decide(&self, results: &RunResults) -> Result<Decision, DecisionError> {
        if lookup(results, IS_RAINY)? {
            return Ok(Decision::BringUmbrella);
        }
        if lookup(results, IS_CLOUDY)? && lookup(results, IS_HUMID)? {
            return Ok(Decision::BringUmbrella);
        }
        Ok(Decision::NoUmbrella)
    }
}

/// Result of one umbrella decision. `report` is `None` when strict
/// validation rejected the inputs.
#[derive(Debug, Clone)]
pub struct UmbrellaOutcome {
    pub report: Option<RunReport>,
    pub decision: Decision,
}

/// Validate (strict only), run the three tasks, decide.
pub fn decide_umbrella(
    runner: &Runner,
    context: Context,
    validation: Validation,
) -> Result<UmbrellaOutcome, UmbrellaError> {
    if validation == Validation::Strict {
        if let Err(e) = validate_inputs(&context) {
            tracing::warn!(error = ?e, "inputs rejected");
            return Ok(UmbrellaOutcome {
                report: None,
                decision: Decision::Undecidable(e.to_string()),
            });
        }
    }

    let process = umbrella_process(validation)?;
    let report = runner.run(&process, context)?;
    let decision = UmbrellaDecider.decide(&report.results)?;
    tracing::info!(run_id = %report.run_id, %decision, "decision made");

    Ok(UmbrellaOutcome {
        report: Some(report),
        decision,
    })
}
