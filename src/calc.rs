//! The calculation boundary: raw operator input in, [`CalculationResult`]
//! or a typed error out.
//!
//! ```text
//! raw strings -> parse -> validate -> (distance -> travel time) -> gamma -> result
//! ```

use std::fmt;

use tracing::{debug, info};

use crate::convert::{to_light_years, travel_time_seconds};
use crate::error::{CalcError, CalcResult};
use crate::format::format_magnitude;
use crate::numeric::{Decimal, NumericContext};
use crate::relativity::{VelocityPercent, dilated_time, gamma_factor};
use crate::units::{DistanceUnit, SECONDS_PER_YEAR, SpeedOfLightUnit};

/// What the magnitude input measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measurement {
    /// Earth time in years
    #[default]
    Time,
    /// Distance to travel, in the given unit
    Distance(DistanceUnit),
}

impl Measurement {
    /// Name used in messages: "Time" or "Distance".
    pub fn name(self) -> &'static str {
        match self {
            Measurement::Time => "Time",
            Measurement::Distance(_) => "Distance",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw input as gathered by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    pub velocity: String,
    pub measurement: Measurement,
    pub magnitude: String,
    pub c_unit: SpeedOfLightUnit,
}

impl CalculationRequest {
    pub fn time(velocity: &str, years: &str, c_unit: SpeedOfLightUnit) -> Self {
        Self {
            velocity: velocity.to_string(),
            measurement: Measurement::Time,
            magnitude: years.to_string(),
            c_unit,
        }
    }

    pub fn distance(
        velocity: &str,
        distance: &str,
        unit: DistanceUnit,
        c_unit: SpeedOfLightUnit,
    ) -> Self {
        Self {
            velocity: velocity.to_string(),
            measurement: Measurement::Distance(unit),
            magnitude: distance.to_string(),
            c_unit,
        }
    }
}

/// Outcome of one calculation, consumed once by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    pub earth_time_seconds: Decimal,
    pub traveler_time_seconds: Decimal,
    pub gamma: Decimal,
    pub velocity_percent: Decimal,
    /// Speed of light as shown to the operator, e.g. "299.792458 Million m/s"
    pub c_label: String,
    pub c_unit: SpeedOfLightUnit,
    pub measurement: Measurement,
    /// Set in distance mode only
    pub distance_light_years: Option<Decimal>,
}

/// Runs one calculation end to end.
pub fn calculate(ctx: &NumericContext, request: &CalculationRequest) -> CalcResult<CalculationResult> {
    let result = run(ctx, request);
    if let Err(err) = &result {
        debug!(kind = err.kind(), "calculation rejected: {err}");
    }
    result
}

fn run(ctx: &NumericContext, request: &CalculationRequest) -> CalcResult<CalculationResult> {
    let measurement = request.measurement;
    let velocity = ctx.parse(&request.velocity, "velocity")?;
    let magnitude = ctx.parse(&request.magnitude, &measurement.name().to_lowercase())?;
    if !magnitude.is_positive() {
        return Err(CalcError::Range(format!("{measurement} must be positive")));
    }

    let velocity = VelocityPercent::new(ctx, velocity)?;
    let c = request.c_unit.speed_of_light(ctx);

    let (earth_time_seconds, distance_light_years) = match measurement {
        Measurement::Time => (magnitude * ctx.int(SECONDS_PER_YEAR), None),
        Measurement::Distance(unit) => {
            let seconds = travel_time_seconds(ctx, &magnitude, velocity.value(), unit)?;
            (seconds, Some(to_light_years(ctx, &magnitude, unit)?))
        }
    };

    let gamma = gamma_factor(ctx, velocity.value(), &c)?;
    let traveler_time_seconds = dilated_time(ctx, &earth_time_seconds, velocity.value(), &c)?;
    let c_label = format!("{} {}", format_magnitude(&c), request.c_unit);

    info!(
        velocity = %velocity.value(),
        earth_seconds = %earth_time_seconds,
        gamma = %gamma,
        unit = %request.c_unit,
        measurement = %measurement,
        "Calculation completed"
    );

    Ok(CalculationResult {
        earth_time_seconds,
        traveler_time_seconds,
        gamma,
        velocity_percent: velocity.value().clone(),
        c_label,
        c_unit: request.c_unit,
        measurement,
        distance_light_years,
    })
}
