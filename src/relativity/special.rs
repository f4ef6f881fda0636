use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::numeric::{Decimal, NumericContext};

/// `100 - 10^(2 - precision)`: the largest value below 100% of c that fits in
/// the working precision.
///
/// At or above this, `1 - v^2/c^2` has no significant digits left.
pub fn near_light_threshold(ctx: &NumericContext) -> Decimal {
    let ulp = ctx.pow10(2 - ctx.precision() as i64);
    ctx.int(100) - ulp
}

/// Velocity as a percentage of light speed, strictly inside (0, 100) and
/// below [`near_light_threshold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityPercent(Decimal);

impl VelocityPercent {
    pub fn new(ctx: &NumericContext, value: Decimal) -> CalcResult<Self> {
        if !value.is_positive() || value >= ctx.int(100) {
            return Err(CalcError::Range(
                "Velocity must be between 0 and 100 percent of c (exclusive)".into(),
            ));
        }

        let threshold = near_light_threshold(ctx);
        if value >= threshold {
            return Err(CalcError::NearLightSpeed {
                threshold: threshold.to_string(),
            });
        }

        Ok(Self(value))
    }

    pub fn parse(ctx: &NumericContext, raw: &str) -> CalcResult<Self> {
        Self::new(ctx, ctx.parse(raw, "velocity")?)
    }

    pub fn value(&self) -> &Decimal {
        &self.0
    }
}

/// Lorentz factor γ = 1 / sqrt(1 - v^2/c^2)
///
/// `v/c` is taken straight from the percentage, so it is exact, and the
/// radicand is evaluated as `(1 - β)(1 + β)`. Near c the small factor
/// `1 - β` keeps all its digits instead of cancelling.
pub fn gamma_factor(
    ctx: &NumericContext,
    velocity_percent: &Decimal,
    c: &Decimal,
) -> CalcResult<Decimal> {
    if !c.is_positive() {
        return Err(CalcError::Domain(format!("speed of light must be positive, got {c}")));
    }

    let beta = velocity_percent.scale_pow10(-2);
    let velocity = &beta * c;
    debug!(%velocity, "velocity");

    let one = ctx.one();
    let radicand = (&one - &beta) * (&one + &beta);
    if !radicand.is_positive() {
        return Err(CalcError::Domain(format!(
            "velocity {velocity_percent}% of c is not below c"
        )));
    }

    let gamma = radicand.sqrt()?.recip()?;
    debug!(%gamma, "lorentz factor");
    Ok(gamma)
}

/// Proper time of the moving observer for `earth_seconds` of coordinate time.
pub fn dilated_time(
    ctx: &NumericContext,
    earth_seconds: &Decimal,
    velocity_percent: &Decimal,
    c: &Decimal,
) -> CalcResult<Decimal> {
    let gamma = gamma_factor(ctx, velocity_percent, c)?;
    earth_seconds.checked_div(&gamma)
}
