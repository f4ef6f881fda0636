//! Distance and travel-time conversions.

use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::numeric::{Decimal, NumericContext};
use crate::units::{DistanceUnit, SECONDS_PER_YEAR};

/// A distance tagged with its unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distance {
    pub value: Decimal,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: Decimal, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_light_years(&self, ctx: &NumericContext) -> CalcResult<Decimal> {
        to_light_years(ctx, &self.value, self.unit)
    }
}

/// Converts `value` in `unit` to light years.
pub fn to_light_years(
    ctx: &NumericContext,
    value: &Decimal,
    unit: DistanceUnit,
) -> CalcResult<Decimal> {
    match unit.per_light_year(ctx) {
        None => Ok(value.clone()),
        Some(factor) => value.checked_div(&factor),
    }
}

/// Converts light years to `unit`.
pub fn from_light_years(ctx: &NumericContext, light_years: &Decimal, unit: DistanceUnit) -> Decimal {
    match unit.per_light_year(ctx) {
        None => light_years.clone(),
        Some(factor) => light_years * &factor,
    }
}

/// Years needed to cover `distance` at `velocity_percent` of c.
pub fn travel_time_years(
    ctx: &NumericContext,
    distance: &Decimal,
    velocity_percent: &Decimal,
    unit: DistanceUnit,
) -> CalcResult<Decimal> {
    if velocity_percent.is_zero() {
        return Err(CalcError::DivisionByZero(
            "travel time conversion (velocity is 0% of c)".into(),
        ));
    }
    let light_years = to_light_years(ctx, distance, unit)?;
    // ly / (pct / 100) == ly * 100 / pct
    let years = (&light_years * &ctx.int(100)).checked_div(velocity_percent)?;
    debug!(%light_years, %years, "travel time");
    Ok(years)
}

/// Seconds needed to cover `distance` at `velocity_percent` of c.
pub fn travel_time_seconds(
    ctx: &NumericContext,
    distance: &Decimal,
    velocity_percent: &Decimal,
    unit: DistanceUnit,
) -> CalcResult<Decimal> {
    let years = travel_time_years(ctx, distance, velocity_percent, unit)?;
    Ok(years * ctx.int(SECONDS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> NumericContext {
        NumericContext::default()
    }

    fn num(s: &str) -> Decimal {
        ctx().parse(s, "test").unwrap()
    }

    #[test]
    fn light_years_are_identity() {
        let d = num("4.25");
        assert_eq!(to_light_years(&ctx(), &d, DistanceUnit::LightYear).unwrap(), d);
        assert_eq!(from_light_years(&ctx(), &d, DistanceUnit::LightYear), d);
    }

    #[test]
    fn kilometers_and_miles_use_fixed_factors() {
        let one_ly_km = num("9.461e12");
        assert_eq!(
            to_light_years(&ctx(), &one_ly_km, DistanceUnit::Kilometer).unwrap(),
            ctx().one()
        );
        assert_eq!(
            from_light_years(&ctx(), &num("2"), DistanceUnit::Mile),
            num("11.758e12")
        );
        let d = Distance::new(num("5.879e12"), DistanceUnit::Mile);
        assert_eq!(d.to_light_years(&ctx()).unwrap(), ctx().one());
    }

    #[test]
    fn travel_time_for_proxima() {
        let years = travel_time_years(&ctx(), &num("4.25"), &num("99"), DistanceUnit::LightYear)
            .unwrap();
        assert!(years.to_fixed(10).starts_with("4.2929292929"));

        let seconds =
            travel_time_seconds(&ctx(), &num("4.25"), &num("99"), DistanceUnit::LightYear)
                .unwrap();
        assert!(seconds.to_string().starts_with("135474545.4545454545"));
    }

    #[test]
    fn zero_velocity_is_division_by_zero() {
        let err = travel_time_seconds(&ctx(), &num("1"), &ctx().zero(), DistanceUnit::Kilometer)
            .unwrap_err();
        assert_eq!(err.kind(), "division-by-zero");
    }

    fn assert_close(a: &Decimal, b: &Decimal) {
        // equal to within a few units in the last place
        let tolerance = b.abs().scale_pow10(-195);
        assert!((a.clone() - b.clone()).abs() <= tolerance, "{a} != {b}");
    }

    proptest! {
        #[test]
        fn prop_roundtrip_km(mantissa in 1i64..i64::MAX, exp in -40i64..40) {
            let x = ctx().int(mantissa).scale_pow10(exp);
            let ly = to_light_years(&ctx(), &x, DistanceUnit::Kilometer).unwrap();
            assert_close(&from_light_years(&ctx(), &ly, DistanceUnit::Kilometer), &x);
        }

        #[test]
        fn prop_roundtrip_mi(mantissa in 1i64..i64::MAX, exp in -40i64..40) {
            let x = ctx().int(mantissa).scale_pow10(exp);
            let ly = to_light_years(&ctx(), &x, DistanceUnit::Mile).unwrap();
            assert_close(&from_light_years(&ctx(), &ly, DistanceUnit::Mile), &x);
        }
    }
}
