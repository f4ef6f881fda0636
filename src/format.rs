//! Human-readable rendering of quantities that span hundreds of orders of
//! magnitude.

use crate::calc::{CalculationResult, Measurement};
use crate::numeric::{Decimal, NumericContext};
use crate::units::{
    MAGNITUDE_PREFIXES, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_MONTH,
    SECONDS_PER_YEAR,
};

/// Fractional digits kept when a prefix applies.
pub const PREFIXED_FRACTION_DIGITS: u64 = 50;

/// Fractional digits kept below the smallest prefix.
pub const TINY_FRACTION_DIGITS: u64 = 100;

/// Returned by [`format_duration_str`] when the input is not a number.
pub const DURATION_ERROR: &str = "Error calculating time";

const RULE: &str = "----------------------------------------";

fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        let kept = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(kept);
    }
    s
}

/// Renders `value` scaled to the largest magnitude prefix it reaches.
///
/// `299792458` becomes `"299.792458 Million"`, `0.0005` becomes `"500 Micro"`,
/// values in `[1, 1000)` carry no suffix. Anything smaller than `1e-30`
/// (including zero) is written out in full.
pub fn format_magnitude(value: &Decimal) -> String {
    for (exp, name) in MAGNITUDE_PREFIXES {
        if value.abs_at_least_pow10(exp) {
            let scaled = trim_fraction(value.scale_pow10(-exp).to_fixed(PREFIXED_FRACTION_DIGITS));
            return if name.is_empty() {
                scaled
            } else {
                format!("{scaled} {name}")
            };
        }
    }
    trim_fraction(value.to_fixed(TINY_FRACTION_DIGITS))
}

/// Breaks `seconds` down into years, months, days, hours, minutes and
/// seconds, e.g. `"2 years, 1 minutes, 1 seconds"`.
///
/// Units always take the plural label. The leftover seconds keep their
/// fractional digits and are rendered with [`format_magnitude`].
pub fn format_duration(ctx: &NumericContext, seconds: &Decimal) -> String {
    let units = [
        (SECONDS_PER_YEAR, "years"),
        (SECONDS_PER_MONTH, "months"),
        (SECONDS_PER_DAY, "days"),
        (SECONDS_PER_HOUR, "hours"),
        (SECONDS_PER_MINUTE, "minutes"),
    ];

    let mut parts = Vec::new();
    let mut rest = seconds.clone();
    for (size, label) in units {
        let Ok((count, remainder)) = rest.div_rem(&ctx.int(size)) else {
            return DURATION_ERROR.to_string();
        };
        if count.is_positive() {
            parts.push(format!("{count} {label}"));
        }
        rest = remainder;
    }
    if !rest.is_zero() {
        parts.push(format!("{} seconds", format_magnitude(&rest)));
    }

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}

/// [`format_duration`] for raw text; never fails, unparseable input yields
/// [`DURATION_ERROR`].
pub fn format_duration_str(ctx: &NumericContext, raw: &str) -> String {
    match ctx.parse(raw, "time") {
        Ok(seconds) => format_duration(ctx, &seconds),
        Err(_) => DURATION_ERROR.to_string(),
    }
}

/// The plain-text results report shown to the operator.
pub fn format_report(ctx: &NumericContext, result: &CalculationResult) -> String {
    let mut lines = vec![
        "=== Time Dilation Calculation Results ===".to_string(),
        format!(
            "Velocity: {}% of c ({})",
            result.velocity_percent, result.c_label
        ),
    ];
    if let (Measurement::Distance(_), Some(ly)) = (result.measurement, &result.distance_light_years)
    {
        lines.push(format!("Distance: {} light years", format_magnitude(ly)));
    }
    lines.extend([
        format!("Gamma factor: {}", format_magnitude(&result.gamma)),
        String::new(),
        "Measurement Details:".to_string(),
        RULE.to_string(),
        "Earth time:".to_string(),
        format!("  {}", format_duration(ctx, &result.earth_time_seconds)),
        format!("  ({} seconds)", format_magnitude(&result.earth_time_seconds)),
        String::new(),
        "Traveler time:".to_string(),
        format!("  {}", format_duration(ctx, &result.traveler_time_seconds)),
        format!("  ({} seconds)", format_magnitude(&result.traveler_time_seconds)),
        RULE.to_string(),
    ]);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NumericContext {
        NumericContext::default()
    }

    fn num(s: &str) -> Decimal {
        ctx().parse(s, "test").unwrap()
    }

    #[test]
    fn magnitude_picks_largest_prefix() {
        assert_eq!(format_magnitude(&num("299792458")), "299.792458 Million");
        assert_eq!(format_magnitude(&num("12345")), "12.345 Thousand");
        assert_eq!(format_magnitude(&num("0.000123")), "123 Micro");
        assert_eq!(format_magnitude(&num("0.5")), "500 Milli");
        assert_eq!(format_magnitude(&num("1e33")), "1000 Nonillion");
        assert_eq!(format_magnitude(&num("-2500")), "-2.5 Thousand");
    }

    #[test]
    fn magnitude_without_suffix() {
        assert_eq!(format_magnitude(&num("1")), "1");
        assert_eq!(format_magnitude(&num("999.5")), "999.5");
        assert_eq!(format_magnitude(&num("42.000")), "42");
    }

    #[test]
    fn magnitude_below_smallest_prefix() {
        assert_eq!(
            format_magnitude(&num("1e-40")),
            "0.0000000000000000000000000000000000000001"
        );
        assert_eq!(format_magnitude(&ctx().zero()), "0");
        // beyond 100 fractional digits nothing is left
        assert_eq!(format_magnitude(&num("1e-120")), "0");
    }

    #[test]
    fn magnitude_rounds_to_fifty_places() {
        let third = ctx().one().checked_div(&ctx().int(3)).unwrap();
        let expected = format!("333.{} Milli", "3".repeat(50));
        assert_eq!(format_magnitude(&third), expected);
    }

    #[test]
    fn duration_zero_and_one_year() {
        assert_eq!(format_duration(&ctx(), &ctx().zero()), "0 seconds");
        assert_eq!(format_duration(&ctx(), &ctx().int(31_557_600)), "1 years");
    }

    #[test]
    fn duration_skips_empty_units() {
        let seconds = ctx().int(2 * 31_557_600 + 61);
        assert_eq!(
            format_duration(&ctx(), &seconds),
            "2 years, 1 minutes, 1 seconds"
        );
        assert_eq!(format_duration(&ctx(), &num("0.5")), "500 Milli seconds");
    }

    #[test]
    fn duration_keeps_fractional_seconds() {
        let traveler = num("27329683.282467801039110870333352858903517135538823233853966967");
        assert_eq!(
            format_duration(&ctx(), &traveler),
            "10 months, 11 days, 22 hours, 34 minutes, \
             43.28246780103911087033335285890351713553882323385397 seconds"
        );
    }

    #[test]
    fn duration_fails_closed_on_bad_text() {
        assert_eq!(format_duration_str(&ctx(), "soon"), DURATION_ERROR);
        assert_eq!(format_duration_str(&ctx(), "1e999999999"), DURATION_ERROR);
        assert_eq!(format_duration_str(&ctx(), "3600"), "1 hours");
    }
}
