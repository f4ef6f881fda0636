//! Static unit tables: speed of light per unit scale, distance conversion
//! factors, calendar lengths and the magnitude-prefix table used for display.

use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;
use crate::numeric::{Decimal, NumericContext};

/// Speed of light (m/s)
pub const C_METERS_PER_SECOND: i64 = 299_792_458;

/// Kilometers in a light year (approximate, kept as given: 9.461e12)
pub const KM_PER_LIGHT_YEAR: i64 = 9_461_000_000_000;

/// Miles in a light year (approximate, kept as given: 5.879e12)
pub const MILES_PER_LIGHT_YEAR: i64 = 5_879_000_000_000;

/// Julian year, 365.25 days
pub const SECONDS_PER_YEAR: i64 = 31_557_600;
/// One twelfth of a Julian year
pub const SECONDS_PER_MONTH: i64 = 2_629_800;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Magnitude prefixes as `(power of ten, name)`, descending.
///
/// Lookup scans in this order and takes the first threshold the absolute
/// value meets or exceeds. The `10^0` entry has no name.
pub const MAGNITUDE_PREFIXES: [(i64, &str); 21] = [
    (30, "Nonillion"),
    (27, "Octillion"),
    (24, "Septillion"),
    (21, "Sextillion"),
    (18, "Quintillion"),
    (15, "Quadrillion"),
    (12, "Trillion"),
    (9, "Billion"),
    (6, "Million"),
    (3, "Thousand"),
    (0, ""),
    (-3, "Milli"),
    (-6, "Micro"),
    (-9, "Nano"),
    (-12, "Pico"),
    (-15, "Femto"),
    (-18, "Atto"),
    (-21, "Zepto"),
    (-24, "Yocto"),
    (-27, "Ronto"),
    (-30, "Quecto"),
];

/// Linear scale in which the speed of light is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedOfLightUnit {
    #[default]
    MetersPerSecond,
    CentimetersPerSecond,
    MillimetersPerSecond,
    MicrometersPerSecond,
    NanometersPerSecond,
}

impl SpeedOfLightUnit {
    pub const ALL: [SpeedOfLightUnit; 5] = [
        SpeedOfLightUnit::MetersPerSecond,
        SpeedOfLightUnit::CentimetersPerSecond,
        SpeedOfLightUnit::MillimetersPerSecond,
        SpeedOfLightUnit::MicrometersPerSecond,
        SpeedOfLightUnit::NanometersPerSecond,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpeedOfLightUnit::MetersPerSecond => "m/s",
            SpeedOfLightUnit::CentimetersPerSecond => "cm/s",
            SpeedOfLightUnit::MillimetersPerSecond => "mm/s",
            SpeedOfLightUnit::MicrometersPerSecond => "μm/s",
            SpeedOfLightUnit::NanometersPerSecond => "nm/s",
        }
    }

    /// Power of ten relative to m/s.
    fn exponent(self) -> i64 {
        match self {
            SpeedOfLightUnit::MetersPerSecond => 0,
            SpeedOfLightUnit::CentimetersPerSecond => 2,
            SpeedOfLightUnit::MillimetersPerSecond => 3,
            SpeedOfLightUnit::MicrometersPerSecond => 6,
            SpeedOfLightUnit::NanometersPerSecond => 9,
        }
    }

    /// Speed of light in this unit.
    pub fn speed_of_light(self, ctx: &NumericContext) -> Decimal {
        ctx.int(C_METERS_PER_SECOND).scale_pow10(self.exponent())
    }
}

impl fmt::Display for SpeedOfLightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedOfLightUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m/s" => Ok(SpeedOfLightUnit::MetersPerSecond),
            "cm/s" => Ok(SpeedOfLightUnit::CentimetersPerSecond),
            "mm/s" => Ok(SpeedOfLightUnit::MillimetersPerSecond),
            // micro sign and greek mu both show up in the wild
            "μm/s" | "µm/s" | "um/s" => Ok(SpeedOfLightUnit::MicrometersPerSecond),
            "nm/s" => Ok(SpeedOfLightUnit::NanometersPerSecond),
            other => Err(CalcError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// Distance units accepted in distance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceUnit {
    #[default]
    LightYear,
    Kilometer,
    Mile,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 3] = [
        DistanceUnit::LightYear,
        DistanceUnit::Kilometer,
        DistanceUnit::Mile,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DistanceUnit::LightYear => "ly",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::Mile => "mi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DistanceUnit::LightYear => "Light Years (ly)",
            DistanceUnit::Kilometer => "Kilometers (km)",
            DistanceUnit::Mile => "Miles (mi)",
        }
    }

    /// Units per light year, `None` for light years themselves.
    pub fn per_light_year(self, ctx: &NumericContext) -> Option<Decimal> {
        match self {
            DistanceUnit::LightYear => None,
            DistanceUnit::Kilometer => Some(ctx.int(KM_PER_LIGHT_YEAR)),
            DistanceUnit::Mile => Some(ctx.int(MILES_PER_LIGHT_YEAR)),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DistanceUnit {
    type Err = CalcError;

    /// Accepts the short code or the long display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DistanceUnit::ALL
            .into_iter()
            .find(|unit| s == unit.code() || s == unit.display_name())
            .ok_or_else(|| CalcError::UnsupportedUnit(s.to_string()))
    }
}
