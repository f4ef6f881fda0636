//! High-precision special-relativistic time dilation.
//!
//! Every quantity is a [`numeric::Decimal`] carrying at least 200
//! significant digits, so Lorentz factors stay meaningful up to velocities a
//! hair below c.

pub mod calc;
pub mod convert;
pub mod error;
pub mod format;
pub mod metrics;
pub mod numeric;
pub mod relativity;
pub mod tui;
pub mod units;

pub use calc::{CalculationRequest, CalculationResult, Measurement, calculate};
pub use error::{CalcError, CalcResult};
pub use numeric::{Decimal, NumericContext};
pub use units::{DistanceUnit, SpeedOfLightUnit};
