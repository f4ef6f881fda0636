//! Arbitrary-precision decimal arithmetic.
//!
//! Every quantity in the engine is a [`Decimal`]: a `BigDecimal` paired with
//! the working precision (significant digits) of the [`NumericContext`] that
//! created it. Parsing keeps every digit of the input. Arithmetic results are
//! rounded half-to-even to the working precision; only display formatting
//! truncates further.
//!
//! ```text
//! exact:    parse, integer division, remainder, power-of-ten scaling
//! rounded:  + - * / sqrt recip
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Pow, Signed, ToPrimitive, Zero};

use crate::error::{CalcError, CalcResult};

/// Working precision used when nothing else is configured.
pub const DEFAULT_PRECISION: u64 = 200;

/// Lowest precision the engine accepts.
pub const MIN_PRECISION: u64 = 200;

/// Highest precision the engine accepts.
pub const MAX_PRECISION: u64 = 100_000;

/// Largest decimal exponent (or fraction length) accepted from input.
pub const MAX_EXPONENT: i64 = 100_000;

const GUARD_DIGITS: u64 = 3;

/// Process-wide numeric settings, fixed at startup and passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericContext {
    precision: u64,
}

impl Default for NumericContext {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl NumericContext {
    pub fn new(precision: u64) -> CalcResult<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(CalcError::Config(format!(
                "precision must be between {MIN_PRECISION} and {MAX_PRECISION} significant digits, got {precision}"
            )));
        }
        Ok(Self { precision })
    }

    /// Working precision in significant digits.
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// Parses a real-number literal exactly.
    ///
    /// Accepts an optional sign, digits with an optional fraction, and an
    /// optional `e`/`E` exponent. `field` names the input in the error.
    pub fn parse(&self, raw: &str, field: &str) -> CalcResult<Decimal> {
        let canonical = canonical_literal(raw.trim()).ok_or_else(|| CalcError::parse(field, raw))?;
        let value = BigDecimal::from_str(&canonical).map_err(|_| CalcError::parse(field, raw))?;

        let (_, scale) = value.as_bigint_and_exponent();
        if scale.abs() > MAX_EXPONENT {
            return Err(CalcError::Range(format!(
                "{field} is outside the supported range (exponent beyond ±{MAX_EXPONENT})"
            )));
        }

        Ok(Decimal {
            value,
            precision: self.precision,
        })
    }

    pub fn int(&self, value: i64) -> Decimal {
        Decimal {
            value: BigDecimal::from(value),
            precision: self.precision,
        }
    }

    /// `10^exp`, exact.
    pub fn pow10(&self, exp: i64) -> Decimal {
        Decimal {
            value: BigDecimal::new(BigInt::from(1u32), -exp),
            precision: self.precision,
        }
    }

    pub fn zero(&self) -> Decimal {
        self.int(0)
    }

    pub fn one(&self) -> Decimal {
        self.int(1)
    }
}

/// Rewrites a validated literal into the plain `int.frac` / `e` form the
/// decimal parser expects. Returns `None` for anything that is not a
/// finite real-number literal.
fn canonical_literal(s: &str) -> Option<String> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }

    let mut out = String::with_capacity(s.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(if int.is_empty() { "0" } else { int });
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }

    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        // i64 exponents only; anything longer is out of range anyway
        if digits.is_empty() || digits.len() > 18 || !all_digits(digits) {
            return None;
        }
        out.push('e');
        out.push_str(exp);
    }

    Some(out)
}

/// Arbitrary-precision decimal value carrying its working precision.
#[derive(Debug, Clone)]
pub struct Decimal {
    value: BigDecimal,
    precision: u64,
}

impl Decimal {
    fn rounded(value: BigDecimal, precision: u64) -> Self {
        Self {
            value: round_significant(value, precision),
            precision,
        }
    }

    fn exact(&self, value: BigDecimal) -> Self {
        Self {
            value,
            precision: self.precision,
        }
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.value.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    pub fn abs(&self) -> Self {
        self.exact(self.value.abs())
    }

    /// `self / rhs`, correctly rounded to the working precision.
    pub fn checked_div(&self, rhs: &Decimal) -> CalcResult<Decimal> {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero("decimal division".into()));
        }
        let precision = self.precision.max(rhs.precision);
        Ok(Self {
            value: divide(&self.value, &rhs.value, precision),
            precision,
        })
    }

    /// `1 / self`.
    pub fn recip(&self) -> CalcResult<Decimal> {
        self.exact(BigDecimal::from(1)).checked_div(self)
    }

    /// Truncating integer quotient and remainder, both exact.
    ///
    /// The quotient rounds toward zero; the remainder has the sign of `self`
    /// and satisfies `self == q * rhs + r`.
    pub fn div_rem(&self, rhs: &Decimal) -> CalcResult<(Decimal, Decimal)> {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero("integer division".into()));
        }
        let (a, sa) = self.value.as_bigint_and_exponent();
        let (b, sb) = rhs.value.as_bigint_and_exponent();
        let scale = sa.max(sb);
        let a = a * pow10((scale - sa) as u64);
        let b = b * pow10((scale - sb) as u64);
        let (q, r) = a.div_rem(&b);

        Ok((
            self.exact(BigDecimal::new(q, 0)),
            self.exact(BigDecimal::new(r, scale)),
        ))
    }

    /// Square root, correctly rounded. Negative input is a domain error.
    pub fn sqrt(&self) -> CalcResult<Decimal> {
        if self.is_negative() {
            return Err(CalcError::Domain(format!(
                "square root of negative value {}",
                self.to_fixed(10)
            )));
        }
        Ok(self.exact(square_root(&self.value, self.precision)))
    }

    /// Whether `|self| >= 10^exp`.
    pub fn abs_at_least_pow10(&self, exp: i64) -> bool {
        self.value.abs() >= BigDecimal::new(BigInt::from(1u32), -exp)
    }

    /// `self * 10^exp`, exact.
    pub fn scale_pow10(&self, exp: i64) -> Decimal {
        let (mantissa, scale) = self.value.as_bigint_and_exponent();
        self.exact(BigDecimal::new(mantissa, scale - exp))
    }

    /// Fixed-point rendering with exactly `frac_digits` fractional digits,
    /// rounding half to even.
    pub fn to_fixed(&self, frac_digits: u64) -> String {
        let (mantissa, scale) = self.value.as_bigint_and_exponent();
        let frac = frac_digits as i64;
        let scaled = if scale > frac {
            shift_round(&mantissa, (scale - frac) as u64)
        } else {
            mantissa * pow10((frac - scale) as u64)
        };

        let frac = frac_digits as usize;
        let mut digits = scaled.magnitude().to_str_radix(10);
        if digits.len() <= frac {
            digits.insert_str(0, &"0".repeat(frac + 1 - digits.len()));
        }
        let split = digits.len() - frac;

        let mut out = String::with_capacity(digits.len() + 2);
        if scaled.is_negative() {
            out.push('-');
        }
        out.push_str(&digits[..split]);
        if frac > 0 {
            out.push('.');
            out.push_str(&digits[split..]);
        }
        out
    }

    /// Nearest `f64`, for plotting only.
    pub fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }
}

impl fmt::Display for Decimal {
    /// Exact plain rendering, never scientific.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, scale) = self.value.as_bigint_and_exponent();
        f.write_str(&self.to_fixed(scale.max(0) as u64))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

macro_rules! rounded_binop {
    ($imp:ident, $method:ident, $op:tt) => {
        impl $imp<&Decimal> for &Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &Decimal) -> Decimal {
                let precision = self.precision.max(rhs.precision);
                Decimal::rounded(&self.value $op &rhs.value, precision)
            }
        }

        impl $imp<&Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl $imp for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }
    };
}

rounded_binop!(Add, add, +);
rounded_binop!(Sub, sub, -);
rounded_binop!(Mul, mul, *);

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            value: -self.value,
            precision: self.precision,
        }
    }
}

fn pow10(exp: u64) -> BigInt {
    Pow::pow(BigInt::from(10u32), exp)
}

fn digit_count(n: &BigInt) -> u64 {
    if n.is_zero() {
        1
    } else {
        n.magnitude().to_str_radix(10).len() as u64
    }
}

/// `n / 10^drop`, rounded half to even.
fn shift_round(n: &BigInt, drop: u64) -> BigInt {
    let divisor = pow10(drop);
    let (q, r) = n.div_rem(&divisor);
    let twice = r.abs() * 2u32;
    match twice.cmp(&divisor) {
        Ordering::Less => q,
        Ordering::Greater => q + n.signum(),
        Ordering::Equal if q.is_odd() => q + n.signum(),
        Ordering::Equal => q,
    }
}

fn round_significant(value: BigDecimal, precision: u64) -> BigDecimal {
    let (mantissa, scale) = value.into_bigint_and_exponent();
    let digits = digit_count(&mantissa);
    if digits <= precision {
        return BigDecimal::new(mantissa, scale);
    }
    let drop = digits - precision;
    BigDecimal::new(shift_round(&mantissa, drop), scale - drop as i64)
}

fn strip_trailing_zeros(mut mantissa: BigInt, mut scale: i64) -> BigDecimal {
    let ten = BigInt::from(10u32);
    while !mantissa.is_zero() {
        let (q, r) = mantissa.div_rem(&ten);
        if !r.is_zero() {
            break;
        }
        mantissa = q;
        scale -= 1;
    }
    BigDecimal::new(mantissa, scale)
}

fn divide(lhs: &BigDecimal, rhs: &BigDecimal, precision: u64) -> BigDecimal {
    let (a, sa) = lhs.as_bigint_and_exponent();
    let (b, sb) = rhs.as_bigint_and_exponent();
    if a.is_zero() {
        return BigDecimal::zero();
    }

    let wanted = precision + GUARD_DIGITS;
    let shift = (wanted + digit_count(&b)).saturating_sub(digit_count(&a));
    let (q, r) = (a * pow10(shift)).div_rem(&b);
    let scale = sa - sb + shift as i64;

    if r.is_zero() {
        return round_significant(strip_trailing_zeros(q, scale), precision);
    }
    // sticky digit: a truncated tail must never look like an exact tie
    let sign = q.signum();
    round_significant(BigDecimal::new(q * 10u32 + sign, scale + 1), precision)
}

fn square_root(value: &BigDecimal, precision: u64) -> BigDecimal {
    let (m, s) = value.as_bigint_and_exponent();
    if m.is_zero() {
        return BigDecimal::zero();
    }

    let wanted = 2 * (precision + GUARD_DIGITS);
    let mut shift = wanted.saturating_sub(digit_count(&m));
    if (s + shift as i64) % 2 != 0 {
        shift += 1;
    }
    let n = m * pow10(shift);
    let root = n.sqrt();
    let scale = (s + shift as i64) / 2;

    if &root * &root == n {
        return round_significant(strip_trailing_zeros(root, scale), precision);
    }
    round_significant(BigDecimal::new(root * 10u32 + 1u32, scale + 1), precision)
}
