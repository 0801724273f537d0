//! Fixed-point decimal values.

use std::fmt;
use std::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::Error;

/// Largest precision a decimal128 column can carry.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// A decimal number as a sign/digits/scale triple.
///
/// The value is `(-1)^negative * digits * 10^-scale`. Protocols send decimals
/// as text (`-123.450`), which parses to `negative = true, digits = 123450,
/// scale = 3`. Equality is structural: `1.50` and `1.5` are different triples.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Decimal {
    negative: bool,
    digits: u128,
    scale: u8,
}

impl Decimal {
    /// Create a decimal from its parts. Negative zero is normalized to zero.
    pub fn new(negative: bool, digits: u128, scale: u8) -> Self {
        Self {
            negative: negative && digits != 0,
            digits,
            scale,
        }
    }

    /// Create a decimal from a signed mantissa at the given scale.
    pub fn from_i128(mantissa: i128, scale: u8) -> Self {
        Self::new(mantissa < 0, mantissa.unsigned_abs(), scale)
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Unsigned digits without the decimal point.
    pub fn digits(&self) -> u128 {
        self.digits
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Number of significant digits in `digits` (zero counts as one).
    pub fn precision(&self) -> u8 {
        let mut n = self.digits;
        let mut count = 1u8;
        while n >= 10 {
            n /= 10;
            count += 1;
        }
        count
    }

    /// Signed mantissa, if it fits in an `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = i128::try_from(self.digits).ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// Re-express the value at another scale without losing information.
    ///
    /// Returns `None` when scaling up overflows, or when scaling down would
    /// drop non-zero fractional digits.
    pub fn rescale(&self, scale: u8) -> Option<Decimal> {
        let digits = if scale >= self.scale {
            let factor = 10u128.checked_pow(u32::from(scale - self.scale))?;
            self.digits.checked_mul(factor)?
        } else {
            let divisor = 10u128.checked_pow(u32::from(self.scale - scale))?;
            if self.digits % divisor != 0 {
                return None;
            }
            self.digits / divisor
        };
        Some(Decimal::new(self.negative, digits, scale))
    }

    /// The integral value, if there are no non-zero fractional digits.
    pub fn to_integer(&self) -> Option<i128> {
        self.rescale(0)?.to_i128()
    }

    /// Approximate the value as a float.
    pub fn to_f64(&self) -> f64 {
        // Parsing the rendered text avoids compounding rounding from division.
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal::from_i128(i128::from(v), 0)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::InvalidDecimal(s.to_string()));
        }

        let scale = u8::try_from(frac_part.len())
            .map_err(|_| Error::InvalidDecimal(format!("scale too large: {}", s)))?;

        let mut digits: u128 = 0;
        for c in int_part.bytes().chain(frac_part.bytes()) {
            if !c.is_ascii_digit() {
                return Err(Error::InvalidDecimal(s.to_string()));
            }
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add(u128::from(c - b'0')))
                .ok_or_else(|| Error::InvalidDecimal(format!("too many digits: {}", s)))?;
        }

        Ok(Decimal::new(negative, digits, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = usize::from(self.scale);
        let mut text = self.digits.to_string();
        if text.len() <= scale {
            text = format!("{}{}", "0".repeat(scale + 1 - text.len()), text);
        }
        if self.negative {
            f.write_str("-")?;
        }
        if scale == 0 {
            f.write_str(&text)
        } else {
            let (int_part, frac_part) = text.split_at(text.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        }
    }
}
