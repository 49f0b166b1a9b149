use std::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::EngineError;

/// Money amount represented as **integer paise**.
///
/// All monetary values in the engine (amounts, sums, bounds) are integer
/// paise to avoid floating-point drift; conversion to a decimal form happens
/// only at the display edge.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyPaise;
///
/// let amount = MoneyPaise::new(12_34);
/// assert_eq!(amount.paise(), 1234);
/// assert_eq!(amount.to_string(), "₹12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyPaise(i64);

impl MoneyPaise {
    pub const ZERO: MoneyPaise = MoneyPaise(0);

    /// Creates a new amount from integer paise.
    #[must_use]
    pub const fn new(paise: i64) -> Self {
        Self(paise)
    }

    /// Returns the raw value in paise.
    #[must_use]
    pub const fn paise(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns the amount as a plain decimal string ("123.45"), without the
    /// currency sign. This is the form written to CSV exports.
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for MoneyPaise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.to_decimal_string())
    }
}

impl From<i64> for MoneyPaise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyPaise> for i64 {
    fn from(value: MoneyPaise) -> Self {
        value.0
    }
}

impl Add for MoneyPaise {
    type Output = MoneyPaise;

    fn add(self, rhs: MoneyPaise) -> Self::Output {
        MoneyPaise(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyPaise {
    fn add_assign(&mut self, rhs: MoneyPaise) {
        self.0 += rhs.0;
    }
}

impl FromStr for MoneyPaise {
    type Err = EngineError;

    /// Parses a decimal string into paise.
    ///
    /// Accepts an optional leading `-` and at most 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Validation("invalid amount".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::Validation("empty amount".to_string()));
        }

        let (sign, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (-1i64, stripped),
            None => (1i64, trimmed),
        };

        let mut parts = rest.split('.');
        let rupees_str = parts.next().ok_or_else(invalid)?;
        let paise_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if rupees_str.is_empty() || !rupees_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let rupees: i64 = rupees_str.parse().map_err(|_| invalid())?;

        let paise: i64 = match paise_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::Validation("too many decimals".to_string()));
                    }
                }
            }
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|v| v.checked_add(paise))
            .ok_or_else(|| EngineError::Validation("amount too large".to_string()))?;

        Ok(MoneyPaise(sign * total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_inr() {
        assert_eq!(MoneyPaise::new(0).to_string(), "₹0.00");
        assert_eq!(MoneyPaise::new(1).to_string(), "₹0.01");
        assert_eq!(MoneyPaise::new(1050).to_string(), "₹10.50");
        assert_eq!(MoneyPaise::new(-1050).to_string(), "₹-10.50");
    }

    #[test]
    fn decimal_string_has_no_sign_prefix() {
        assert_eq!(MoneyPaise::new(15000).to_decimal_string(), "150.00");
        assert_eq!(MoneyPaise::new(5).to_decimal_string(), "0.05");
    }

    #[test]
    fn parse_accepts_plain_decimals() {
        assert_eq!("10".parse::<MoneyPaise>().unwrap().paise(), 1000);
        assert_eq!("10.5".parse::<MoneyPaise>().unwrap().paise(), 1050);
        assert_eq!("-0.01".parse::<MoneyPaise>().unwrap().paise(), -1);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<MoneyPaise>().is_err());
        assert!("abc".parse::<MoneyPaise>().is_err());
    }
}
