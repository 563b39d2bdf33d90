use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DisplayConfigError, Result};

/// Highest refresh rate accepted from an operator. A sanity ceiling, not a hardware limit.
pub const MAX_HZ: f64 = 500.0;

/// `from_hz` keeps this many decimal digits of the requested rate.
const HZ_SCALE: u32 = 100;

/// An exact frequency in Hz, `numerator / denominator`.
///
/// Values read back from the OS are not necessarily reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RationalRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RationalRate {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert a decimal Hz value into a reduced fraction with two digits of precision.
    pub fn from_hz(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 || hz > MAX_HZ {
            return Err(DisplayConfigError::InvalidRate {
                input: hz.to_string(),
            });
        }

        // hz <= MAX_HZ keeps this far below u32::MAX
        let numerator = (hz * f64::from(HZ_SCALE)).round() as u32;

        Ok(Self::new(numerator, HZ_SCALE).reduced())
    }

    /// Returns 0.0 for a zero denominator, which the OS uses for "unspecified".
    pub fn to_hz(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }

        f64::from(self.numerator) / f64::from(self.denominator)
    }

    pub fn reduced(self) -> Self {
        let divisor = gcd(self.numerator, self.denominator);
        if divisor == 0 {
            return self;
        }

        Self::new(self.numerator / divisor, self.denominator / divisor)
    }

    /// e.g. `59.89 Hz (5989/100)`
    pub fn to_display_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RationalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} Hz ({}/{})",
            self.to_hz(),
            self.numerator,
            self.denominator
        )
    }
}

/// Euclidean algorithm. gcd(n, 0) = n and gcd(0, n) = n.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }

    a
}

/// Parse an operator-supplied Hz value.
///
/// Accepts `59.89`, and `59,89` for locales that write a decimal comma.
pub fn parse_hz(text: &str) -> Result<f64> {
    let text = text.trim();
    let invalid = || DisplayConfigError::InvalidRate {
        input: text.to_string(),
    };

    let hz = match text.parse::<f64>() {
        Ok(hz) => hz,
        Err(_) if text.matches(',').count() == 1 && !text.contains('.') => {
            text.replace(',', ".").parse::<f64>().map_err(|_| invalid())?
        }
        Err(_) => return Err(invalid()),
    };

    Ok(hz)
}
