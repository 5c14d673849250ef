//! Byte-count scaling utilities.
//!
//! This module converts raw byte counts into a value expressed in KB, MB or GB
//! (binary multiples), rounded to two decimal places. The conversion is done
//! with integer arithmetic so that the same byte count always produces the
//! same scaled value.

use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

/// Number of bytes in one kibibyte.
pub const KIB: u64 = 1_024;

/// Number of bytes in one mebibyte.
pub const MIB: u64 = KIB * 1_024;

/// Number of bytes in one gibibyte.
pub const GIB: u64 = MIB * 1_024;

/// Unit a byte count has been scaled into.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
pub enum ScaleUnit {
    /// Kilobytes (1024 bytes)
    #[serde(rename = "KB")]
    Kb,

    /// Megabytes (1024² bytes)
    #[serde(rename = "MB")]
    Mb,

    /// Gigabytes (1024³ bytes)
    #[serde(rename = "GB")]
    Gb,
}

impl ScaleUnit {
    /// Number of bytes one unit stands for.
    #[must_use]
    pub const fn divisor(self) -> u64 {
        match self {
            Self::Kb => KIB,
            Self::Mb => MIB,
            Self::Gb => GIB,
        }
    }

    /// Short label used in human-readable output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kb => "KB",
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }
}

impl Display for ScaleUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// A byte count expressed in a [`ScaleUnit`] with two decimal places.
///
/// The value is stored as a whole number of hundredths of the unit, so
/// `4.20 MB` is held as `420` with [`ScaleUnit::Mb`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ScaledSize {
    hundredths: u64,
    unit: ScaleUnit,
}

impl ScaledSize {
    /// The unit chosen for this size.
    #[must_use]
    pub const fn unit(&self) -> ScaleUnit {
        self.unit
    }

    /// The scaled value in hundredths of [`Self::unit`].
    #[must_use]
    pub const fn hundredths(&self) -> u64 {
        self.hundredths
    }

    /// The scaled value as a floating point number (e.g. `4.2`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    /// The scaled value without its unit, always with two decimals (e.g. `"4.20"`).
    #[must_use]
    pub fn format_value(&self) -> String {
        format!("{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Display for ScaledSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} {}", self.format_value(), self.unit)
    }
}

/// Convert a byte count into a scaled size.
///
/// The unit is chosen with strict comparisons, evaluated in order:
///
/// - more than 1 GiB: **GB**
/// - more than 1 MiB: **MB**
/// - otherwise: **KB** (including 0)
///
/// A size of exactly 1 GiB is therefore reported as `1024.00 MB`, and
/// exactly 1 MiB as `1024.00 KB`.
///
/// The result is rounded to two decimal places, half up.
///
/// # Examples
///
/// ```
/// # use dirsize::utils::scale;
/// assert_eq!(scale(500).to_string(), "0.49 KB");
/// assert_eq!(scale(2 * 1024 * 1024).to_string(), "2.00 MB");
/// ```
#[must_use]
pub fn scale(bytes: u64) -> ScaledSize {
    let unit = if bytes > GIB {
        ScaleUnit::Gb
    } else if bytes > MIB {
        ScaleUnit::Mb
    } else {
        ScaleUnit::Kb
    };

    ScaledSize {
        hundredths: round_hundredths(bytes, unit.divisor()),
        unit,
    }
}

/// Divide `bytes` by `divisor`, returning the quotient in hundredths rounded half up.
fn round_hundredths(bytes: u64, divisor: u64) -> u64 {
    let divisor = u128::from(divisor);
    let scaled = (u128::from(bytes) * 100 + divisor / 2) / divisor;

    u64::try_from(scaled).unwrap_or(u64::MAX)
}
