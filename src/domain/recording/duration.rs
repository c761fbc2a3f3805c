//! Clip duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default safety limit for a single capture (5 minutes)
pub const DEFAULT_MAX_DURATION_SECS: u64 = 300;

/// A span of time measured in whole milliseconds.
///
/// Used for clip lengths, playback positions and recording limits.
/// Parses the compact `30s` / `5m` / `1m30s` form used on the command line
/// and in the config file; displays as `"{m}m {s}s"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    millis: u64,
}

impl Duration {
    /// Zero-length duration
    pub const ZERO: Self = Self { millis: 0 };

    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    /// Default recording safety limit
    pub const fn default_max_duration() -> Self {
        Self::from_secs(DEFAULT_MAX_DURATION_SECS)
    }

    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    pub const fn as_secs(&self) -> u64 {
        self.millis / 1000
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.millis)
    }

    /// Restrict to `[0, upper]`
    pub fn clamp_to(self, upper: Duration) -> Self {
        Self {
            millis: self.millis.min(upper.millis),
        }
    }

    /// Compact form accepted by `FromStr` (`90s` -> `1m30s`)
    pub fn to_compact(&self) -> String {
        let minutes = self.as_secs() / 60;
        let seconds = self.as_secs() % 60;
        match (minutes, seconds) {
            (0, s) => format!("{}s", s),
            (m, 0) => format!("{}m", m),
            (m, s) => format!("{}m{}s", m, s),
        }
    }
}

impl From<StdDuration> for Duration {
    fn from(d: StdDuration) -> Self {
        Self::from_millis(d.as_millis() as u64)
    }
}

/// Read one `<digits><unit>` component off the front of `rest`.
fn take_component(rest: &str, unit: char) -> Option<(u64, &str)> {
    let (digits, tail) = rest.split_once(unit)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, tail))
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_ascii_lowercase();

        let (minutes, rest) = match take_component(&input, 'm') {
            Some((m, tail)) => (m, tail),
            None => (0, input.as_str()),
        };
        let (seconds, rest) = if rest.is_empty() {
            if rest.len() == input.len() {
                return Err(err());
            }
            (0, rest)
        } else {
            take_component(rest, 's').ok_or_else(err)?
        };

        if !rest.is_empty() {
            return Err(err());
        }

        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .and_then(|s| s.checked_mul(1000))
            .ok_or_else(err)?;
        if total == 0 {
            return Err(err());
        }
        Ok(Self::from_millis(total))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.millis / 60_000;
        let seconds = (self.millis % 60_000) / 1000;
        write!(f, "{}m {}s", minutes, seconds)
    }
}
