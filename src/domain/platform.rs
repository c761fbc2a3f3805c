//! Host platform family

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidPlatformError;

/// Platform families with divergent file handling.
///
/// The family decides, once at startup, which copy and viewer adapters the
/// file controller is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    Desktop,
    Android,
    Ios,
}

impl PlatformFamily {
    pub const ALL: [PlatformFamily; 3] = [Self::Desktop, Self::Android, Self::Ios];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// Picked resources must be duplicated into app-private storage before
    /// they can be referenced later.
    pub const fn requires_private_copy(&self) -> bool {
        match self {
            Self::Desktop | Self::Android => true,
            Self::Ios => false,
        }
    }

    /// A system resolver is available to hand files to.
    pub const fn supports_system_viewer(&self) -> bool {
        match self {
            Self::Desktop | Self::Android => true,
            Self::Ios => false,
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformFamily {
    type Err = InvalidPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(InvalidPlatformError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Android".parse::<PlatformFamily>().unwrap(), PlatformFamily::Android);
        assert_eq!(" ios ".parse::<PlatformFamily>().unwrap(), PlatformFamily::Ios);
        assert!("windows-phone".parse::<PlatformFamily>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for family in PlatformFamily::ALL {
            assert_eq!(family.to_string().parse::<PlatformFamily>().unwrap(), family);
        }
    }

    #[test]
    fn ios_neither_copies_nor_views() {
        assert!(!PlatformFamily::Ios.requires_private_copy());
        assert!(!PlatformFamily::Ios.supports_system_viewer());
        assert!(PlatformFamily::Android.requires_private_copy());
        assert!(PlatformFamily::Android.supports_system_viewer());
    }
}
