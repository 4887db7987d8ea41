//! Structured package version and its wire format.
//!
//! The formatted string is embedded into every widget as
//! `_model_module_version` / `_view_module_version`, so the front-end can
//! resolve a compatible implementation. `major.minor.patch` is followed by a
//! stage suffix and serial unless the stage is final.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Version tuple of this crate and of the front-end module it pairs with.
pub const VERSION_INFO: VersionInfo = VersionInfo::new(2, 1, 0, ReleaseStage::Final, 0);

/// Jupyter widget message protocol version announced in `comm_open` metadata.
pub const PROTOCOL_VERSION: &str = "2.1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStage {
    Alpha,
    Beta,
    Candidate,
    Final,
}

impl ReleaseStage {
    /// Suffix placed between the patch number and the serial.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Candidate => "rc",
            Self::Final => "",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Candidate => "candidate",
            Self::Final => "final",
        }
    }
}

impl FromStr for ReleaseStage {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "candidate" => Ok(Self::Candidate),
            "final" => Ok(Self::Final),
            other => Err(WidgetError::InvalidVersion(format!(
                "unknown release stage `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub stage: ReleaseStage,
    pub serial: u32,
}

impl VersionInfo {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32, stage: ReleaseStage, serial: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            stage,
            serial,
        }
    }

    /// Builds a version from a `(major, minor, patch, stage-name, serial)` tuple.
    pub fn from_parts(
        major: u32,
        minor: u32,
        patch: u32,
        stage: &str,
        serial: u32,
    ) -> WidgetResult<Self> {
        Ok(Self::new(major, minor, patch, stage.parse()?, serial))
    }

    /// Parses the formatted string produced by `Display`.
    pub fn parse(input: &str) -> WidgetResult<Self> {
        let invalid = || WidgetError::InvalidVersion(format!("malformed version `{input}`"));

        let mut parts = input.splitn(3, '.');
        let major = parse_number(parts.next().ok_or_else(invalid)?).ok_or_else(invalid)?;
        let minor = parse_number(parts.next().ok_or_else(invalid)?).ok_or_else(invalid)?;
        let tail = parts.next().ok_or_else(invalid)?;

        let digits_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let patch = parse_number(&tail[..digits_end]).ok_or_else(invalid)?;
        let rest = &tail[digits_end..];
        if rest.is_empty() {
            return Ok(Self::new(major, minor, patch, ReleaseStage::Final, 0));
        }

        let serial_start = rest
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let stage = match &rest[..serial_start] {
            "a" => ReleaseStage::Alpha,
            "b" => ReleaseStage::Beta,
            "rc" => ReleaseStage::Candidate,
            _ => return Err(invalid()),
        };
        let serial = parse_number(&rest[serial_start..]).ok_or_else(invalid)?;
        Ok(Self::new(major, minor, patch, stage, serial))
    }

    /// Whether a peer announcing `other` can drive widgets built with `self`.
    ///
    /// Follows caret semantics: same major, and same minor while major is 0.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        if self.major != other.major {
            return false;
        }
        self.major != 0 || self.minor == other.minor
    }
}

fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.stage != ReleaseStage::Final {
            write!(f, "{}{}", self.stage.suffix(), self.serial)?;
        }
        Ok(())
    }
}

impl FromStr for VersionInfo {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formatted version of this crate, as sent to the front-end.
#[must_use]
pub fn package_version() -> String {
    VERSION_INFO.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_stage_has_no_suffix() {
        assert_eq!(VERSION_INFO.to_string(), "2.1.0");
    }

    #[test]
    fn crate_version_tracks_package_manifest() {
        assert_eq!(package_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn parse_rejects_unknown_stage_suffix() {
        assert!(VersionInfo::parse("2.1.0x1").is_err());
        assert!(VersionInfo::parse("2.1").is_err());
        assert!(VersionInfo::parse("2.1.0rc").is_err());
    }
}
