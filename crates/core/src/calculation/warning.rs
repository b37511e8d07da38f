//! Graded safety warnings emitted by the calculation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a warning. Ordered so `Danger` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    /// Near a limit
    Caution,
    /// Over a limit that matters later in the flight (landing)
    Warning,
    /// Over a takeoff limit or a nonsensical input
    Danger,
}

impl WarningLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningLevel::Caution => "caution",
            WarningLevel::Warning => "warning",
            WarningLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable machine-readable warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    NegativeWeight,
    StationOverweight,
    NegativeFuel,
    FuelOvercapacity,
    OverMaxGross,
    NearMaxGross,
    OverMaxRamp,
    OverMaxLanding,
    CgOutOfEnvelope,
    CgNearLimit,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::NegativeWeight => "NEGATIVE_WEIGHT",
            WarningCode::StationOverweight => "STATION_OVERWEIGHT",
            WarningCode::NegativeFuel => "NEGATIVE_FUEL",
            WarningCode::FuelOvercapacity => "FUEL_OVERCAPACITY",
            WarningCode::OverMaxGross => "OVER_MAX_GROSS",
            WarningCode::NearMaxGross => "NEAR_MAX_GROSS",
            WarningCode::OverMaxRamp => "OVER_MAX_RAMP",
            WarningCode::OverMaxLanding => "OVER_MAX_LANDING",
            WarningCode::CgOutOfEnvelope => "CG_OUT_OF_ENVELOPE",
            WarningCode::CgNearLimit => "CG_NEAR_LIMIT",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regulation cited on takeoff weight and CG violations
pub const PREFLIGHT_ACTION_REF: &str = "FAR 91.103";

/// One advisory produced by a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub level: WarningLevel,
    pub code: WarningCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulatory_ref: Option<String>,
}

impl Warning {
    pub(crate) fn new(level: WarningLevel, code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            detail: None,
            regulatory_ref: None,
        }
    }

    pub(crate) fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn regulatory_ref(mut self, reference: &str) -> Self {
        self.regulatory_ref = Some(reference.to_owned());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.code, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        if let Some(reference) = &self.regulatory_ref {
            write!(f, " [{reference}]")?;
        }
        Ok(())
    }
}
