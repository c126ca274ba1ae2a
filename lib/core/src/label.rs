use serde::{Deserialize, Serialize};

/// Binary anomaly label. No "unknown" state: every row is one or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Normal,
    Anomaly,
}

impl Label {
    #[inline]
    #[must_use]
    pub fn is_anomaly(self) -> bool {
        matches!(self, Label::Anomaly)
    }

    /// Convert from the -1 (anomaly) / +1 (normal) sign convention used by
    /// most outlier scorers. Any non-negative value maps to normal.
    #[inline]
    #[must_use]
    pub fn from_sign(sign: i8) -> Self {
        if sign < 0 {
            Label::Anomaly
        } else {
            Label::Normal
        }
    }

    /// Convert to the -1 / +1 sign convention.
    #[inline]
    #[must_use]
    pub fn to_sign(self) -> i8 {
        match self {
            Label::Anomaly => -1,
            Label::Normal => 1,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Normal => write!(f, "normal"),
            Label::Anomaly => write!(f, "anomaly"),
        }
    }
}
