use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VolumeUnit {
    Oz,
    Ml,
}

impl Default for VolumeUnit {
    fn default() -> Self {
        VolumeUnit::Oz
    }
}

impl VolumeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeUnit::Oz => "oz",
            VolumeUnit::Ml => "ml",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "oz" => Some(VolumeUnit::Oz),
            "ml" => Some(VolumeUnit::Ml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BreastSide {
    Left,
    Right,
}

impl BreastSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreastSide::Left => "left",
            BreastSide::Right => "right",
        }
    }
}

/// What the baby is being fed with during an interval.
///
/// Serialized with an inline `type` tag, e.g. `{"type":"bottle","amount":4.0,"unit":"oz"}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedingMode {
    Bottle { amount: f64, unit: VolumeUnit },
    Breast { side: BreastSide },
}

impl FeedingMode {
    pub fn bottle(amount: f64, unit: VolumeUnit) -> Self {
        FeedingMode::Bottle { amount, unit }
    }

    pub fn breast(side: BreastSide) -> Self {
        FeedingMode::Breast { side }
    }

    /// Bottle volume in `unit`, without rounding. Breast feeds carry no volume.
    pub fn volume_in(&self, unit: VolumeUnit) -> Option<f64> {
        match *self {
            FeedingMode::Bottle { amount, unit: from } => {
                Some(crate::units::convert_exact(amount, from, unit))
            }
            FeedingMode::Breast { .. } => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FeedingMode::Bottle { amount, unit } => format!("bottle {amount} {}", unit.as_str()),
            FeedingMode::Breast { side } => format!("breast {}", side.as_str()),
        }
    }
}
