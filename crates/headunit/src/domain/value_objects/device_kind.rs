//! DeviceKind - Classification of paired Bluetooth devices

use serde::{Deserialize, Serialize};

/// Paired device classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    #[default]
    Phone,
    AudioAccessory,
    Other,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceKind::Phone => write!(f, "phone"),
            DeviceKind::AudioAccessory => write!(f, "audio_accessory"),
            DeviceKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phone" => Ok(DeviceKind::Phone),
            "audio_accessory" | "audio" => Ok(DeviceKind::AudioAccessory),
            "other" => Ok(DeviceKind::Other),
            _ => Err(format!("Unknown device kind: {}", s)),
        }
    }
}
