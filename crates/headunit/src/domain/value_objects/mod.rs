//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod call_outcome;
mod call_status;
mod device_kind;

pub use call_outcome::*;
pub use call_status::*;
pub use device_kind::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_status_parse_is_case_insensitive() {
        assert_eq!("ACTIVE".parse::<CallStatus>(), Ok(CallStatus::Active));
        assert_eq!("held".parse::<CallStatus>(), Ok(CallStatus::Held));
        assert!("ringing".parse::<CallStatus>().is_err());
    }

    #[test]
    fn test_only_live_calls_are_endable() {
        assert!(CallStatus::Incoming.is_endable());
        assert!(CallStatus::Outgoing.is_endable());
        assert!(CallStatus::Active.is_endable());
        assert!(!CallStatus::Idle.is_endable());
        assert!(!CallStatus::Held.is_endable());
    }

    #[test]
    fn test_device_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DeviceKind::AudioAccessory).unwrap();
        assert_eq!(json, "\"audio_accessory\"");
        assert_eq!(DeviceKind::AudioAccessory.to_string(), "audio_accessory");
    }

    #[test]
    fn test_direction_maps_to_outcome() {
        assert_eq!(CallOutcome::from(CallDirection::Outgoing), CallOutcome::Outgoing);
        assert_eq!(CallOutcome::from(CallDirection::Incoming), CallOutcome::Incoming);
    }
}
