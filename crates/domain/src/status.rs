//! Arming and alarm statuses: the two singletons the status store owns.

use serde::{Deserialize, Serialize};

/// Arming mode chosen by the occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    /// Whether sensor activations can escalate the alarm.
    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }

    /// Human-readable label shown on the panel.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl std::fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disarmed => f.write_str("disarmed"),
            Self::ArmedHome => f.write_str("armed_home"),
            Self::ArmedAway => f.write_str("armed_away"),
        }
    }
}

impl std::str::FromStr for ArmingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disarmed" => Ok(Self::Disarmed),
            "armed_home" => Ok(Self::ArmedHome),
            "armed_away" => Ok(Self::ArmedAway),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Alarm level derived by the security service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Human-readable label shown on the panel.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl std::fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAlarm => f.write_str("no_alarm"),
            Self::PendingAlarm => f.write_str("pending_alarm"),
            Self::Alarm => f.write_str("alarm"),
        }
    }
}

/// A status string did not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}`")]
pub struct UnknownStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_armed_for_home_and_away() {
        assert!(ArmingStatus::ArmedHome.is_armed());
        assert!(ArmingStatus::ArmedAway.is_armed());
    }

    #[test]
    fn should_report_not_armed_when_disarmed() {
        assert!(!ArmingStatus::Disarmed.is_armed());
    }

    #[test]
    fn should_default_to_disarmed_and_no_alarm() {
        assert_eq!(ArmingStatus::default(), ArmingStatus::Disarmed);
        assert_eq!(AlarmStatus::default(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn should_parse_display_output_back() {
        for status in [
            ArmingStatus::Disarmed,
            ArmingStatus::ArmedHome,
            ArmingStatus::ArmedAway,
        ] {
            assert_eq!(status.to_string().parse::<ArmingStatus>(), Ok(status));
        }
    }

    #[test]
    fn should_reject_unknown_arming_status() {
        let result = "armed_sideways".parse::<ArmingStatus>();
        assert_eq!(result, Err(UnknownStatus("armed_sideways".to_string())));
    }

    #[test]
    fn should_serialize_as_snake_case() {
        let json = serde_json::to_string(&AlarmStatus::PendingAlarm).unwrap();
        assert_eq!(json, "\"pending_alarm\"");
        let parsed: ArmingStatus = serde_json::from_str("\"armed_away\"").unwrap();
        assert_eq!(parsed, ArmingStatus::ArmedAway);
    }
}
