use serde::{Deserialize, Serialize};

// Motor commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MotorCommand {
    DcOn,
    StepperLeft,
    StepperRight,
    Stop,
}

impl MotorCommand {
    /// Identifier sent verbatim in the `command` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DcOn => "dc_on",
            Self::StepperLeft => "stepper_left",
            Self::StepperRight => "stepper_right",
            Self::Stop => "stop",
        }
    }
}

impl std::fmt::Display for MotorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepperDirection {
    Left,
    Right,
}

impl StepperDirection {
    pub fn command(self) -> MotorCommand {
        match self {
            Self::Left => MotorCommand::StepperLeft,
            Self::Right => MotorCommand::StepperRight,
        }
    }
}

// Request types for API calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MotorRequest {
    pub command: MotorCommand,
}

// Status snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusSnapshot {
    #[default]
    Waiting,
    Data(serde_json::Value),
    Error,
}

impl StatusSnapshot {
    pub const WAITING_TEXT: &'static str = "Waiting for data...";
    pub const ERROR_TEXT: &'static str = "Error fetching data";

    /// Text shown in the status terminal
    pub fn display_text(&self) -> String {
        match self {
            Self::Waiting => Self::WAITING_TEXT.to_string(),
            Self::Data(value) => serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| Self::ERROR_TEXT.to_string()),
            Self::Error => Self::ERROR_TEXT.to_string(),
        }
    }
}

// Coordinator status, as published on `/coordinates`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonCoordinates {
    pub center_x: i32,
    pub center_y: i32,
    pub bbox_x1: i32,
    pub bbox_y1: i32,
    pub bbox_x2: i32,
    pub bbox_y2: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
    pub class_id: u32,
    pub normalized_x: f64,
    pub normalized_y: f64,
    pub distance_factor: f64,
    pub angle_from_center: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackingStatus {
    pub person_detected: bool,
    pub group_mode_active: bool,
    pub coordinates: Option<PersonCoordinates>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_command_serializes_to_wire_identifier() {
        for command in [
            MotorCommand::DcOn,
            MotorCommand::StepperLeft,
            MotorCommand::StepperRight,
            MotorCommand::Stop,
        ] {
            let json = serde_json::to_string(&MotorRequest { command }).unwrap();
            assert_eq!(json, format!(r#"{{"command":"{}"}}"#, command.as_str()));
        }
    }

    #[test]
    fn snapshot_text_is_pretty_printed() {
        let snapshot = StatusSnapshot::Data(serde_json::json!({"x": 1, "y": 2}));
        assert_eq!(snapshot.display_text(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
    }

    #[test]
    fn tracking_status_without_person_has_null_coordinates() {
        let json = serde_json::to_value(TrackingStatus::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "person_detected": false,
                "group_mode_active": false,
                "coordinates": null
            })
        );
    }
}
