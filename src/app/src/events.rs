use serde::{Deserialize, Serialize};

use crate::commands::{notice::NoticeOutput, ticker::TickerOutput};
use crate::types::*;

/// Motor control events (address input and command buttons)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    AddressChanged(String),
    DcOn,
    /// Mouse-down or touch-start on a stepper button
    StepperPressed(StepperDirection),
    /// Mouse-up or touch-end on a stepper button
    StepperReleased(StepperDirection),

    #[serde(skip)]
    CommandResponse {
        command: MotorCommand,
        result: Result<(), String>,
    },
}

/// Status view lifecycle and polling events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Mount,
    Unmount,
    PollTick,

    #[serde(skip)]
    TickerResponse(TickerOutput),
    /// Poll result tagged with the poll generation it was issued in
    #[serde(skip)]
    CoordinatesResponse(u64, Result<serde_json::Value, String>),
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    DismissNotice,

    #[serde(skip)]
    NoticeResponse(NoticeOutput),
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Control(ControlEvent),
    Status(StatusEvent),
    Ui(UiEvent),
}
