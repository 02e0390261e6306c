use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Address input
    pub controller_address: String,

    // Command dispatch state
    /// True while a `dc_on` request is in flight
    pub dc_loading: bool,

    // Status view state
    pub status_mounted: bool,
    /// Bumped on every mount, poll results from older mounts are dropped
    pub poll_generation: u64,
    pub status: StatusSnapshot,

    // UI state
    pub notice: Option<String>,
}

impl Model {
    pub fn has_address(&self) -> bool {
        !self.controller_address.is_empty()
    }

    pub fn start_dc_loading(&mut self) {
        self.dc_loading = true;
    }

    pub fn stop_dc_loading(&mut self) {
        self.dc_loading = false;
    }

    /// Show a blocking notice and return the effect that displays it
    pub fn notify(
        &mut self,
        message: &str,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.notice = Some(message.to_string());
        crux_core::Command::all([
            crux_core::render::render(),
            crate::NoticeCmd::alert(message).build().then_send(|output| {
                crate::events::Event::Ui(crate::events::UiEvent::NoticeResponse(output))
            }),
        ])
    }
}

/// What the shell renders
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub controller_address: String,
    pub address_placeholder: String,
    pub dc_button_label: String,
    pub dc_button_disabled: bool,
    pub status_visible: bool,
    pub status_text: String,
    pub notice: Option<String>,
}

impl ViewModel {
    pub const ADDRESS_PLACEHOLDER: &'static str = "ESP32 IP (e.g. 192.168.1.100)";
    pub const DC_LABEL_IDLE: &'static str = "DC Motor ON";
    pub const DC_LABEL_LOADING: &'static str = "Turning ON...";
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let dc_button_label = if model.dc_loading {
            Self::DC_LABEL_LOADING
        } else {
            Self::DC_LABEL_IDLE
        };

        Self {
            controller_address: model.controller_address.clone(),
            address_placeholder: Self::ADDRESS_PLACEHOLDER.to_string(),
            dc_button_label: dc_button_label.to_string(),
            dc_button_disabled: model.dc_loading,
            status_visible: model.status_mounted,
            status_text: model.status.display_text(),
            notice: model.notice.clone(),
        }
    }
}
