use crux_core::Command;

use crate::controller_post;
use crate::events::{ControlEvent, Event};
use crate::http_helpers::{controller_url, MOTOR_PATH};
use crate::model::Model;
use crate::types::MotorCommand;
use crate::update_field;
use crate::Effect;

pub const ADDRESS_REQUIRED_NOTICE: &str = "Please enter ESP32 IP";
pub const COMMAND_FAILED_NOTICE: &str = "Failed to send command to ESP32";

/// Handle address input and motor command events
pub fn handle(event: ControlEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ControlEvent::AddressChanged(address) => update_field!(model.controller_address, address),

        ControlEvent::DcOn => {
            // the button is disabled while a request is in flight
            if model.dc_loading {
                log::debug!("dc_on ignored: request already in flight");
                return Command::done();
            }
            dispatch(MotorCommand::DcOn, model)
        }

        ControlEvent::StepperPressed(direction) => dispatch(direction.command(), model),

        ControlEvent::StepperReleased(direction) => {
            log::debug!("stepper {direction:?} released");
            dispatch(MotorCommand::Stop, model)
        }

        ControlEvent::CommandResponse { command, result } => {
            if command == MotorCommand::DcOn {
                model.stop_dc_loading();
            }

            match result {
                Ok(()) => {
                    log::debug!("{command} delivered");
                    crux_core::render::render()
                }
                Err(e) => {
                    log::error!("{command} failed: {e}");
                    model.notify(COMMAND_FAILED_NOTICE)
                }
            }
        }
    }
}

/// Send one command to the controller.
///
/// Every call is independent: no deduplication, no ordering against
/// requests that are still in flight.
pub fn dispatch(command: MotorCommand, model: &mut Model) -> Command<Effect, Event> {
    if !model.has_address() {
        return model.notify(ADDRESS_REQUIRED_NOTICE);
    }

    let url = match controller_url(&model.controller_address, MOTOR_PATH) {
        Ok(url) => url,
        Err(e) => {
            log::error!("{command} failed: {e}");
            return model.notify(COMMAND_FAILED_NOTICE);
        }
    };

    log::debug!("sending {command} to {url}");

    if command == MotorCommand::DcOn {
        model.start_dc_loading();
        Command::all([
            crux_core::render::render(),
            controller_post!(model, &url, command, "Motor command"),
        ])
    } else {
        controller_post!(model, &url, command, "Motor command")
    }
}
