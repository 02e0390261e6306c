pub mod control;
pub mod status;
mod ui;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Control(event) => control::handle(event, model),
        Event::Status(event) => status::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
