pub mod commands;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod types;
pub mod update;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::{
        notice::{NoticeOperation, NoticeOutput},
        ticker::{TickerOperation, TickerOutput},
    },
    events::Event,
    http_helpers::{
        build_url, controller_url, is_response_success, parse_json_response,
        process_dispatch_response, process_json_response, BASE_URL,
    },
    model::{Model, ViewModel},
    types::*,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Notice(NoticeOperation),
    Ticker(TickerOperation),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;
pub type NoticeCmd = crate::commands::notice::Notice<Effect, Event>;
pub type TickerCmd = crate::commands::ticker::Ticker<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::from(model)
    }
}
