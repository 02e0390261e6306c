use crux_core::Command;

use crate::events::{Event, StatusEvent};
use crate::http_get;
use crate::http_helpers::{build_url, COORDINATES_PATH};
use crate::model::Model;
use crate::types::StatusSnapshot;
use crate::{Effect, TickerCmd};

/// Wall-clock interval between two status polls
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Handle status view lifecycle and polling events
pub fn handle(event: StatusEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        StatusEvent::Mount => {
            if model.status_mounted {
                return Command::done();
            }
            model.status_mounted = true;
            model.poll_generation = model.poll_generation.wrapping_add(1);
            model.status = StatusSnapshot::Waiting;

            Command::all([
                crux_core::render::render(),
                TickerCmd::start(POLL_INTERVAL_MS)
                    .build()
                    .then_send(|output| Event::Status(StatusEvent::TickerResponse(output))),
            ])
        }

        StatusEvent::Unmount => {
            if !model.status_mounted {
                return Command::done();
            }
            model.status_mounted = false;

            Command::all([
                crux_core::render::render(),
                TickerCmd::stop()
                    .build()
                    .then_send(|output| Event::Status(StatusEvent::TickerResponse(output))),
            ])
        }

        StatusEvent::PollTick => {
            // a tick racing the teardown must not start a new request
            if !model.status_mounted {
                return Command::done();
            }

            let generation = model.poll_generation;
            http_get!(
                Status,
                StatusEvent,
                &build_url(COORDINATES_PATH),
                CoordinatesResponse(generation),
                serde_json::Value
            )
        }

        StatusEvent::TickerResponse(output) => {
            log::debug!("ticker: {output:?}");
            Command::done()
        }

        StatusEvent::CoordinatesResponse(generation, result) => {
            // responses resolving after teardown are dropped, even across a remount
            if !model.status_mounted || generation != model.poll_generation {
                log::debug!("discarding stale coordinates response");
                return Command::done();
            }

            // last response to resolve wins, regardless of request order
            model.status = match result {
                Ok(value) => StatusSnapshot::Data(value),
                Err(e) => {
                    log::warn!("failed to fetch coordinates: {e}");
                    StatusSnapshot::Error
                }
            };
            crux_core::render::render()
        }
    }
}
