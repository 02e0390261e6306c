//! Ticker command definitions.
//!
//! The shell owns the wall-clock timer. After `Start` it sends
//! `StatusEvent::PollTick` every `interval_ms` until it receives `Stop`.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TickerOperation {
    Start { interval_ms: u64 },
    Stop,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TickerOutput {
    Started,
    Stopped,
}

impl Operation for TickerOperation {
    type Output = TickerOutput;
}

/// Command-based ticker API
pub struct Ticker<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Ticker<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TickerOperation>> + 'static,
    Event: Send + 'static,
{
    /// Start the recurring timer
    pub fn start(interval_ms: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TickerOperation::Start { interval_ms })
    }

    /// Stop the recurring timer
    pub fn stop() -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TickerOperation::Stop)
    }
}

/// Request builder for ticker operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: TickerOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TickerOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: TickerOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = TickerOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
