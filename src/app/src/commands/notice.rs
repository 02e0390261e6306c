//! Notice command definitions.
//!
//! A notice is a blocking, user-visible message (a browser `alert()` in the web shell).
//! The shell resolves the request once the user has dismissed it.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform for notices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeOperation {
    Alert { message: String },
}

// The output from notice operations (shell tells us the user dismissed it)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeOutput {
    Acknowledged,
}

impl Operation for NoticeOperation {
    type Output = NoticeOutput;
}

/// Command-based notice API
pub struct Notice<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Notice<Effect, Event>
where
    Effect: Send + From<crux_core::Request<NoticeOperation>> + 'static,
    Event: Send + 'static,
{
    /// Show a blocking alert
    pub fn alert(message: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(NoticeOperation::Alert {
            message: message.into(),
        })
    }
}

/// Request builder for notice operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: NoticeOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<NoticeOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: NoticeOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = NoticeOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
