/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.controller_address, address)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.status_mounted, true;
///     model.notice, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    build_url, controller_url, is_response_success, parse_json_response,
    process_dispatch_response, process_json_response, BASE_URL,
};

/// Macro for HTTP GET requests expecting a JSON response.
/// Does not touch loading state. Requires domain parameters for event wrapping.
/// Leading response event fields can be passed in parentheses after the event name.
///
/// # Example
/// ```ignore
/// http_get!(Status, StatusEvent, &build_url("/coordinates"), CoordinatesResponse(generation), serde_json::Value)
/// ```
#[macro_export]
macro_rules! http_get {
    ($domain:ident, $domain_event:ident, $url:expr, $response_event:ident $(($($field:expr),* $(,)?))?, $response_type:ty) => {
        $crate::HttpCmd::get($url).build().then_send(move |result| {
            let event_result: Result<$response_type, String> =
                $crate::process_json_response(stringify!($response_event), result);
            $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                $($($field,)*)?
                event_result,
            ))
        })
    };
}

/// Macro for JSON POST requests to the motor controller.
/// Any HTTP response counts as success, only transport errors fail.
///
/// # Example
/// ```ignore
/// controller_post!(model, &url, command, "Send dc_on")
/// ```
#[macro_export]
macro_rules! controller_post {
    ($model:expr, $url:expr, $command:expr, $action:expr) => {{
        let command: $crate::types::MotorCommand = $command;
        let request = $crate::types::MotorRequest { command };
        match $crate::HttpCmd::post($url)
            .header("Content-Type", "application/json")
            .body_json(&request)
        {
            Ok(builder) => builder.build().then_send(move |result| {
                let result = $crate::process_dispatch_response($action, result);
                $crate::events::Event::Control($crate::events::ControlEvent::CommandResponse {
                    command,
                    result,
                })
            }),
            Err(e) => {
                log::error!("failed to create {} request: {e}", $action);
                $model.stop_dc_loading();
                $model.notify($crate::update::control::COMMAND_FAILED_NOTICE)
            }
        }
    }};
}
