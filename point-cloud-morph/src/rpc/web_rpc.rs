use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::morph::context::MorphContext;
use crate::engine::scroll::scroll_state::{ScrollSample, ScrollSource, ScrollState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<ScrollState>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scroll: ResMut<ScrollState>,
    context: Option<Res<MorphContext>>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    context.as_deref(),
                    &mut scroll,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
/// Requests without an ID are applied but produce no response.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    context: Option<&MorphContext>,
    scroll: &mut ScrollState,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(diagnostics),
        "get_morph_state" => handle_get_morph_state(context, scroll),
        "set_scroll" => handle_set_scroll(&request.params, scroll),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Report the morph phase and scroll progress. Before the manifest is
/// validated there is no context and the state reports not ready.
fn handle_get_morph_state(
    context: Option<&MorphContext>,
    scroll: &ScrollState,
) -> Result<serde_json::Value, RpcError> {
    let (phase, ready, targets) = match context {
        Some(context) => (
            context.phase(),
            context.is_ready(),
            context
                .targets()
                .iter()
                .map(|target| target.name.clone())
                .collect::<Vec<_>>(),
        ),
        None => (0.0, false, Vec::new()),
    };

    Ok(serde_json::json!({
        "phase": phase,
        "scroll": scroll.normalized(),
        "source": scroll.source,
        "targets": targets,
        "ready": ready
    }))
}

/// Apply a scroll sample pushed by the parent page.
fn handle_set_scroll(
    params: &serde_json::Value,
    scroll: &mut ScrollState,
) -> Result<serde_json::Value, RpcError> {
    let sample = serde_json::from_value::<ScrollSample>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'offset' and 'scrollable' parameters"))?;

    if !sample.offset.is_finite() || !sample.scrollable.is_finite() {
        return Err(RpcError::invalid_params("Scroll values must be finite"));
    }

    scroll.apply_sample(sample, ScrollSource::Rpc);

    Ok(serde_json::json!({
        "success": true,
        "scroll": scroll.normalized()
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::morph::interpolator::TargetPointSet;
    use crate::engine::morph::phase::PlateauWindow;

    fn request(method: &str, params: serde_json::Value, id: Option<i64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(serde_json::Value::from),
        }
    }

    fn ready_context() -> MorphContext {
        let mut context = MorphContext::new(2, 1, PlateauWindow::default()).unwrap();
        context
            .push_target(TargetPointSet::new("dog", vec![[0.0; 3]]))
            .unwrap();
        context
            .push_target(TargetPointSet::new("deer", vec![[1.0; 3]]))
            .unwrap();
        context
    }

    #[test]
    fn reports_morph_state() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();
        let mut context = ready_context();
        context.apply_scroll(1.0);

        let response = handle_rpc_request(
            &request("get_morph_state", serde_json::Value::Null, Some(1)),
            &diagnostics,
            Some(&context),
            &mut scroll,
        )
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["phase"], 1.0);
        assert_eq!(result["ready"], true);
        assert_eq!(result["targets"], serde_json::json!(["dog", "deer"]));
        assert_eq!(response.id, Some(serde_json::Value::from(1)));
    }

    #[test]
    fn morph_state_before_manifest_is_not_ready() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();
        let response = handle_rpc_request(
            &request("get_morph_state", serde_json::Value::Null, Some(2)),
            &diagnostics,
            None,
            &mut scroll,
        )
        .unwrap();
        assert_eq!(response.result.unwrap()["ready"], false);
    }

    #[test]
    fn set_scroll_updates_scroll_state() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();

        let response = handle_rpc_request(
            &request(
                "set_scroll",
                serde_json::json!({ "offset": 300.0, "scrollable": 1200.0 }),
                Some(3),
            ),
            &diagnostics,
            None,
            &mut scroll,
        )
        .unwrap();

        assert!(response.error.is_none());
        assert_eq!(scroll.normalized(), 0.25);
        assert_eq!(scroll.source, ScrollSource::Rpc);
    }

    #[test]
    fn set_scroll_notification_applies_without_response() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();

        let response = handle_rpc_request(
            &request(
                "set_scroll",
                serde_json::json!({ "offset": 50.0, "scrollable": 100.0 }),
                None,
            ),
            &diagnostics,
            None,
            &mut scroll,
        );

        assert!(response.is_none());
        assert_eq!(scroll.normalized(), 0.5);
    }

    #[test]
    fn set_scroll_rejects_bad_params() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();

        let response = handle_rpc_request(
            &request("set_scroll", serde_json::json!({ "offset": "far" }), Some(4)),
            &diagnostics,
            None,
            &mut scroll,
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert_eq!(scroll.offset, 0.0);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();

        let response = handle_rpc_request(
            &request("tool_selection", serde_json::Value::Null, Some(5)),
            &diagnostics,
            None,
            &mut scroll,
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn get_fps_defaults_to_zero_without_samples() {
        let diagnostics = DiagnosticsStore::default();
        let mut scroll = ScrollState::default();

        let response = handle_rpc_request(
            &request("get_fps", serde_json::Value::Null, Some(6)),
            &diagnostics,
            None,
            &mut scroll,
        )
        .unwrap();

        assert_eq!(response.result.unwrap()["fps"], 0.0);
    }
}
