//! JSON-RPC 2.0 communication layer for the host page.
//!
//! The renderer is embedded in an iframe; the parent page talks to it with
//! `postMessage`. A parent that owns the scroll position can drive the morph
//! through `set_scroll` instead of relying on the iframe's own scroll events.
//!
//! ```text
//! Host (parent window)  <──postMessage──>  Bevy (iframe)
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Requests without an ID are treated as notifications: they are applied but
//! never answered.
//!
//! ## Methods
//! - `get_morph_state`: phase, scroll progress, target names and readiness
//! - `set_scroll`: `{ "offset": f32, "scrollable": f32 }` from the parent page
//! - `get_fps`: smoothed frame rate
//!
//! ## Notifications
//! - `fps_update`: smoothed frame rate every 0.5 s
//! - `phase_update`: phase and neighbouring targets whenever the phase moves
//! - `loading_progress`: per-target load state while loading
//!
//! ## Error codes
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! On native targets outgoing messages are dropped.

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
