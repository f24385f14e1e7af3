//! Scroll signal acquisition.
//!
//! The browser page scroll (WASM), a parent frame via RPC, or the mouse wheel
//! driving a virtual page (native) all feed a single [`scroll_state::ScrollState`].

/// Platform-specific scroll listeners and wheel accumulation.
pub mod scroll_input;

/// Latest scroll offset and scrollable height.
pub mod scroll_state;
