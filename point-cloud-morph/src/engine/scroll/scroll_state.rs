use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Where the latest scroll sample came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSource {
    #[default]
    None,
    /// Host page scroll listener.
    Page,
    /// Parent frame through the `set_scroll` RPC.
    Rpc,
    /// Native mouse wheel over a virtual page.
    Wheel,
}

/// Pixels scrolled and the total scrollable distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSample {
    pub offset: f32,
    pub scrollable: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ScrollState {
    pub offset: f32,
    pub scrollable: f32,
    pub source: ScrollSource,
}

impl ScrollState {
    /// Scroll progress in `[0, 1]`; a page that cannot scroll reads as 0.
    pub fn normalized(&self) -> f32 {
        if self.scrollable <= 0.0 || !self.scrollable.is_finite() || !self.offset.is_finite() {
            return 0.0;
        }
        (self.offset / self.scrollable).clamp(0.0, 1.0)
    }

    pub fn apply_sample(&mut self, sample: ScrollSample, source: ScrollSource) {
        self.offset = sample.offset;
        self.scrollable = sample.scrollable;
        self.source = source;
    }

    /// Move the offset by `delta` pixels within a page of `scrollable` pixels.
    pub fn scroll_by(&mut self, delta: f32, scrollable: f32) {
        self.scrollable = scrollable.max(0.0);
        self.offset = (self.offset + delta).clamp(0.0, self.scrollable);
        self.source = ScrollSource::Wheel;
    }
}
