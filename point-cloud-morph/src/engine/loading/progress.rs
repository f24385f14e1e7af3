use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub targets_loaded: bool,
    pub target_loading_states: Vec<(String, i32)>,
    pub targets_sampled: bool,
    pub point_cloud_created: bool,
    /// Set once loading cannot complete; the app stays in `Loading`.
    pub failure: Option<String>,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.point_cloud_created && self.failure.is_none()
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.failure.is_none() {
            self.failure = Some(reason.into());
        }
    }
}
