use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    /// Every target is sampled and the point cloud exists; frame updates run.
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        info!("→ All targets ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Push per-target load states to the host page whenever they change.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_changed() {
        return;
    }

    let targets: Vec<serde_json::Value> = loading_progress
        .target_loading_states
        .iter()
        .map(|(name, loaded)| serde_json::json!({ "name": name, "loaded": *loaded == 1 }))
        .collect();

    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "manifest_loaded": loading_progress.manifest_loaded,
            "targets": targets,
            "sampled": loading_progress.targets_sampled,
            "ready": loading_progress.is_complete(),
            "error": loading_progress.failure
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn state_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn waits_for_point_cloud() {
        let mut app = state_app();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .targets_sampled = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .point_cloud_created = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Running);
    }

    #[test]
    fn failed_loading_never_runs() {
        let mut app = state_app();
        {
            let mut progress = app.world_mut().resource_mut::<LoadingProgress>();
            progress.point_cloud_created = true;
            progress.fail("target 'dog': surface has no sampleable area");
        }
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);
    }
}
