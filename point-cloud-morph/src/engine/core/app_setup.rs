use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::morph_assets::MorphAssets;
use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::camera::orbit_camera::{
    OrbitCamera, orbit_camera_input, orbit_camera_update, track_viewport_resize,
};
use crate::engine::core::app_state::{AppState, transition_to_running, update_loading_frontend};
use crate::engine::core::window_config::create_window_config;
use crate::engine::render::point_cloud_material::PointCloudMaterial;
use crate::engine::scroll::scroll_state::ScrollState;
use crate::engine::systems::debug_morph::debug_morph_state;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::morph_update::{
    phase_notification_system, update_morph_phase, update_morph_positions,
};
// Loading
use crate::engine::loading::manifest_loader::{load_manifest_system, start_loading};
use crate::engine::loading::point_cloud_creator::create_point_cloud_when_ready;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::target_loader::check_target_loading;
use crate::engine::loading::target_sampler::sample_targets_when_ready;
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;
use constants::camera::{FAR_PLANE, FOV_DEGREES, NEAR_PLANE};
use constants::path::MORPH_MANIFEST_EXTENSION;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, CLEAR_COLOUR, DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITION,
    LOG_FILTER,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scroll::scroll_input::wheel_scroll_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

#[cfg(target_arch = "wasm32")]
use crate::engine::scroll::scroll_input::{apply_page_scroll_system, setup_scroll_listener};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Points are quads; neither prepass nor shadows apply to them.
        .add_plugins(MaterialPlugin::<PointCloudMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers MorphManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MorphManifest>::new(&[
            MORPH_MANIFEST_EXTENSION,
        ]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<MorphAssets>()
        .init_resource::<ScrollState>()
        .init_resource::<OrbitCamera>()
        .insert_resource(ClearColor(CLEAR_COLOUR))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                check_target_loading,
                sample_targets_when_ready,
                create_point_cloud_when_ready,
                transition_to_running,
                update_loading_frontend,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    #[cfg(target_arch = "wasm32")]
    app.add_systems(Startup, setup_scroll_listener);

    // The page keeps scrolling while targets load, so input is read in every state.
    #[cfg(not(target_arch = "wasm32"))]
    let scroll_input = wheel_scroll_system;
    #[cfg(target_arch = "wasm32")]
    let scroll_input = apply_page_scroll_system;

    app.add_systems(
        Update,
        (
            scroll_input,
            (
                update_morph_phase,
                update_morph_positions,
                phase_notification_system,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (
            track_viewport_resize,
            orbit_camera_input,
            orbit_camera_update,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (fps_notification_system, debug_morph_state).run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(DIRECTIONAL_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands, &orbit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    // RUST_LOG takes precedence over the default filter.
    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
