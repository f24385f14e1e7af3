use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use std::f32::consts::TAU;

use crate::engine::assets::morph_manifest::{CameraSettings, MorphManifest};
use constants::camera;

/// Keeps `looking_at` away from the poles where the up vector degenerates.
const POLE_EPSILON: f32 = 1e-4;

/// Spherical orbit state plus the pending motion still being damped out.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, zero looking down -Z.
    pub yaw: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub enable_zoom: bool,
    pub viewport_height: f32,
    rotate_delta: Vec2,
    pan_delta: Vec3,
    zoom_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let min_distance = settings.min_distance.max(0.0);
        let max_distance = settings.max_distance.max(min_distance);
        Self {
            target: Vec3::ZERO,
            radius: settings.initial_distance.clamp(min_distance, max_distance),
            yaw: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            damping: settings.damping_factor.clamp(0.0, 1.0),
            min_distance,
            max_distance,
            min_polar: camera::MIN_POLAR_ANGLE,
            max_polar: camera::MAX_POLAR_ANGLE,
            enable_zoom: settings.enable_zoom,
            viewport_height: 720.0,
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec3::ZERO,
            zoom_scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag in pixels. A drag across the full
    /// viewport height turns the camera once around.
    pub fn rotate(&mut self, drag: Vec2) {
        let height = self.viewport_height.max(1.0);
        self.rotate_delta.x -= TAU * drag.x / height;
        self.rotate_delta.y -= TAU * drag.y / height;
    }

    /// Queue a pan from a pointer drag in pixels. The target stays in its
    /// ground plane: horizontal drags follow the camera's right vector and
    /// vertical drags follow its view direction flattened onto XZ.
    pub fn pan(&mut self, drag: Vec2) {
        let height = self.viewport_height.max(1.0);
        let half_fov = camera::FOV_DEGREES.to_radians() * 0.5;
        let world_per_pixel = 2.0 * self.radius * half_fov.tan() / height;

        let right = self.rotation() * Vec3::X;
        let forward = Vec3::Y.cross(right).normalize_or_zero();
        self.pan_delta += (-right * drag.x + forward * drag.y) * world_per_pixel;
    }

    /// Queue a zoom; positive steps move the camera closer.
    pub fn zoom(&mut self, steps: f32) {
        if self.enable_zoom {
            self.zoom_scale *= camera::ZOOM_STEP.powf(steps);
        }
    }

    /// Advance one frame: apply the damped share of the pending motion and
    /// clamp to the configured limits.
    pub fn update(&mut self) {
        let damping = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.yaw += self.rotate_delta.x * damping;
        self.polar = (self.polar + self.rotate_delta.y * damping).clamp(
            self.min_polar.max(POLE_EPSILON),
            self.max_polar.min(std::f32::consts::PI - POLE_EPSILON),
        );
        self.target += self.pan_delta * damping;
        self.radius = (self.radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);
        self.zoom_scale = 1.0;

        self.rotate_delta *= 1.0 - damping;
        self.pan_delta *= 1.0 - damping;
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.yaw.sin(),
                    self.polar.cos(),
                    sin_polar * self.yaw.cos(),
                )
    }

    pub fn rotation(&self) -> Quat {
        Transform::from_translation(self.eye())
            .looking_at(self.target, Vec3::Y)
            .rotation
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.rotate_delta.length_squared() < 1e-10 && self.pan_delta.length_squared() < 1e-10
    }
}

pub fn orbit_camera_input(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let drag: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if drag != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(drag);
        } else if mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]) {
            orbit.pan(drag);
        }
    }

    // Plain wheel input drives the scroll signal.
    if !keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
        scroll_events.clear();
        return;
    }
    let steps: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if steps.abs() > f32::EPSILON {
        orbit.zoom(steps);
    }
}

pub fn track_viewport_resize(
    mut resize_events: EventReader<WindowResized>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if let Some(resized) = resize_events.read().last() {
        orbit.viewport_height = resized.height;
    }
}

pub fn orbit_camera_update(
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    orbit.update();
    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}

/// Reconfigure the orbit limits once the manifest is known, keeping the
/// viewport height already tracked.
pub fn configure_orbit_camera(
    manifest: &MorphManifest,
    orbit: &mut OrbitCamera,
    windows: &Query<&Window, With<PrimaryWindow>>,
) {
    let viewport_height = windows
        .single()
        .map(|window| window.height())
        .unwrap_or(orbit.viewport_height);
    *orbit = OrbitCamera::from_settings(&manifest.camera);
    orbit.viewport_height = viewport_height;
}
