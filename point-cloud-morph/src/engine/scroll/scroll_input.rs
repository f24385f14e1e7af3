use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::scroll_state::ScrollState;
#[cfg(target_arch = "wasm32")]
use super::scroll_state::{ScrollSample, ScrollSource};
use crate::engine::assets::morph_manifest::MorphManifest;

/// Pixel delta for one wheel event. Wheel up (positive `y`) scrolls back
/// toward the top of the page.
pub fn wheel_delta_pixels(event: &MouseWheel, line_height: f32) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => -event.y * line_height,
        MouseScrollUnit::Pixel => -event.y,
    }
}

/// Native scroll: accumulate the mouse wheel over a virtual page. Wheel input
/// with Ctrl held belongs to the orbit camera zoom.
pub fn wheel_scroll_system(
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    manifest: Option<Res<MorphManifest>>,
    mut scroll: ResMut<ScrollState>,
) {
    let Some(manifest) = manifest else {
        scroll_events.clear();
        return;
    };
    if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
        scroll_events.clear();
        return;
    }

    let settings = manifest.scroll;
    let delta: f32 = scroll_events
        .read()
        .map(|event| wheel_delta_pixels(event, settings.line_height))
        .sum();

    if delta.abs() > f32::EPSILON {
        scroll.scroll_by(delta, settings.virtual_height);
    }
}

/// Latest page scroll sample written by the browser listener.
#[cfg(target_arch = "wasm32")]
#[derive(Resource)]
pub struct WebScrollQueue(std::sync::Arc<std::sync::Mutex<Option<ScrollSample>>>);

#[cfg(target_arch = "wasm32")]
pub fn setup_scroll_listener(mut commands: Commands) {
    use std::sync::{Arc, Mutex};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let latest: Arc<Mutex<Option<ScrollSample>>> = Arc::new(Mutex::new(read_page_scroll()));
    let slot = latest.clone();

    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(sample) = read_page_scroll() {
            if let Ok(mut latest) = slot.lock() {
                *latest = Some(sample);
            }
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Some(window) = web_sys::window() {
        // Resizing changes the scrollable height without a scroll event.
        for event in ["scroll", "resize"] {
            if let Err(e) =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                error!("Failed to register {event} listener: {:?}", e);
            }
        }
    }

    // JS owns the closure from here on.
    closure.forget();
    commands.insert_resource(WebScrollQueue(latest));
}

#[cfg(target_arch = "wasm32")]
fn read_page_scroll() -> Option<ScrollSample> {
    let window = web_sys::window()?;
    let offset = window.scroll_y().ok()? as f32;
    let viewport_height = window.inner_height().ok()?.as_f64()? as f32;
    let document_height = window.document()?.document_element()?.scroll_height() as f32;
    Some(ScrollSample {
        offset,
        scrollable: document_height - viewport_height,
    })
}

#[cfg(target_arch = "wasm32")]
pub fn apply_page_scroll_system(
    queue: Option<Res<WebScrollQueue>>,
    mut scroll: ResMut<ScrollState>,
) {
    let Some(queue) = queue else {
        return;
    };
    let sample = match queue.0.lock() {
        Ok(mut latest) => latest.take(),
        Err(_) => None,
    };
    if let Some(sample) = sample {
        scroll.apply_sample(sample, ScrollSource::Page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    fn wheel_app() -> App {
        let mut app = App::new();
        app.add_event::<MouseWheel>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ScrollState>()
            .add_systems(Update, wheel_scroll_system);
        app
    }

    fn manifest() -> MorphManifest {
        serde_json::from_str(
            r#"{
                "scroll": { "virtual_height": 1000.0, "line_height": 50.0 },
                "targets": [{ "name": "a", "path": "a.gltf" }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn line_deltas_scale_by_line_height() {
        assert_eq!(wheel_delta_pixels(&wheel(MouseScrollUnit::Line, -2.0), 40.0), 80.0);
        assert_eq!(wheel_delta_pixels(&wheel(MouseScrollUnit::Pixel, 15.0), 40.0), -15.0);
    }

    #[test]
    fn ignores_wheel_until_manifest_is_available() {
        let mut app = wheel_app();
        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -3.0));
        app.update();
        assert_eq!(app.world().resource::<ScrollState>().offset, 0.0);
    }

    #[test]
    fn wheel_moves_down_the_virtual_page() {
        let mut app = wheel_app();
        app.insert_resource(manifest());

        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -3.0));
        app.update();
        let scroll = app.world().resource::<ScrollState>();
        assert_eq!(scroll.offset, 150.0);
        assert!((scroll.normalized() - 0.15).abs() < 1e-6);

        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -100.0));
        app.update();
        assert_eq!(app.world().resource::<ScrollState>().normalized(), 1.0);
    }

    #[test]
    fn ctrl_wheel_leaves_scroll_untouched() {
        let mut app = wheel_app();
        app.insert_resource(manifest());
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ControlLeft);

        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -3.0));
        app.update();
        assert_eq!(app.world().resource::<ScrollState>().offset, 0.0);
    }
}
