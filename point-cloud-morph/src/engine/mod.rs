pub mod assets;
pub mod camera;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod morph;
pub mod render;
pub mod sampling;
pub mod scroll;
pub mod systems;
