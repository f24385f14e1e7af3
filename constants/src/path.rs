/// Morph manifest describing the targets, sampling and scroll settings.
pub const MORPH_MANIFEST_PATH: &str = "morph/scene.morph.json";

/// File extension registered for morph manifests with the JSON asset loader.
pub const MORPH_MANIFEST_EXTENSION: &str = "morph.json";

/// Point cloud vertex and fragment shader.
pub const POINT_CLOUD_SHADER_PATH: &str = "shaders/point_cloud.wgsl";
