use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};
use constants::path::POINT_CLOUD_SHADER_PATH;

#[derive(ShaderType, Debug, Clone, Copy)]
pub struct PointCloudParams {
    pub colour: Vec4,
    /// World-space edge length of each point quad.
    pub point_size: f32,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointCloudMaterial {
    #[uniform(0)]
    pub params: PointCloudParams,
}

impl PointCloudMaterial {
    pub fn new(colour: [f32; 4], point_size: f32) -> Self {
        Self {
            params: PointCloudParams {
                colour: Vec4::from_array(colour),
                point_size,
            },
        }
    }
}

impl Material for PointCloudMaterial {
    fn vertex_shader() -> ShaderRef {
        POINT_CLOUD_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        POINT_CLOUD_SHADER_PATH.into()
    }

    /// Positions at location 0 and quad corners at location 1; the shader
    /// needs nothing else from the mesh.
    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
