use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::scene::Ring;

/// Camera uniform block (128 bytes), column-major matrices.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(projection: Mat4, view: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
        }
    }
}

/// Per-ring instance data (96 bytes):
///
///  offset  0  model   [[f32; 4]; 4]  loc 1..=4 (one column each)
///  offset 64  color   [f32; 4]       loc 5
///  offset 80  inner   f32            loc 6
///  offset 84  _pad    [f32; 3]
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct RingInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub inner: f32,
    pub _pad: [f32; 3],
}

impl RingInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x4, // model column 0
        2 => Float32x4, // model column 1
        3 => Float32x4, // model column 2
        4 => Float32x4, // model column 3
        5 => Float32x4, // color
        6 => Float32    // inner
    ];

    pub fn from_ring(ring: &Ring) -> Self {
        Self {
            model: ring.model_matrix().to_cols_array_2d(),
            color: ring.color.to_array(),
            inner: ring.inner_ratio(),
            _pad: [0.0; 3],
        }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RingInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba;
    use glam::{Vec2, Vec4};

    #[test]
    fn sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        assert_eq!(std::mem::size_of::<RingInstance>(), 96);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn attribute_offsets() {
        let offsets: Vec<u64> = RingInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 16, 32, 48, 64, 80]);
        let locations: Vec<u32> = RingInstance::ATTRS.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn instance_carries_ring_inputs() {
        let ring = Ring::new(Vec2::new(2.0, 3.0), 1.0, 4.0, Rgba::new(0.1, 0.2, 0.3, 0.4));
        let inst = RingInstance::from_ring(&ring);

        assert_eq!(inst.color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(inst.inner, 0.25);

        // Column 3 is the translation: center - outer.
        assert_eq!(Vec4::from_array(inst.model[3]), Vec4::new(-2.0, -1.0, 0.0, 1.0));
        assert_eq!(Mat4::from_cols_array_2d(&inst.model), ring.model_matrix());
    }

    #[test]
    fn camera_uniform_is_column_major() {
        let view = Mat4::from_translation(glam::Vec3::new(-5.0, 6.0, 0.0));
        let u = CameraUniform::new(Mat4::IDENTITY, view);
        assert_eq!(u.view[3], [-5.0, 6.0, 0.0, 1.0]);
        assert_eq!(u.projection, Mat4::IDENTITY.to_cols_array_2d());
    }
}
