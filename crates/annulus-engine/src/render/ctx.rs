use glam::{UVec2, Vec2};

/// Renderer-facing context: device/queue plus the format and size of the
/// color target being drawn into.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub target_format: wgpu::TextureFormat,
    /// Color target size in physical pixels.
    pub target_size: UVec2,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        target_format: wgpu::TextureFormat,
        target_size: UVec2,
    ) -> Self {
        Self {
            device,
            queue,
            target_format,
            target_size,
        }
    }

    /// Same device and queue, different color target.
    #[inline]
    pub fn with_target(&self, target_format: wgpu::TextureFormat, target_size: UVec2) -> Self {
        Self::new(self.device, self.queue, target_format, target_size)
    }

    /// Target size as floats, for camera matrices.
    #[inline]
    pub fn target_size_f32(&self) -> Vec2 {
        self.target_size.as_vec2()
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
