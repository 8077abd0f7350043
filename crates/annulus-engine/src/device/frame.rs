/// A single acquired surface frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// Pass it back to [`Gpu::submit`](super::Gpu::submit) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
