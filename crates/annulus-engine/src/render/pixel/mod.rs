//! Low-resolution offscreen target.
//!
//! The scene is drawn into a color texture of fixed height (width follows the
//! framebuffer aspect) and then upscaled onto the real target with nearest
//! filtering, giving a uniform pixel-art look.

use glam::UVec2;

use crate::paint::Rgba;
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{self, ShaderStage};

use super::common::clear_pass;

/// Offscreen color target `height` pixels high.
pub struct PixelTarget {
    height: u32,

    texture_size: UVec2,
    texture_format: Option<wgpu::TextureFormat>,
    texture_view: Option<wgpu::TextureView>,

    sampler: Option<wgpu::Sampler>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl PixelTarget {
    /// `height` is clamped to at least one pixel.
    pub fn new(height: u32) -> Self {
        Self {
            height: height.max(1),
            texture_size: UVec2::ZERO,
            texture_format: None,
            texture_view: None,
            sampler: None,
            bind_group_layout: None,
            bind_group: None,
            pipeline_format: None,
            pipeline: None,
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Offscreen size for a framebuffer of `framebuffer_size` physical pixels.
    ///
    /// Height is fixed; width keeps the framebuffer aspect (integer division,
    /// floored at one pixel).
    pub fn size_for(&self, framebuffer_size: UVec2) -> UVec2 {
        let fb = framebuffer_size.max(UVec2::ONE);
        let width = (self.height as u64 * fb.x as u64 / fb.y as u64).max(1);
        UVec2::new(width.min(u32::MAX as u64) as u32, self.height)
    }

    /// Clears the offscreen texture, lets `draw` render into it, then upscales
    /// the result onto `target`.
    pub fn render<F>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        clear: Rgba,
        draw: F,
    ) where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let size = self.size_for(ctx.target_size);
        self.ensure_texture(ctx, size);
        self.ensure_pipeline(ctx);
        self.ensure_bind_group(ctx);

        let Some(view) = self.texture_view.as_ref() else { return };

        clear_pass(target.encoder, view, clear);
        {
            let offscreen_ctx = ctx.with_target(ctx.target_format, size);
            let mut offscreen = RenderTarget::new(target.encoder, view);
            draw(&offscreen_ctx, &mut offscreen);
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("annulus pixel blit"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, size: UVec2) {
        if self.texture_view.is_some()
            && self.texture_size == size
            && self.texture_format == Some(ctx.target_format)
        {
            return;
        }
        log::debug!("allocating pixel target {}x{}", size.x, size.y);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("annulus pixel target"),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ctx.target_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        self.texture_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.texture_size = size;
        self.texture_format = Some(ctx.target_format);
        self.bind_group = None;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.target_format) && self.pipeline.is_some() {
            return;
        }

        let module = shader::create_module(ctx.device, "annulus blit shader", shader::BLIT_WGSL);

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("annulus blit bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: ShaderStage::Fragment.wgpu_stages(),
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: ShaderStage::Fragment.wgpu_stages(),
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("annulus blit pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("annulus blit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(ShaderStage::Vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(ShaderStage::Fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("annulus pixel sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        }));
        self.pipeline_format = Some(ctx.target_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(view) = self.texture_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("annulus blit bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }
}

impl Default for PixelTarget {
    /// 200 px high, the resolution the track demo is tuned for.
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_fixed_and_width_follows_aspect() {
        let t = PixelTarget::new(200);
        assert_eq!(t.size_for(UVec2::new(1280, 720)), UVec2::new(355, 200));
        assert_eq!(t.size_for(UVec2::new(800, 800)), UVec2::new(200, 200));
        assert_eq!(t.size_for(UVec2::new(400, 800)), UVec2::new(100, 200));
    }

    #[test]
    fn degenerate_sizes_are_floored() {
        let t = PixelTarget::new(0);
        assert_eq!(t.height(), 1);
        assert_eq!(t.size_for(UVec2::ZERO), UVec2::new(1, 1));

        let t = PixelTarget::new(200);
        assert_eq!(t.size_for(UVec2::new(1, 10_000)), UVec2::new(1, 200));
    }
}
