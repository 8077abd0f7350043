mod track;

use anyhow::{Context, Result};
use annulus_engine::camera::Camera2d;
use annulus_engine::core::{App, AppControl, FrameCtx};
use annulus_engine::device::GpuInit;
use annulus_engine::logging::{LoggingConfig, init_logging};
use annulus_engine::paint::Rgba;
use annulus_engine::render::{PixelTarget, RingRenderer};
use annulus_engine::scene::DrawList;
use annulus_engine::window::{Runtime, RuntimeConfig};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use track::{Track, TrackConfig};

/// Environment variable that stops the demo after N frames.
const FRAME_LIMIT_VAR: &str = "ANNULUS_DEMO_FRAMES";

#[derive(Debug, Clone)]
struct DemoConfig {
    title: String,
    pixel_height: u32,
    camera_fov: f32,
    clear: Rgba,
    track: TrackConfig,
    frame_limit: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "annulus track".to_string(),
            pixel_height: 200,
            camera_fov: 20.0,
            clear: Rgba::WHITE,
            track: TrackConfig::default(),
            frame_limit: None,
        }
    }
}

impl DemoConfig {
    fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(FRAME_LIMIT_VAR) {
            let limit = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{FRAME_LIMIT_VAR} must be a frame count, got `{raw}`"))?;
            config.frame_limit = Some(limit);
        }
        Ok(config)
    }
}

struct TrackDemo {
    config: DemoConfig,
    track: Track,
    camera: Camera2d,
    draw_list: DrawList,
    pixels: PixelTarget,
    rings: RingRenderer,
    frames: u64,
    elapsed: f64,
}

impl TrackDemo {
    fn new(config: DemoConfig) -> Self {
        let track = Track::new(config.track);

        let mut camera = Camera2d::new(config.camera_fov);
        camera.target_center = track.marker_position(0.0);
        camera.snap();

        Self {
            pixels: PixelTarget::new(config.pixel_height),
            rings: RingRenderer::new(),
            draw_list: DrawList::new(),
            frames: 0,
            elapsed: 0.0,
            camera,
            track,
            config,
        }
    }
}

impl App for TrackDemo {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(limit) = self.config.frame_limit
            && ctx.time.frame_index >= limit
        {
            log::info!("frame limit {limit} reached");
            ctx.runtime.exit();
            return AppControl::Continue;
        }

        self.frames += 1;
        self.elapsed = ctx.time.elapsed;

        let t = ctx.time.elapsed as f32;
        self.camera.target_center = self.track.marker_position(t);
        self.camera.update(ctx.time.dt);

        self.draw_list.clear();
        self.track.record(&mut self.draw_list, t);

        let Self {
            config,
            camera,
            draw_list,
            pixels,
            rings,
            ..
        } = self;

        ctx.render(Rgba::BLACK, |rctx, target| {
            pixels.render(rctx, target, config.clear, |rctx, target| {
                rings.render(rctx, target, camera, draw_list);
            });
        })
    }

    fn on_exit(&mut self) {
        let fps = if self.elapsed > 0.0 { self.frames as f64 / self.elapsed } else { 0.0 };
        log::info!("{} frames in {:.1}s ({fps:.1} fps)", self.frames, self.elapsed);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_env()?;
    log::info!(
        "track {}..{}, pixel height {}",
        config.track.inner,
        config.track.outer,
        config.pixel_height
    );

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), TrackDemo::new(config))
}
