use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "annulus".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Runtime commands an app can issue during a frame.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit: bool,
    error: Option<anyhow::Error>,
}

impl RuntimeCtx {
    /// Closes the window and leaves the event loop.
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    /// Stops the runtime with `err`; `Runtime::run` returns it and
    /// `App::on_exit` is skipped. Only the first error is kept.
    pub fn fail(&mut self, err: anyhow::Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// What the event loop does after a frame callback returned `control`.
    fn into_outcome(self, control: AppControl) -> FrameOutcome {
        match self.error {
            Some(err) => FrameOutcome::Fail(err),
            None if self.exit || control == AppControl::Exit => FrameOutcome::Exit,
            None => FrameOutcome::Continue,
        }
    }
}

#[derive(Debug)]
enum FrameOutcome {
    Continue,
    Exit,
    Fail(anyhow::Error),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            app,
            window: None,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    /// First fatal error; returned from `Runtime::run`.
    error: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.window = None;
        event_loop.exit();
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        log::debug!("exiting event loop");
        if self.window.is_some() {
            self.app.on_exit();
        }
        self.window = None;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let Some(entry) = self.window.as_mut() else { return };

        let app = &mut self.app;
        let mut runtime_ctx = RuntimeCtx::default();

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time,
                runtime: &mut runtime_ctx,
            };
            app.on_frame(&mut ctx)
        });

        match runtime_ctx.into_outcome(control) {
            FrameOutcome::Continue => {}
            FrameOutcome::Exit => self.exit(event_loop),
            FrameOutcome::Fail(err) => self.fail(event_loop, err.context("frame failed")),
        }
    }
}

/// New surface size carried by `event`. Only `Resized` reports the physical
/// size the surface must be configured with.
fn surface_size_change(event: &WindowEvent) -> Option<PhysicalSize<u32>> {
    match event {
        WindowEvent::Resized(size) => Some(*size),
        _ => None,
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => self.fail(event_loop, e.context("failed to create initial window")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Continuous redraw.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        if let Some(new_size) = surface_size_change(&event) {
            if let Some(entry) = self.window.as_mut() {
                log::debug!("resized to {}x{}", new_size.width, new_size.height);
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),

            // The new physical size arrives with the `Resized` event that
            // follows; only the scale changes here.
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor changed to {scale_factor}");
                if let Some(entry) = self.window.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_without_commands() {
        let ctx = RuntimeCtx::default();
        assert!(matches!(ctx.into_outcome(AppControl::Continue), FrameOutcome::Continue));
    }

    #[test]
    fn exit_from_control_or_command() {
        assert!(matches!(
            RuntimeCtx::default().into_outcome(AppControl::Exit),
            FrameOutcome::Exit
        ));

        let mut ctx = RuntimeCtx::default();
        ctx.exit();
        assert!(ctx.exit_requested());
        assert!(matches!(ctx.into_outcome(AppControl::Continue), FrameOutcome::Exit));
    }

    #[test]
    fn fatal_error_is_a_failure_not_an_exit() {
        // A fatal surface error is reported and the frame returns `Exit`.
        let mut ctx = RuntimeCtx::default();
        ctx.fail(anyhow::anyhow!("out of memory"));

        match ctx.into_outcome(AppControl::Exit) {
            FrameOutcome::Fail(err) => assert_eq!(err.to_string(), "out of memory"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn first_error_wins() {
        let mut ctx = RuntimeCtx::default();
        ctx.fail(anyhow::anyhow!("first"));
        ctx.fail(anyhow::anyhow!("second"));
        ctx.exit();

        match ctx.into_outcome(AppControl::Continue) {
            FrameOutcome::Fail(err) => assert_eq!(err.to_string(), "first"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn only_resized_changes_surface_size() {
        let size = PhysicalSize::new(1024, 768);
        assert_eq!(surface_size_change(&WindowEvent::Resized(size)), Some(size));
        assert_eq!(surface_size_change(&WindowEvent::CloseRequested), None);
        assert_eq!(surface_size_change(&WindowEvent::RedrawRequested), None);
    }
}
