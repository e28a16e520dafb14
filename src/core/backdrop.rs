use super::config::MotionConfig;
use super::motion::{MotionSmoother, MotionState, PointerSample};
use super::particles::ParticleRenderer;
use super::scheduler::{FrameHost, FrameScheduler, LoopState, Transition};

/// Receives the glow opacity shared with sibling overlay layers.
pub trait StyleSink {
    fn set_glow(&mut self, value: f32);
    fn clear_glow(&mut self);
}

/// Glue between pointer input, the frame scheduler and the renderer.
///
/// Event handlers only record state and request a frame; all per-particle
/// work happens in [`Backdrop::on_frame`].
pub struct Backdrop<R, S, H>
where
    R: ParticleRenderer,
    S: StyleSink,
    H: FrameHost,
{
    smoother: MotionSmoother,
    renderer: Option<R>,
    sink: S,
    scheduler: FrameScheduler<H>,
    mounted: bool,
}

impl<R, S, H> Backdrop<R, S, H>
where
    R: ParticleRenderer,
    S: StyleSink,
    H: FrameHost,
{
    pub fn new(cfg: MotionConfig, sink: S, host: H, visible: bool) -> Self {
        Self {
            smoother: MotionSmoother::new(cfg),
            renderer: None,
            sink,
            scheduler: FrameScheduler::new(host, visible),
            mounted: false,
        }
    }

    /// Hand over the live renderer once it has loaded.
    pub fn attach_renderer(&mut self, mut renderer: R) {
        if self.scheduler.state() == LoopState::Paused {
            renderer.pause();
        }
        self.renderer = Some(renderer);
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    pub fn smoother(&self) -> &MotionSmoother {
        &self.smoother
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn scheduler(&self) -> &FrameScheduler<H> {
        &self.scheduler
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) {
        self.mounted = true;
        self.sink.set_glow(self.smoother.target().glow_opacity);
        self.scheduler.request();
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, t_ms: f64) {
        if !self.mounted {
            return;
        }
        let sample = PointerSample::new(x, y, t_ms);
        self.smoother.record_pointer(sample);
        if let Some(r) = self.renderer.as_mut() {
            r.track_pointer(Some(sample.position()));
        }
        self.scheduler.request();
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(r) = self.renderer.as_mut() {
            r.track_pointer(None);
        }
    }

    /// Frame callback body. Returns `false` when the frame was skipped.
    pub fn on_frame(&mut self, dt_sec: f32) -> bool {
        if !self.scheduler.on_frame_fired() || !self.mounted {
            return false;
        }
        let state: MotionState = self.smoother.step();
        self.sink.set_glow(state.glow_opacity);

        if let Some(r) = self.renderer.as_mut() {
            r.configure_interaction(state.repulse_radius);
            if let Some(grab) = self.smoother.grab_radius() {
                r.configure_grab(grab);
            }
            let smoother = &self.smoother;
            r.for_each_particle_velocity(|v| *v = smoother.adjust_velocity(*v));
            r.step(dt_sec);
        }

        self.scheduler.request();
        true
    }

    pub fn on_visibility(&mut self, visible: bool) -> Transition {
        let t = self.scheduler.set_visible(visible);
        match (t, self.renderer.as_mut()) {
            (Transition::Paused, Some(r)) => r.pause(),
            (Transition::Resumed, Some(r)) => r.resume(),
            _ => {}
        }
        if t != Transition::Unchanged {
            log::info!("[backdrop] visibility -> {:?}", self.scheduler.state());
        }
        t
    }

    /// Release the frame request and the shared style variable.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.cancel_all();
        self.sink.clear_glow();
    }
}
