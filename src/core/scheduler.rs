/// Identifier returned by the host's frame request (`requestAnimationFrame` id).
pub type FrameHandle = i32;

/// Platform per-frame callback mechanism.
pub trait FrameHost {
    /// Ask for one frame callback. `None` means the request could not be made.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Paused,
    Resumed,
    Unchanged,
}

/// Visibility-gated frame scheduler.
///
/// Holds at most one outstanding frame request, and none while paused.
pub struct FrameScheduler<H: FrameHost> {
    host: H,
    state: LoopState,
    pending: Option<FrameHandle>,
}

impl<H: FrameHost> FrameScheduler<H> {
    pub fn new(host: H, visible: bool) -> Self {
        Self {
            host,
            state: if visible {
                LoopState::Running
            } else {
                LoopState::Paused
            },
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Request a frame unless one is already pending or the loop is paused.
    /// Returns whether a new request was issued.
    pub fn request(&mut self) -> bool {
        if self.state == LoopState::Paused || self.pending.is_some() {
            return false;
        }
        self.pending = self.host.request_frame();
        self.pending.is_some()
    }

    /// Called at the top of the frame callback. Returns whether frame work may run.
    pub fn on_frame_fired(&mut self) -> bool {
        self.pending = None;
        self.state == LoopState::Running
    }

    pub fn set_visible(&mut self, visible: bool) -> Transition {
        match (self.state, visible) {
            (LoopState::Running, false) => {
                self.cancel_pending();
                self.state = LoopState::Paused;
                Transition::Paused
            }
            (LoopState::Paused, true) => {
                self.state = LoopState::Running;
                self.request();
                Transition::Resumed
            }
            _ => Transition::Unchanged,
        }
    }

    /// Drop any outstanding request; used on teardown.
    pub fn cancel_all(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }
}
