//! Experience harness: a canvas, a size tracker and a frame clock wired to a
//! set of lifecycle hooks through event emitters.
//!
//! Nothing here is global. Each [`Experience`] owns its own trackers, so any
//! number of them can live side by side.

use crate::clock::{Clock, FrameTime};
use crate::events::{EventEmitter, ListenerId, RESIZE, TICK};
use crate::viewport::Viewport;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;

/// A rendering surface that can report its current size.
pub trait SurfaceHandle {
    fn viewport(&self) -> Viewport;
}

/// Callbacks an [`Experience`] subscribes on construction.
pub trait LifecycleHooks {
    fn resize(&mut self, viewport: &Viewport) {
        log::info!(
            "[resize] {}x{} (pixel ratio {})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio()
        );
    }

    fn update(&mut self, _time: &FrameTime) {}
}

/// Hooks with the default behavior only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingHooks;

impl LifecycleHooks for LoggingHooks {}

/// Tracks the surface size and emits `resize` when it changes.
#[derive(Debug, Default)]
pub struct Sizes {
    viewport: Viewport,
    emitter: EventEmitter<Viewport>,
}

impl Sizes {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            emitter: EventEmitter::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.viewport.pixel_ratio()
    }

    pub fn on_resize(&mut self, callback: impl FnMut(&Viewport) + 'static) -> ListenerId {
        self.emitter.on(RESIZE, callback)
    }

    pub fn off_resize(&mut self, id: ListenerId) -> bool {
        self.emitter.off(RESIZE, id)
    }

    /// Store the new size and notify listeners. Every call emits, equal sizes included.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.emitter.trigger(RESIZE, &viewport);
    }

    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count(RESIZE)
    }
}

/// Frame clock that emits `tick` with the sampled delta and elapsed time.
#[derive(Debug)]
pub struct Time {
    clock: Clock,
    current: FrameTime,
    emitter: EventEmitter<FrameTime>,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self::with_clock(Clock::new())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            current: FrameTime::default(),
            emitter: EventEmitter::new(),
        }
    }

    pub fn current(&self) -> FrameTime {
        self.current
    }

    pub fn on_tick(&mut self, callback: impl FnMut(&FrameTime) + 'static) -> ListenerId {
        self.emitter.on(TICK, callback)
    }

    pub fn off_tick(&mut self, id: ListenerId) -> bool {
        self.emitter.off(TICK, id)
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        self.current = self.clock.sample_at(now);
        let time = self.current;
        self.emitter.trigger(TICK, &time);
        time
    }

    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count(TICK)
    }
}

/// Shared context for one demo instance.
pub struct Experience<C, H> {
    canvas: C,
    pub sizes: Sizes,
    pub time: Time,
    hooks: Rc<RefCell<H>>,
}

impl<C: SurfaceHandle, H: LifecycleHooks + 'static> Experience<C, H> {
    pub fn new(canvas: C, hooks: H) -> Self {
        Self::with_time(canvas, hooks, Time::new())
    }

    /// Build with a caller-supplied [`Time`], e.g. one starting at a fixed instant.
    pub fn with_time(canvas: C, hooks: H, mut time: Time) -> Self {
        let hooks = Rc::new(RefCell::new(hooks));
        let mut sizes = Sizes::new(canvas.viewport());

        let on_resize = Rc::clone(&hooks);
        sizes.on_resize(move |viewport| on_resize.borrow_mut().resize(viewport));

        let on_tick = Rc::clone(&hooks);
        time.on_tick(move |frame| on_tick.borrow_mut().update(frame));

        Self {
            canvas,
            sizes,
            time,
            hooks,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn hooks(&self) -> &Rc<RefCell<H>> {
        &self.hooks
    }

    /// Re-read the canvas size and emit `resize`.
    pub fn sync_size(&mut self) {
        let viewport = self.canvas.viewport();
        self.sizes.resize(viewport);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.sizes.resize(viewport);
    }

    pub fn tick(&mut self) -> FrameTime {
        self.time.tick()
    }
}
