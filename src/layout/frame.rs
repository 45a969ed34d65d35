//! Frame-driven stepping of a [`LayoutEngine`].
//!
//! The engine never schedules itself. A [`FrameLoop`] asks a
//! [`FrameScheduler`] for the next frame, steps the engine once, hands the
//! result to a publish callback and asks again, until stopped. In the browser
//! the scheduler is `requestAnimationFrame`; in tests it is a
//! [`ManualFrameClock`].

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::debug;

use super::engine::LayoutEngine;

/// Source of frame callbacks.
pub trait FrameScheduler {
	/// Run `callback` once, on the next frame.
	fn on_frame(&self, callback: Box<dyn FnOnce()>);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
	fn on_frame(&self, callback: Box<dyn FnOnce()>) {
		(**self).on_frame(callback);
	}
}

/// A frame clock that only advances when told to.
#[derive(Default)]
pub struct ManualFrameClock {
	queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
	frames: Cell<u64>,
}

impl ManualFrameClock {
	/// A clock with nothing scheduled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Callbacks waiting for the next frame.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Frames advanced so far.
	pub fn frames(&self) -> u64 {
		self.frames.get()
	}

	/// Fire one frame: run every callback scheduled before this call.
	/// Callbacks scheduled while it runs wait for the next frame. Returns
	/// how many ran.
	pub fn advance(&self) -> usize {
		let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
		self.frames.set(self.frames.get() + 1);
		let count = due.len();
		for callback in due {
			callback();
		}
		count
	}

	/// Fire `frames` frames.
	pub fn advance_by(&self, frames: usize) {
		for _ in 0..frames {
			self.advance();
		}
	}
}

impl FrameScheduler for ManualFrameClock {
	fn on_frame(&self, callback: Box<dyn FnOnce()>) {
		self.queue.borrow_mut().push_back(callback);
	}
}

type Publish = Box<dyn FnMut(&LayoutEngine)>;

struct LoopState<S> {
	engine: Rc<RefCell<LayoutEngine>>,
	scheduler: S,
	publish: RefCell<Publish>,
	running: Cell<bool>,
	// bumped on every start/stop so callbacks from an earlier run retire
	generation: Cell<u64>,
	frames: Cell<u64>,
}

impl<S> LoopState<S> {
	fn frame(&self) {
		self.engine.borrow_mut().step();
		let engine: &LayoutEngine = &self.engine.borrow();
		let mut publish = self.publish.borrow_mut();
		(*publish)(engine);
		self.frames.set(self.frames.get() + 1);
	}
}

/// Drives a shared [`LayoutEngine`] one step per frame.
///
/// Nothing happens until [`start`](Self::start). Pending frames become no-ops
/// after [`stop`](Self::stop) or once the loop is dropped. The publish
/// callback receives the engine after each frame's step and must not borrow
/// the engine mutably.
pub struct FrameLoop<S: FrameScheduler + 'static> {
	state: Rc<LoopState<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
	/// A stopped loop over `engine`.
	pub fn new(
		engine: Rc<RefCell<LayoutEngine>>,
		scheduler: S,
		publish: impl FnMut(&LayoutEngine) + 'static,
	) -> Self {
		Self {
			state: Rc::new(LoopState {
				engine,
				scheduler,
				publish: RefCell::new(Box::new(publish)),
				running: Cell::new(false),
				generation: Cell::new(0),
				frames: Cell::new(0),
			}),
		}
	}

	/// Begin requesting frames. Idempotent.
	pub fn start(&self) {
		if self.state.running.replace(true) {
			return;
		}
		let generation = self.state.generation.get() + 1;
		self.state.generation.set(generation);
		debug!("frame loop started");
		Self::request(&self.state, generation);
	}

	/// Stop stepping. The already-requested frame, if any, does nothing.
	pub fn stop(&self) {
		if self.state.running.replace(false) {
			self.state.generation.set(self.state.generation.get() + 1);
			debug!("frame loop stopped after {} frames", self.state.frames.get());
		}
	}

	/// Is the loop requesting frames?
	pub fn is_running(&self) -> bool {
		self.state.running.get()
	}

	/// Frames processed since construction.
	pub fn frames(&self) -> u64 {
		self.state.frames.get()
	}

	/// The engine being driven.
	pub fn engine(&self) -> &Rc<RefCell<LayoutEngine>> {
		&self.state.engine
	}

	fn request(state: &Rc<LoopState<S>>, generation: u64) {
		let weak: Weak<LoopState<S>> = Rc::downgrade(state);
		state.scheduler.on_frame(Box::new(move || {
			let Some(state) = weak.upgrade() else {
				return;
			};
			if !state.running.get() || state.generation.get() != generation {
				return;
			}
			state.frame();
			Self::request(&state, generation);
		}));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::{Dataset, Person, Work};
	use crate::graph::build;
	use crate::layout::LayoutConfig;

	fn engine() -> Rc<RefCell<LayoutEngine>> {
		let mut work = Work::new("p1", "Heat", 1995, "Crime");
		work.cast = vec!["a1".into()];
		let dataset = Dataset {
			projects: vec![work],
			actors: vec![Person::new("a1", "Al")],
			..Dataset::default()
		};
		let mut engine = LayoutEngine::new(LayoutConfig::default(), 200.0, 200.0);
		engine.load(build(&dataset));
		Rc::new(RefCell::new(engine))
	}

	#[test]
	fn nothing_runs_before_start() {
		let clock = Rc::new(ManualFrameClock::new());
		let frame_loop = FrameLoop::new(engine(), clock.clone(), |_| {});
		assert_eq!(clock.pending(), 0);
		assert!(!frame_loop.is_running());
		clock.advance();
		assert_eq!(frame_loop.frames(), 0);
	}

	#[test]
	fn one_step_and_one_publish_per_frame() {
		let clock = Rc::new(ManualFrameClock::new());
		let published = Rc::new(Cell::new(0));
		let seen = published.clone();
		let frame_loop = FrameLoop::new(engine(), clock.clone(), move |_| seen.set(seen.get() + 1));
		frame_loop.start();
		frame_loop.start();
		assert_eq!(clock.pending(), 1);

		clock.advance_by(5);
		assert_eq!(published.get(), 5);
		assert_eq!(frame_loop.frames(), 5);
		assert_eq!(frame_loop.engine().borrow().simulation().ticks(), 5);
		assert_eq!(clock.pending(), 1);
	}

	#[test]
	fn stop_cancels_the_pending_frame() {
		let clock = Rc::new(ManualFrameClock::new());
		let frame_loop = FrameLoop::new(engine(), clock.clone(), |_| {});
		frame_loop.start();
		clock.advance_by(3);
		frame_loop.stop();
		assert_eq!(clock.advance(), 1);
		assert_eq!(clock.pending(), 0);
		assert_eq!(frame_loop.frames(), 3);
	}

	#[test]
	fn restart_after_stop_runs_a_single_chain() {
		let clock = Rc::new(ManualFrameClock::new());
		let frame_loop = FrameLoop::new(engine(), clock.clone(), |_| {});
		frame_loop.start();
		frame_loop.stop();
		frame_loop.start();
		// the retired callback and the live one are both queued
		assert_eq!(clock.pending(), 2);
		clock.advance();
		assert_eq!(frame_loop.frames(), 1);
		assert_eq!(clock.pending(), 1);
	}

	#[test]
	fn dropping_the_loop_retires_its_frames() {
		let clock = Rc::new(ManualFrameClock::new());
		let engine = engine();
		let frame_loop = FrameLoop::new(engine.clone(), clock.clone(), |_| {});
		frame_loop.start();
		drop(frame_loop);
		clock.advance();
		assert_eq!(clock.pending(), 0);
		assert_eq!(engine.borrow().simulation().ticks(), 0);
	}

	#[test]
	fn keeps_publishing_after_settling() {
		let clock = Rc::new(ManualFrameClock::new());
		let published = Rc::new(Cell::new(0));
		let seen = published.clone();
		let frame_loop = FrameLoop::new(engine(), clock.clone(), move |_| seen.set(seen.get() + 1));
		frame_loop.start();
		clock.advance_by(500);
		let engine = frame_loop.engine().borrow();
		assert!(engine.is_settled());
		assert!(engine.simulation().ticks() < 500);
		assert_eq!(published.get(), 500);
	}
}
