use std::cell::{Cell, RefCell};
use std::rc::Rc;

use credits_graph_canvas::dataset::Dataset;
use credits_graph_canvas::graph::{NodeId, Role, build};
use credits_graph_canvas::layout::{FrameLoop, LayoutConfig, LayoutEngine, ManualFrameClock};

// linked for the library, unused here
use indexmap as _;
use log as _;
use proptest as _;
use rand as _;
use serde as _;
use serde_json as _;
use thiserror as _;

const DOCUMENT: &str = r#"{
	"projects": [
		{ "id": "p1", "title": "Northern Lights", "year": 2019, "genre": "Drama", "cast": ["a1", "a2"], "director": "d1", "castingDirector": "c1" },
		{ "id": "p2", "title": "Harbor Road", "year": 2021, "genre": "Thriller", "cast": ["a2", "a3"], "director": "d1" },
		{ "id": "p3", "title": "Glass Tower", "year": 2023, "genre": "Drama", "cast": ["a1", "a9"] }
	],
	"actors": [
		{ "id": "a1", "name": "Maya Ortiz" },
		{ "id": "a2", "name": "Jonas Berg" },
		{ "id": "a3", "name": "Priya Nair" }
	],
	"directors": [{ "id": "d1", "name": "Ana Costa" }],
	"castingDirectors": [{ "id": "c1", "name": "Rita Moreau" }]
}"#;

struct Harness {
	clock: Rc<ManualFrameClock>,
	frame_loop: FrameLoop<Rc<ManualFrameClock>>,
	published: Rc<Cell<usize>>,
}

impl Harness {
	fn new(config: LayoutConfig) -> Self {
		let dataset = Dataset::from_json(DOCUMENT).expect("document parses");
		let mut engine = LayoutEngine::new(config, 800.0, 600.0);
		engine.load(build(&dataset));

		let clock = Rc::new(ManualFrameClock::new());
		let published = Rc::new(Cell::new(0));
		let seen = published.clone();
		let frame_loop = FrameLoop::new(
			Rc::new(RefCell::new(engine)),
			clock.clone(),
			move |_: &LayoutEngine| seen.set(seen.get() + 1),
		);
		frame_loop.start();
		Self {
			clock,
			frame_loop,
			published,
		}
	}

	fn engine(&self) -> &Rc<RefCell<LayoutEngine>> {
		self.frame_loop.engine()
	}

	fn run_until_settled(&self, max_frames: usize) -> usize {
		for frame in 0..max_frames {
			if self.engine().borrow().is_settled() {
				return frame;
			}
			self.clock.advance();
		}
		panic!("layout did not settle within {max_frames} frames");
	}

	fn position(&self, id: &NodeId) -> (f64, f64) {
		let engine = self.engine().borrow();
		let node = engine.node(id).expect("node exists");
		(node.x, node.y)
	}
}

fn id(role: Role, raw: &str) -> NodeId {
	NodeId::new(role, raw)
}

#[test]
fn loop_settles_a_loaded_graph() {
	let harness = Harness::new(LayoutConfig::default());
	let frames = harness.run_until_settled(1000);
	assert!(frames > 100, "settled suspiciously early after {frames} frames");
	assert_eq!(harness.published.get(), frames);

	let engine = harness.engine().borrow();
	// unknown actor a9 never became a node
	assert_eq!(engine.nodes().len(), 8);
	assert_eq!(engine.links().len(), 8);
	for node in engine.nodes() {
		assert!(node.x.is_finite() && node.y.is_finite(), "{} diverged", node.id);
	}
	let (cx, cy) = (
		engine.nodes().iter().map(|n| n.x).sum::<f64>() / 8.0,
		engine.nodes().iter().map(|n| n.y).sum::<f64>() / 8.0,
	);
	assert!((cx - 400.0).abs() < 5.0 && (cy - 300.0).abs() < 5.0, "mean at ({cx}, {cy})");
}

#[test]
fn dragged_node_follows_the_pointer_across_frames() {
	let harness = Harness::new(LayoutConfig::default());
	harness.run_until_settled(1000);
	let dragged = id(Role::Director, "d1");

	assert!(harness.engine().borrow_mut().drag_start(&dragged, 100.0, 100.0));
	for step in 0..50 {
		let (x, y) = (100.0 + step as f64 * 4.0, 100.0);
		harness.engine().borrow_mut().drag_move(&dragged, x, y);
		harness.clock.advance();
		assert_eq!(harness.position(&dragged), (x, y));
		assert!(harness.engine().borrow().alpha() >= 0.3);
	}

	// stays hot while held, even with the pointer still
	harness.clock.advance_by(500);
	assert!(!harness.engine().borrow().is_settled());
	assert_eq!(harness.position(&dragged), (296.0, 100.0));

	assert!(harness.engine().borrow_mut().drag_end(&dragged));
	harness.run_until_settled(1000);
	assert_ne!(harness.position(&dragged), (296.0, 100.0));
}

#[test]
fn dropped_node_stays_put_with_pin_on_release() {
	let config = LayoutConfig {
		pin_on_release: true,
		..LayoutConfig::default()
	};
	let harness = Harness::new(config);
	let dragged = id(Role::Work, "p2");

	harness.engine().borrow_mut().drag_start(&dragged, 50.0, 60.0);
	harness.clock.advance_by(10);
	harness.engine().borrow_mut().drag_end(&dragged);
	harness.run_until_settled(1000);

	assert_eq!(harness.position(&dragged), (50.0, 60.0));
}

#[test]
fn reload_mid_drag_drops_the_drag_and_reheats() {
	let harness = Harness::new(LayoutConfig::default());
	harness.run_until_settled(1000);
	let dragged = id(Role::Actor, "a2");
	harness.engine().borrow_mut().drag_start(&dragged, 10.0, 10.0);
	harness.clock.advance_by(5);

	let dataset = Dataset::from_json(DOCUMENT).expect("document parses");
	harness.engine().borrow_mut().load(build(&dataset));
	{
		let engine = harness.engine().borrow();
		assert!(engine.dragging().is_none());
		assert!(engine.nodes().iter().all(|n| !n.pin.is_pinned()));
		assert_eq!(engine.alpha(), 1.0);
	}
	// stale pointer events for the old drag are ignored
	assert!(!harness.engine().borrow_mut().drag_move(&dragged, 20.0, 20.0));
	assert!(!harness.engine().borrow_mut().drag_end(&dragged));

	harness.run_until_settled(1000);
	assert!(harness.frame_loop.is_running());
}

#[test]
fn stopped_loop_leaves_the_engine_alone() {
	let harness = Harness::new(LayoutConfig::default());
	harness.clock.advance_by(10);
	harness.frame_loop.stop();
	let ticks = harness.engine().borrow().simulation().ticks();

	harness.clock.advance_by(10);
	assert_eq!(harness.engine().borrow().simulation().ticks(), ticks);
	assert_eq!(harness.published.get(), 10);

	harness.frame_loop.start();
	harness.clock.advance_by(3);
	assert_eq!(harness.engine().borrow().simulation().ticks(), ticks + 3);
}
