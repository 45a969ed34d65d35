//! Force-directed layout: the simulation, its forces, the engine that owns the
//! live graph and the frame loop that drives it.

mod config;
mod engine;
mod forces;
mod frame;
mod simulation;

pub use config::LayoutConfig;
pub use engine::{CENTER_FORCE, CHARGE_FORCE, COLLIDE_FORCE, LINK_FORCE, LayoutEngine, Viewport};
pub use forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce, jiggle};
pub use frame::{FrameLoop, FrameScheduler, ManualFrameClock};
pub use simulation::Simulation;
