//! Standalone elevator simulation harness
//!
//! This module hosts the dispatch controller the way the real environment
//! would: it owns the cars, floors and passengers, steps the motion, and
//! delivers events to the controller one at a time. It can be exercised
//! from the console without any UI.

mod elevator;
mod floor;
mod passenger;
mod stats;
mod world;

pub use elevator::{SimElevator, ELEVATOR_SPEED, PASSING_APPROACH};
pub use floor::SimFloor;
pub use passenger::SimPassenger;
pub use stats::SimulationStats;
pub use world::{SimWorld, DEFAULT_CAPACITY};
