//! Simulated passengers

use crate::controller::Direction;

/// One passenger: appears on a floor, rides to a destination.
#[derive(Debug, Clone)]
pub struct SimPassenger {
    pub origin: usize,
    pub destination: usize,
    pub spawn_time: f64,
}

impl SimPassenger {
    pub fn new(origin: usize, destination: usize, spawn_time: f64) -> Self {
        Self {
            origin,
            destination,
            spawn_time,
        }
    }

    /// Which call button this passenger presses.
    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}
