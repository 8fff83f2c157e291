//! Core types for the dispatch controller
//!
//! Standalone vocabulary shared by the ledger, tracker and dispatcher,
//! plus the capability trait the hosting simulation implements.

use std::fmt;

/// A unique identifier for an elevator in the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElevatorId(pub usize);

/// A unique identifier for a pickup request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Travel direction requested by a waiting passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Direction an elevator is currently moving toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Up,
    Down,
    /// Empty destination queue, the car is not going anywhere
    Stopped,
}

impl TravelDirection {
    /// Whether a stop made while traveling in this direction can serve a
    /// request asking for `direction`. A stopped car serves either.
    pub fn agrees_with(self, direction: Direction) -> bool {
        match self {
            TravelDirection::Up => direction == Direction::Up,
            TravelDirection::Down => direction == Direction::Down,
            TravelDirection::Stopped => true,
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelDirection::Up => write!(f, "up"),
            TravelDirection::Down => write!(f, "down"),
            TravelDirection::Stopped => write!(f, "stopped"),
        }
    }
}

/// Events an elevator reports to the controller
///
/// The host delivers these synchronously, one at a time, in the order the
/// simulation experiences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    /// The destination queue drained and the car has nothing to do
    Idle,
    /// A passenger inside pressed a destination button
    FloorButtonPressed(usize),
    /// Fired shortly before reaching a floor the car is not scheduled to
    /// stop at next
    PassingFloor(usize, Direction),
    /// The car stopped at a floor; the direction is where it moves next
    StoppedAtFloor(usize, TravelDirection),
}

/// Events a floor reports to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorEvent {
    UpButtonPressed,
    DownButtonPressed,
}

impl FloorEvent {
    pub fn direction(self) -> Direction {
        match self {
            FloorEvent::UpButtonPressed => Direction::Up,
            FloorEvent::DownButtonPressed => Direction::Down,
        }
    }
}

/// The capability set a hosting simulation provides for each elevator
///
/// The controller only ever talks to elevators through this trait; it never
/// owns or moves the cars itself.
pub trait ElevatorApi {
    /// Queue a stop at `floor`. With `urgent` the stop is inserted at the
    /// front of the destination queue and served before anything else.
    fn go_to_floor(&mut self, floor: usize, urgent: bool);

    /// Clear the destination queue and halt the car.
    fn stop(&mut self);

    fn current_floor(&self) -> usize;

    fn destination_direction(&self) -> TravelDirection;

    /// The ordered floors the car will visit.
    fn destination_queue(&self) -> &[usize];

    /// Floor buttons currently pressed inside the car.
    fn pressed_floors(&self) -> Vec<usize>;

    /// Fractional occupancy, 0.0 empty to 1.0 full.
    fn load_factor(&self) -> f32;

    fn max_passenger_count(&self) -> usize;

    /// Direction lamps shown to waiting passengers, as (up, down).
    fn indicators(&self) -> (bool, bool);

    fn set_indicators(&mut self, up: bool, down: bool);
}
