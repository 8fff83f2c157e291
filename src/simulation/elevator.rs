//! Kinematic elevator model
//!
//! Implements the capability set the controller consumes: a destination
//! queue, pressed-floor buttons, load factor and indicator lamps, plus the
//! constant-speed motion that generates passing and stopped events.

use sorted_vec::SortedVec;

use crate::controller::{Direction, ElevatorApi, ElevatorEvent, ElevatorId, TravelDirection};

use super::passenger::SimPassenger;

/// Floors-per-second travel speed of every car
pub const ELEVATOR_SPEED: f64 = 1.5;

/// How close (in floor units) a car gets to an unscheduled floor before
/// `passing_floor` fires
pub const PASSING_APPROACH: f64 = 0.25;

const ARRIVAL_EPSILON: f64 = 1e-9;

/// A simulated elevator car
pub struct SimElevator {
    pub id: ElevatorId,
    /// Vertical position in floor units
    pub position: f64,
    destination_queue: Vec<usize>,
    /// Destination buttons currently lit inside the car
    pressed: SortedVec<usize>,
    pub passengers: Vec<SimPassenger>,
    capacity: usize,
    going_up: bool,
    going_down: bool,
    /// Floor the last passing event was announced for; arrival resets it
    announced_passing: Option<usize>,
    /// Whether the idle notification for the current quiescent period fired
    pub idle_notified: bool,
}

impl SimElevator {
    pub fn new(id: ElevatorId, start_floor: usize, capacity: usize) -> Self {
        Self {
            id,
            position: start_floor as f64,
            destination_queue: Vec::new(),
            pressed: SortedVec::new(),
            passengers: Vec::new(),
            capacity,
            // Both lamps start lit, so a freshly spawned car takes anyone.
            going_up: true,
            going_down: true,
            announced_passing: None,
            idle_notified: false,
        }
    }

    /// Press a destination button inside the car.
    pub fn press_floor(&mut self, floor: usize) {
        if !self.pressed.contains(&floor) {
            self.pressed.insert(floor);
        }
    }

    pub fn clear_pressed(&mut self, floor: usize) {
        self.pressed.remove_item(&floor);
    }

    pub fn queue_is_empty(&self) -> bool {
        self.destination_queue.is_empty()
    }

    /// Advance the car by `delta` seconds, reporting host events in order.
    ///
    /// `passing_floor` fires once when the car enters the approach band of
    /// a floor it is not scheduled to stop at next; it never fires for the
    /// next scheduled stop. Arrival snaps the car to the floor, pops the
    /// queue, clears that floor's button and reports `stopped_at_floor`
    /// with the post-stop travel direction.
    pub fn step(&mut self, delta: f64) -> Vec<ElevatorEvent> {
        let mut events = Vec::new();
        let Some(&target) = self.destination_queue.first() else {
            return events;
        };
        let target_pos = target as f64;
        let step = ELEVATOR_SPEED * delta;
        let direction = if target_pos >= self.position {
            Direction::Up
        } else {
            Direction::Down
        };

        if (target_pos - self.position).abs() <= step + ARRIVAL_EPSILON {
            self.position = target_pos;
        } else if target_pos > self.position {
            self.position += step;
        } else {
            self.position -= step;
        }

        if (self.position - target_pos).abs() <= ARRIVAL_EPSILON {
            self.position = target_pos;
            self.destination_queue.remove(0);
            self.clear_pressed(target);
            self.announced_passing = None;
            events.push(ElevatorEvent::StoppedAtFloor(target, self.destination_direction()));
            return events;
        }

        let next_floor = match direction {
            Direction::Up => self.position.floor() as i64 + 1,
            Direction::Down => self.position.ceil() as i64 - 1,
        };
        if next_floor >= 0 {
            let next_floor = next_floor as usize;
            if next_floor != target
                && (next_floor as f64 - self.position).abs() <= PASSING_APPROACH
                && self.announced_passing != Some(next_floor)
            {
                self.announced_passing = Some(next_floor);
                events.push(ElevatorEvent::PassingFloor(next_floor, direction));
            }
        }
        events
    }
}

impl ElevatorApi for SimElevator {
    fn go_to_floor(&mut self, floor: usize, urgent: bool) {
        if urgent {
            self.destination_queue.insert(0, floor);
        } else {
            self.destination_queue.push(floor);
        }
        self.idle_notified = false;
    }

    fn stop(&mut self) {
        self.destination_queue.clear();
        self.announced_passing = None;
    }

    fn current_floor(&self) -> usize {
        self.position.round() as usize
    }

    fn destination_direction(&self) -> TravelDirection {
        match self.destination_queue.first() {
            Some(&target) if (target as f64) > self.position => TravelDirection::Up,
            Some(&target) if (target as f64) < self.position => TravelDirection::Down,
            _ => TravelDirection::Stopped,
        }
    }

    fn destination_queue(&self) -> &[usize] {
        &self.destination_queue
    }

    fn pressed_floors(&self) -> Vec<usize> {
        self.pressed.iter().copied().collect()
    }

    fn load_factor(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.passengers.len() as f32 / self.capacity as f32
    }

    fn max_passenger_count(&self) -> usize {
        self.capacity
    }

    fn indicators(&self) -> (bool, bool) {
        (self.going_up, self.going_down)
    }

    fn set_indicators(&mut self, up: bool, down: bool) {
        self.going_up = up;
        self.going_down = down;
    }
}
