//! Simulation world: elevators, floors, passengers and the hosted controller
//!
//! Steps car motion, synthesizes the host event stream in order and
//! delivers each event synchronously to the controller, then runs the
//! controller loop once per tick.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::controller::{
    Controller, Direction, ElevatorApi, ElevatorEvent, ElevatorId, FloorEvent,
};

use super::elevator::SimElevator;
use super::floor::SimFloor;
use super::passenger::SimPassenger;
use super::stats::SimulationStats;

/// Default passenger capacity per car
pub const DEFAULT_CAPACITY: usize = 6;

/// The main simulation world
pub struct SimWorld {
    pub elevators: Vec<SimElevator>,
    pub floors: Vec<SimFloor>,
    pub controller: Controller,
    pub stats: SimulationStats,
    /// Simulation time
    pub time: f64,
    /// Expected passenger arrivals per simulated second
    spawn_rate: f64,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
    /// Per-elevator count of completed trips already folded into stats
    recorded_trips: Vec<usize>,
}

impl SimWorld {
    fn new_internal(
        floor_count: usize,
        elevator_count: usize,
        spawn_rate: f64,
        rng: Option<StdRng>,
    ) -> Self {
        let elevators = (0..elevator_count)
            .map(|index| SimElevator::new(ElevatorId(index), 0, DEFAULT_CAPACITY))
            .collect();
        let floors = (0..floor_count).map(SimFloor::new).collect();
        Self {
            elevators,
            floors,
            controller: Controller::new(elevator_count),
            stats: SimulationStats::default(),
            time: 0.0,
            spawn_rate,
            rng,
            recorded_trips: vec![0; elevator_count],
        }
    }

    pub fn new(floor_count: usize, elevator_count: usize, spawn_rate: f64) -> Self {
        Self::new_internal(floor_count, elevator_count, spawn_rate, None)
    }

    /// Create a world with a seeded RNG for reproducible simulations.
    pub fn new_with_seed(
        floor_count: usize,
        elevator_count: usize,
        spawn_rate: f64,
        seed: u64,
    ) -> Self {
        Self::new_internal(
            floor_count,
            elevator_count,
            spawn_rate,
            Some(StdRng::seed_from_u64(seed)),
        )
    }

    /// Get a random value in `[0, 1)`, using the seeded RNG if available.
    fn random_unit(&mut self) -> f64 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0.0..1.0),
            None => rand::rng().random_range(0.0..1.0),
        }
    }

    /// Get a random index below `upper`, using the seeded RNG if available.
    fn random_below(&mut self, upper: usize) -> usize {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..upper),
            None => rand::rng().random_range(0..upper),
        }
    }

    /// Spawn a passenger on `origin` wanting to reach `destination` and
    /// press the matching call button.
    pub fn spawn_passenger(&mut self, origin: usize, destination: usize) -> Result<()> {
        if origin >= self.floors.len() || destination >= self.floors.len() {
            bail!("floor out of range");
        }
        if origin == destination {
            bail!("passenger origin equals destination");
        }
        let passenger = SimPassenger::new(origin, destination, self.time);
        let direction = passenger.direction();
        self.floors[origin].enqueue(passenger);
        self.stats.passengers_spawned += 1;
        self.press_call_button(origin, direction);
        Ok(())
    }

    /// A call-button press on a floor. A lit lamp swallows the press; an
    /// unlit one lights up and raises a pickup request with the controller.
    fn press_call_button(&mut self, floor: usize, direction: Direction) {
        let lamp = match direction {
            Direction::Up => &mut self.floors[floor].up_lamp,
            Direction::Down => &mut self.floors[floor].down_lamp,
        };
        if *lamp {
            return;
        }
        *lamp = true;
        self.stats.requests_created += 1;
        let event = match direction {
            Direction::Up => FloorEvent::UpButtonPressed,
            Direction::Down => FloorEvent::DownButtonPressed,
        };
        self.controller.on_floor_event(floor, event, &mut self.elevators);
    }

    fn spawn_random_passengers(&mut self, delta: f64) {
        if self.spawn_rate <= 0.0 || self.floors.len() < 2 {
            return;
        }
        if self.random_unit() < self.spawn_rate * delta {
            let origin = self.random_below(self.floors.len());
            let mut destination = self.random_below(self.floors.len() - 1);
            if destination >= origin {
                destination += 1;
            }
            let _ = self.spawn_passenger(origin, destination);
        }
    }

    /// Main simulation tick.
    pub fn tick(&mut self, delta: f64) {
        self.time += delta;
        self.stats.elapsed_time = self.time;

        self.spawn_random_passengers(delta);

        for index in 0..self.elevators.len() {
            let id = ElevatorId(index);
            for event in self.elevators[index].step(delta) {
                self.deliver(id, event);
            }
            // The idle notification goes out once the car's own events for
            // this tick have settled and it still has nowhere to go.
            if self.elevators[index].queue_is_empty() && !self.elevators[index].idle_notified {
                self.elevators[index].idle_notified = true;
                self.deliver(id, ElevatorEvent::Idle);
            }
        }

        self.controller.update(delta, &self.elevators);
        self.collect_fulfillment_stats();
    }

    /// Hand one event to the controller; a stop also exchanges passengers.
    fn deliver(&mut self, id: ElevatorId, event: ElevatorEvent) {
        self.controller.on_elevator_event(id, event, &mut self.elevators);
        if let ElevatorEvent::StoppedAtFloor(floor, _) = event {
            self.exchange_passengers(id, floor);
        }
    }

    /// Alight and board passengers at a stop. Boarding follows the
    /// direction lamps (both dark means take anyone), fills up to capacity,
    /// and passengers left behind press the call button again.
    fn exchange_passengers(&mut self, id: ElevatorId, floor: usize) {
        let time = self.time;

        let mut journeys: Vec<f64> = Vec::new();
        self.elevators[id.0].passengers.retain(|p| {
            if p.destination == floor {
                journeys.push(time - p.spawn_time);
                false
            } else {
                true
            }
        });
        self.stats.passengers_delivered += journeys.len();
        self.stats.total_journey_time += journeys.iter().sum::<f64>();

        let (up, down) = self.elevators[id.0].indicators();
        let accept_both = !up && !down;
        let mut pressed: Vec<usize> = Vec::new();
        let mut repress: Vec<Direction> = Vec::new();

        for direction in [Direction::Up, Direction::Down] {
            let accepted = accept_both
                || match direction {
                    Direction::Up => up,
                    Direction::Down => down,
                };
            if !accepted {
                continue;
            }
            // This stop answers the call; whoever is left presses again.
            match direction {
                Direction::Up => self.floors[floor].up_lamp = false,
                Direction::Down => self.floors[floor].down_lamp = false,
            }
            loop {
                let elevator = &self.elevators[id.0];
                if elevator.passengers.len() >= elevator.max_passenger_count() {
                    break;
                }
                let Some(passenger) = self.floors[floor].queue_mut(direction).pop_front() else {
                    break;
                };
                let destination = passenger.destination;
                let elevator = &mut self.elevators[id.0];
                let newly_pressed = !elevator.pressed_floors().contains(&destination);
                elevator.passengers.push(passenger);
                if newly_pressed {
                    elevator.press_floor(destination);
                    pressed.push(destination);
                }
            }
            if !self.floors[floor].queue_mut(direction).is_empty() {
                repress.push(direction);
            }
        }

        for destination in pressed {
            self.controller.on_elevator_event(
                id,
                ElevatorEvent::FloorButtonPressed(destination),
                &mut self.elevators,
            );
        }
        for direction in repress {
            self.press_call_button(floor, direction);
        }
    }

    /// Fold freshly completed trips into the run statistics.
    fn collect_fulfillment_stats(&mut self) {
        for index in 0..self.elevators.len() {
            let seen = self.recorded_trips[index];
            let trips = self.controller.completed_trips(ElevatorId(index));
            for request in &trips[seen..] {
                self.stats.record_fulfillment(request);
            }
            self.recorded_trips[index] = trips.len();
        }
    }

    /// Print a summary of the world state.
    pub fn print_summary(&self) {
        println!("=== Elevator Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Floors: {}, Elevators: {}",
            self.floors.len(),
            self.elevators.len()
        );
        println!(
            "Requests: {} pending ({} unclaimed), {} fulfilled",
            self.controller.ledger().pending_count(),
            self.controller.ledger().outstanding_count(),
            self.stats.requests_fulfilled
        );
        println!(
            "Passengers: {} spawned, {} delivered",
            self.stats.passengers_spawned, self.stats.passengers_delivered
        );

        println!("--- Elevators ---");
        for elevator in &self.elevators {
            println!(
                "  Elevator {}: floor {:.2}, direction {}, queue {:?}, load {:.0}%",
                elevator.id.0,
                elevator.position,
                elevator.destination_direction(),
                elevator.destination_queue(),
                elevator.load_factor() * 100.0
            );
        }

        let waiting: usize = self.floors.iter().map(|f| f.waiting_count()).sum();
        if waiting > 0 {
            println!("--- Waiting ---");
            for floor in &self.floors {
                if floor.waiting_count() > 0 {
                    println!(
                        "  Floor {}: {} up, {} down",
                        floor.floor_num,
                        floor.waiting_up.len(),
                        floor.waiting_down.len()
                    );
                }
            }
        }
    }

    /// Draw a side view of the shaft in the terminal.
    pub fn draw_shaft(&self) {
        println!("\n=== Building ===");
        for floor_num in (0..self.floors.len()).rev() {
            let floor = &self.floors[floor_num];
            let mut lamps = String::new();
            lamps.push(if floor.up_lamp { '^' } else { ' ' });
            lamps.push(if floor.down_lamp { 'v' } else { ' ' });

            let mut cars = String::new();
            for elevator in &self.elevators {
                if (elevator.position - floor_num as f64).abs() < 0.5 {
                    cars.push_str(&format!(
                        "[E{}:{}] ",
                        elevator.id.0,
                        elevator.passengers.len()
                    ));
                }
            }

            println!(
                "{:>3} |{}| {:>2} waiting | {}",
                floor_num,
                lamps,
                floor.waiting_count(),
                cars
            );
        }
        println!();
    }
}
