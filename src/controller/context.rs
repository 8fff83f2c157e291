//! Controller context: simulated clock, components and event entry points
//!
//! The single object the host hands events and ticks to. The original
//! publish/subscribe callback registration becomes an explicit dispatch
//! table (a match on the event enum), and the clock and request list are
//! fields here rather than ambient globals.

use super::dispatcher::Dispatcher;
use super::request::{PickupRequest, RequestLedger};
use super::snapshot::{ElevatorSnapshot, StateTracker};
use super::types::{ElevatorApi, ElevatorEvent, ElevatorId, FloorEvent};

/// The dispatch controller for one bank of elevators.
///
/// `elevator_count` passed at construction must match the length of the
/// elevator slice handed to every entry point; elevators are addressed by
/// index.
#[derive(Debug)]
pub struct Controller {
    clock: f64,
    ledger: RequestLedger,
    dispatcher: Dispatcher,
    tracker: StateTracker,
}

impl Controller {
    pub fn new(elevator_count: usize) -> Self {
        Self {
            clock: 0.0,
            ledger: RequestLedger::new(),
            dispatcher: Dispatcher::new(elevator_count),
            tracker: StateTracker::new(elevator_count),
        }
    }

    /// Simulated time, rounded to milliseconds.
    pub fn now(&self) -> f64 {
        (self.clock * 1000.0).round() / 1000.0
    }

    pub fn ledger(&self) -> &RequestLedger {
        &self.ledger
    }

    pub fn completed_trips(&self, id: ElevatorId) -> &[PickupRequest] {
        self.dispatcher.completed_trips(id)
    }

    pub fn idle_pool(&self) -> &[ElevatorId] {
        self.dispatcher.idle_pool()
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    /// Entry point for floor call buttons: records the pickup request and
    /// lets the dispatcher assign it if an idle elevator is available.
    pub fn on_floor_event<E: ElevatorApi>(&mut self, floor: usize, event: FloorEvent, elevators: &mut [E]) {
        let now = self.now();
        let request_id = self.ledger.create_pickup(floor, event.direction(), now);
        self.dispatcher
            .on_pickup_created(&mut self.ledger, request_id, elevators, now);
    }

    /// Entry point for elevator events.
    pub fn on_elevator_event<E: ElevatorApi>(
        &mut self,
        id: ElevatorId,
        event: ElevatorEvent,
        elevators: &mut [E],
    ) {
        let now = self.now();
        match event {
            ElevatorEvent::Idle => self.dispatcher.on_idle(&mut self.ledger, id, elevators, now),
            ElevatorEvent::FloorButtonPressed(floor) => {
                self.dispatcher.on_floor_button(id, floor, elevators)
            }
            ElevatorEvent::PassingFloor(floor, direction) => self
                .dispatcher
                .on_passing_floor(&mut self.ledger, id, floor, direction, elevators, now),
            ElevatorEvent::StoppedAtFloor(floor, direction) => self
                .dispatcher
                .on_stopped(&mut self.ledger, id, floor, direction, elevators, now),
        }
    }

    /// Per-tick entry point: advance the clock, then snapshot every
    /// elevator, diff against the previous tick and report changes.
    /// Performs no assignment; that is all event-driven.
    pub fn update<E: ElevatorApi>(&mut self, delta: f64, elevators: &[E]) {
        self.clock += delta;
        let now = self.now();
        for (index, elevator) in elevators.iter().enumerate() {
            let snapshot = ElevatorSnapshot::capture(elevator);
            self.tracker.observe(ElevatorId(index), snapshot, now);
        }
    }
}
