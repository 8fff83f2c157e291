//! Request-to-elevator assignment
//!
//! A reactive state machine driven by elevator and floor events: claims
//! outstanding pickups for idle elevators, decides in-transit stops, and
//! retires requests when they are served. Assignment only ever happens
//! here, never in the per-tick controller loop.

use log::{error, info};

use super::request::{PickupRequest, RequestLedger};
use super::types::{Direction, ElevatorApi, ElevatorId, RequestId, TravelDirection};

/// Assigns pickup requests to elevators and tracks completed trips.
#[derive(Debug)]
pub struct Dispatcher {
    /// Elevators with nothing to do, most recently idled last. Claims pop
    /// from the back, so the most-recently-idle car is served first.
    idle_pool: Vec<ElevatorId>,
    /// Fulfilled requests per elevator, in fulfillment order.
    completed: Vec<Vec<PickupRequest>>,
}

impl Dispatcher {
    pub fn new(elevator_count: usize) -> Self {
        Self {
            idle_pool: Vec::new(),
            completed: vec![Vec::new(); elevator_count],
        }
    }

    pub fn idle_pool(&self) -> &[ElevatorId] {
        &self.idle_pool
    }

    pub fn completed_trips(&self, id: ElevatorId) -> &[PickupRequest] {
        &self.completed[id.0]
    }

    fn leave_idle_pool(&mut self, id: ElevatorId) {
        self.idle_pool.retain(|&e| e != id);
    }

    /// Claim `request_id` for `id` and send the car to the origin floor.
    fn claim_and_send<E: ElevatorApi>(
        &mut self,
        ledger: &mut RequestLedger,
        id: ElevatorId,
        request_id: RequestId,
        elevators: &mut [E],
        now: f64,
    ) -> bool {
        let Some(floor) = ledger.get(request_id).map(|r| r.floor) else {
            return false;
        };
        if !ledger.claim(request_id, id, now) {
            return false;
        }
        elevators[id.0].go_to_floor(floor, false);
        self.leave_idle_pool(id);
        true
    }

    /// An elevator drained its destination queue. Claim the oldest
    /// outstanding pickup if one exists, otherwise join the idle pool.
    pub fn on_idle<E: ElevatorApi>(
        &mut self,
        ledger: &mut RequestLedger,
        id: ElevatorId,
        elevators: &mut [E],
        now: f64,
    ) {
        match ledger.oldest_outstanding() {
            Some(request_id) => {
                self.claim_and_send(ledger, id, request_id, elevators, now);
            }
            None => {
                if !self.idle_pool.contains(&id) {
                    self.idle_pool.push(id);
                }
            }
        }
    }

    /// A pickup request was just created. If an idle elevator is available
    /// it claims the request immediately; otherwise the request stays
    /// outstanding until the next idle event.
    pub fn on_pickup_created<E: ElevatorApi>(
        &mut self,
        ledger: &mut RequestLedger,
        request_id: RequestId,
        elevators: &mut [E],
        now: f64,
    ) {
        let Some(&id) = self.idle_pool.last() else {
            return;
        };
        self.claim_and_send(ledger, id, request_id, elevators, now);
    }

    /// Fired shortly before `floor` is reached without a scheduled stop.
    /// If a passenger inside wants out here, stop now rather than after the
    /// queue drains; a pickup we claimed at this floor is served by the
    /// same stop.
    pub fn on_passing_floor<E: ElevatorApi>(
        &mut self,
        ledger: &mut RequestLedger,
        id: ElevatorId,
        floor: usize,
        _direction: Direction,
        elevators: &mut [E],
        now: f64,
    ) {
        if !elevators[id.0].pressed_floors().contains(&floor) {
            return;
        }
        elevators[id.0].go_to_floor(floor, true);

        let claimed_here: Vec<RequestId> = ledger
            .at_floor(floor)
            .filter(|r| r.claimed_by(id))
            .map(|r| r.id)
            .collect();
        for request_id in claimed_here {
            if let Some(request) = ledger.fulfill(request_id, id, now) {
                info!(
                    "elevator {} serves request {:?} early while passing floor {}",
                    id.0, request.id, floor
                );
                self.completed[id.0].push(request);
            }
        }
    }

    /// A passenger inside pressed a destination button. Always honored.
    pub fn on_floor_button<E: ElevatorApi>(&mut self, id: ElevatorId, floor: usize, elevators: &mut [E]) {
        elevators[id.0].go_to_floor(floor, false);
        self.leave_idle_pool(id);
    }

    /// The elevator stopped at `floor`, about to move in `direction`.
    /// Fulfills every request at this floor we claimed and whose direction
    /// agrees with the stop; a request claimed by a different elevator at
    /// this floor is an accidental pickup and gets reported.
    pub fn on_stopped<E: ElevatorApi>(
        &mut self,
        ledger: &mut RequestLedger,
        id: ElevatorId,
        floor: usize,
        direction: TravelDirection,
        elevators: &mut [E],
        now: f64,
    ) {
        let accidental = ledger
            .at_floor(floor)
            .filter(|r| r.is_claimed() && !r.claimed_by(id))
            .count();
        if accidental > 0 {
            error!(
                "ALERT: {} accidental pickup(s) by elevator {} at floor {}",
                accidental, id.0, floor
            );
        }

        let served: Vec<RequestId> = ledger
            .at_floor(floor)
            .filter(|r| r.claimed_by(id) && direction.agrees_with(r.direction))
            .map(|r| r.id)
            .collect();
        for request_id in served {
            if let Some(request) = ledger.fulfill(request_id, id, now) {
                info!(
                    "elevator {} fulfilled request {:?} at floor {} after {:.3}s",
                    id.0,
                    request.id,
                    floor,
                    now - request.creation_time
                );
                self.completed[id.0].push(request);
            }
        }

        // Lamps shown to boarding passengers follow where the car goes next.
        let (up, down) = match direction {
            TravelDirection::Up => (true, false),
            TravelDirection::Down => (false, true),
            TravelDirection::Stopped => (true, true),
        };
        elevators[id.0].set_indicators(up, down);
    }
}
