//! Pickup request ledger
//!
//! Owns the working set of outstanding and claimed pickup requests and their
//! lifecycle transitions (created -> claimed -> fulfilled). Fulfilled
//! requests are handed back to the caller and never revisited.

use log::{error, info, warn};
use ordered_float::OrderedFloat;

use super::types::{Direction, ElevatorId, RequestId};

/// One passenger's request for transport, created by a floor call button.
///
/// All fields exist from construction; the optional ones are populated as
/// the request moves through its lifecycle. `claim_time` is only ever set
/// together with `claiming_elevator`, and `fulfillment_time` only after
/// both.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupRequest {
    pub id: RequestId,
    /// Origin floor of the pickup leg
    pub floor: usize,
    /// Desired travel direction from the origin
    pub direction: Direction,
    pub creation_time: f64,
    pub claim_time: Option<f64>,
    pub claiming_elevator: Option<ElevatorId>,
    pub fulfillment_time: Option<f64>,
}

impl PickupRequest {
    fn new(id: RequestId, floor: usize, direction: Direction, now: f64) -> Self {
        Self {
            id,
            floor,
            direction,
            creation_time: now,
            claim_time: None,
            claiming_elevator: None,
            fulfillment_time: None,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.claiming_elevator.is_some()
    }

    pub fn claimed_by(&self, elevator: ElevatorId) -> bool {
        self.claiming_elevator == Some(elevator)
    }
}

/// Working set of not-yet-fulfilled pickup requests, in creation order.
#[derive(Debug, Default)]
pub struct RequestLedger {
    pending: Vec<PickupRequest>,
    next_id: u64,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pickup request. No elevator is touched; assignment is
    /// the dispatcher's decision.
    pub fn create_pickup(&mut self, floor: usize, direction: Direction, now: f64) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        info!(
            "new pickup request {:?}: floor {} going {} (t={:.3})",
            id, floor, direction, now
        );
        self.pending.push(PickupRequest::new(id, floor, direction, now));
        id
    }

    /// Bind `elevator` to the request. A second claim is rejected and the
    /// original claimant preserved.
    pub fn claim(&mut self, id: RequestId, elevator: ElevatorId, now: f64) -> bool {
        let Some(request) = self.pending.iter_mut().find(|r| r.id == id) else {
            warn!("claim for unknown request {:?} by elevator {}", id, elevator.0);
            return false;
        };
        if let Some(owner) = request.claiming_elevator {
            warn!(
                "request {:?} already claimed by elevator {}; claim by elevator {} rejected",
                id, owner.0, elevator.0
            );
            return false;
        }
        request.claiming_elevator = Some(elevator);
        request.claim_time = Some(now);
        info!(
            "elevator {} claimed request {:?} at floor {} (t={:.3})",
            elevator.0, id, request.floor, now
        );
        true
    }

    /// Retire the request as served by `elevator`. The stopping elevator
    /// must equal the claimant; a mismatch signals a dispatch bug and is
    /// reported without touching the request.
    pub fn fulfill(&mut self, id: RequestId, elevator: ElevatorId, now: f64) -> Option<PickupRequest> {
        let index = self.pending.iter().position(|r| r.id == id)?;
        let claimant = self.pending[index].claiming_elevator;
        if claimant != Some(elevator) {
            error!(
                "ALERT: elevator {} attempted to fulfill request {:?} claimed by {:?}",
                elevator.0,
                id,
                claimant.map(|e| e.0)
            );
            return None;
        }
        let mut request = self.pending.remove(index);
        request.fulfillment_time = Some(now);
        Some(request)
    }

    /// All not-yet-fulfilled requests, in creation order.
    pub fn pending(&self) -> &[PickupRequest] {
        &self.pending
    }

    /// Requests with no claimant, in creation order.
    pub fn outstanding(&self) -> impl Iterator<Item = &PickupRequest> {
        self.pending.iter().filter(|r| !r.is_claimed())
    }

    /// The unclaimed request that has waited longest.
    pub fn oldest_outstanding(&self) -> Option<RequestId> {
        self.outstanding()
            .min_by_key(|r| OrderedFloat(r.creation_time))
            .map(|r| r.id)
    }

    /// Not-yet-fulfilled requests originating at `floor`.
    pub fn at_floor(&self, floor: usize) -> impl Iterator<Item = &PickupRequest> {
        self.pending.iter().filter(move |r| r.floor == floor)
    }

    pub fn get(&self, id: RequestId) -> Option<&PickupRequest> {
        self.pending.iter().find(|r| r.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding().count()
    }
}
