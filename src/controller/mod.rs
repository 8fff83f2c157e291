//! Elevator dispatch controller
//!
//! All scheduling logic lives here, independent of the simulation harness:
//! the request ledger, the per-elevator state tracker, the dispatcher and
//! the per-tick controller loop. The host feeds events in through
//! [`Controller::on_floor_event`] / [`Controller::on_elevator_event`] and
//! ticks through [`Controller::update`].

mod context;
mod dispatcher;
mod request;
mod snapshot;
mod types;

pub use context::Controller;
pub use dispatcher::Dispatcher;
pub use request::{PickupRequest, RequestLedger};
pub use snapshot::{diff, ElevatorSnapshot, SnapshotField, StateTracker};
pub use types::{
    Direction, ElevatorApi, ElevatorEvent, ElevatorId, FloorEvent, RequestId, TravelDirection,
};
