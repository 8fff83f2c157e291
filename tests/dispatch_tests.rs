//! Dispatch logic validation
//!
//! Drives the controller through its public event entry points with real
//! simulated elevators and checks the assignment guarantees.

use elevator_sim::controller::{
    diff, Controller, Direction, ElevatorApi, ElevatorEvent, ElevatorId, ElevatorSnapshot,
    FloorEvent, RequestLedger, SnapshotField, TravelDirection,
};
use elevator_sim::simulation::SimElevator;

fn bank(count: usize) -> Vec<SimElevator> {
    (0..count)
        .map(|index| SimElevator::new(ElevatorId(index), 0, 6))
        .collect()
}

#[test]
fn test_exclusive_claim_rejects_second_claimant() {
    let mut ledger = RequestLedger::new();
    let id = ledger.create_pickup(3, Direction::Down, 4.0);

    assert!(ledger.claim(id, ElevatorId(0), 4.0));
    assert!(!ledger.claim(id, ElevatorId(1), 5.0));

    let request = ledger.get(id).unwrap();
    assert_eq!(request.claiming_elevator, Some(ElevatorId(0)));
    assert_eq!(request.claim_time, Some(4.0));
}

#[test]
fn test_fulfillment_requires_claiming_elevator() {
    let mut ledger = RequestLedger::new();
    let id = ledger.create_pickup(5, Direction::Up, 1.0);
    assert!(ledger.claim(id, ElevatorId(0), 1.5));

    // A different elevator must not retire the request
    assert!(ledger.fulfill(id, ElevatorId(1), 2.0).is_none());
    assert_eq!(ledger.pending_count(), 1);

    let request = ledger.fulfill(id, ElevatorId(0), 2.5).expect("claimant fulfills");
    assert_eq!(request.fulfillment_time, Some(2.5));
    assert_eq!(ledger.pending_count(), 0);
}

#[test]
fn test_immediate_assignment_of_idle_elevator() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);
    controller.update(10.0, &elevators);
    controller.on_floor_event(5, FloorEvent::UpButtonPressed, &mut elevators);

    let request = &controller.ledger().pending()[0];
    assert_eq!(request.creation_time, 10.0);
    assert_eq!(request.claim_time, Some(10.0));
    assert_eq!(request.claiming_elevator, Some(ElevatorId(0)));
    assert_eq!(elevators[0].destination_queue().to_vec(), vec![5]);
}

#[test]
fn test_deferred_claim_waits_for_idle() {
    let mut elevators = bank(1);
    elevators[0].go_to_floor(6, false);

    let mut controller = Controller::new(1);
    controller.update(4.0, &elevators);
    controller.on_floor_event(3, FloorEvent::DownButtonPressed, &mut elevators);

    let request = &controller.ledger().pending()[0];
    assert_eq!(request.creation_time, 4.0);
    assert_eq!(request.claiming_elevator, None);
    assert_eq!(request.claim_time, None);

    controller.update(5.0, &elevators);
    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);

    let request = &controller.ledger().pending()[0];
    assert_eq!(request.claiming_elevator, Some(ElevatorId(0)));
    assert_eq!(request.claim_time, Some(9.0));
    assert!(elevators[0].destination_queue().contains(&3));
}

#[test]
fn test_fifo_fairness_oldest_request_first() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.update(1.0, &elevators);
    controller.on_floor_event(2, FloorEvent::UpButtonPressed, &mut elevators);
    controller.update(1.0, &elevators);
    controller.on_floor_event(7, FloorEvent::DownButtonPressed, &mut elevators);

    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);

    let pending = controller.ledger().pending();
    let first = pending.iter().find(|r| r.floor == 2).unwrap();
    let second = pending.iter().find(|r| r.floor == 7).unwrap();
    assert_eq!(first.claiming_elevator, Some(ElevatorId(0)));
    assert_eq!(second.claiming_elevator, None);
    assert_eq!(elevators[0].destination_queue().to_vec(), vec![2]);
}

#[test]
fn test_idle_pool_serves_most_recently_idle_first() {
    let mut elevators = bank(2);
    let mut controller = Controller::new(2);

    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);
    controller.on_elevator_event(ElevatorId(1), ElevatorEvent::Idle, &mut elevators);
    controller.on_floor_event(4, FloorEvent::UpButtonPressed, &mut elevators);

    let request = &controller.ledger().pending()[0];
    assert_eq!(request.claiming_elevator, Some(ElevatorId(1)));
    assert_eq!(elevators[1].destination_queue().to_vec(), vec![4]);
    assert!(elevators[0].destination_queue().is_empty());
    assert_eq!(controller.idle_pool().to_vec(), vec![ElevatorId(0)]);
}

#[test]
fn test_passing_floor_inserts_stop_ahead_of_queue() {
    let mut elevators = bank(1);
    elevators[0].go_to_floor(8, false);
    elevators[0].press_floor(5);

    let mut controller = Controller::new(1);
    controller.on_elevator_event(
        ElevatorId(0),
        ElevatorEvent::PassingFloor(5, Direction::Up),
        &mut elevators,
    );
    assert_eq!(elevators[0].destination_queue().to_vec(), vec![5, 8]);

    // A floor nobody inside asked for does not change the queue
    controller.on_elevator_event(
        ElevatorId(0),
        ElevatorEvent::PassingFloor(6, Direction::Up),
        &mut elevators,
    );
    assert_eq!(elevators[0].destination_queue().to_vec(), vec![5, 8]);
}

#[test]
fn test_passing_floor_preempts_claimed_pickup() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.update(2.0, &elevators);
    controller.on_floor_event(5, FloorEvent::UpButtonPressed, &mut elevators);
    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);

    // Reroute the car past floor 5 with a passenger inside wanting out there
    elevators[0].stop();
    elevators[0].go_to_floor(8, false);
    elevators[0].press_floor(5);

    controller.update(1.0, &elevators);
    controller.on_elevator_event(
        ElevatorId(0),
        ElevatorEvent::PassingFloor(5, Direction::Up),
        &mut elevators,
    );

    assert_eq!(elevators[0].destination_queue().to_vec(), vec![5, 8]);
    assert_eq!(controller.ledger().pending_count(), 0);

    let trips = controller.completed_trips(ElevatorId(0));
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].floor, 5);
    assert_eq!(trips[0].fulfillment_time, Some(3.0));
}

#[test]
fn test_stop_fulfills_matching_direction_only() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.on_floor_event(5, FloorEvent::DownButtonPressed, &mut elevators);
    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);

    // A stop on the way up does not serve a down request
    controller.on_elevator_event(
        ElevatorId(0),
        ElevatorEvent::StoppedAtFloor(5, TravelDirection::Up),
        &mut elevators,
    );
    assert_eq!(controller.ledger().pending_count(), 1);
    assert_eq!(elevators[0].indicators(), (true, false));

    // A final stop with an empty queue serves either direction
    controller.on_elevator_event(
        ElevatorId(0),
        ElevatorEvent::StoppedAtFloor(5, TravelDirection::Stopped),
        &mut elevators,
    );
    assert_eq!(controller.ledger().pending_count(), 0);
    assert_eq!(controller.completed_trips(ElevatorId(0)).len(), 1);
    assert_eq!(elevators[0].indicators(), (true, true));
}

#[test]
fn test_accidental_pickup_is_reported_not_fulfilled() {
    let mut elevators = bank(2);
    let mut controller = Controller::new(2);

    controller.on_floor_event(4, FloorEvent::UpButtonPressed, &mut elevators);
    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);

    // The other elevator stops at the claimed floor; the claim must survive
    controller.on_elevator_event(
        ElevatorId(1),
        ElevatorEvent::StoppedAtFloor(4, TravelDirection::Stopped),
        &mut elevators,
    );

    assert_eq!(controller.ledger().pending_count(), 1);
    assert!(controller.completed_trips(ElevatorId(1)).is_empty());
    let request = &controller.ledger().pending()[0];
    assert_eq!(request.claiming_elevator, Some(ElevatorId(0)));
}

#[test]
fn test_floor_button_always_honored_and_leaves_pool() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::Idle, &mut elevators);
    assert_eq!(controller.idle_pool().to_vec(), vec![ElevatorId(0)]);

    controller.on_elevator_event(ElevatorId(0), ElevatorEvent::FloorButtonPressed(3), &mut elevators);
    assert_eq!(elevators[0].destination_queue().to_vec(), vec![3]);
    assert!(controller.idle_pool().is_empty());
}

#[test]
fn test_snapshot_diff_is_idempotent() {
    let elevator = SimElevator::new(ElevatorId(0), 2, 6);
    let first = ElevatorSnapshot::capture(&elevator);
    let second = ElevatorSnapshot::capture(&elevator);
    assert!(diff(&first, &second).is_empty());
}

#[test]
fn test_raw_diff_keeps_floor_changes() {
    let base = ElevatorSnapshot {
        current_floor: 1,
        destination_direction: TravelDirection::Stopped,
        destination_queue: Vec::new(),
        pressed_floors: Vec::new(),
        load_factor: 0.0,
    };
    let mut moved = base.clone();
    moved.current_floor = 2;

    // The raw diff reports the floor change; reporting filters it out
    assert_eq!(diff(&base, &moved), vec![SnapshotField::CurrentFloor]);
}

#[test]
fn test_tracker_stores_latest_snapshot() {
    let mut elevators = bank(1);
    let mut controller = Controller::new(1);

    controller.update(0.1, &elevators);
    elevators[0].go_to_floor(4, false);
    controller.update(0.1, &elevators);

    let previous = controller.tracker().previous(ElevatorId(0)).unwrap();
    assert_eq!(previous.destination_queue, vec![4]);
}
