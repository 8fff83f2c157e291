//! Per-elevator state snapshots and tick-to-tick diffing
//!
//! Snapshots are recomputed wholesale every tick; the tracker keeps exactly
//! one previous snapshot per elevator for change detection.

use std::fmt;

use log::info;

use super::types::{ElevatorApi, ElevatorId, TravelDirection};

/// Observable elevator state captured once per tick.
///
/// The destination queue and pressed-floor list are copies, never aliases of
/// the live car state.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub current_floor: usize,
    pub destination_direction: TravelDirection,
    pub destination_queue: Vec<usize>,
    pub pressed_floors: Vec<usize>,
    pub load_factor: f32,
}

/// The five observable fields of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotField {
    CurrentFloor,
    DestinationDirection,
    DestinationQueue,
    PressedFloors,
    LoadFactor,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 5] = [
        SnapshotField::CurrentFloor,
        SnapshotField::DestinationDirection,
        SnapshotField::DestinationQueue,
        SnapshotField::PressedFloors,
        SnapshotField::LoadFactor,
    ];
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnapshotField::CurrentFloor => "current_floor",
            SnapshotField::DestinationDirection => "destination_direction",
            SnapshotField::DestinationQueue => "destination_queue",
            SnapshotField::PressedFloors => "pressed_floors",
            SnapshotField::LoadFactor => "load_factor",
        };
        write!(f, "{}", name)
    }
}

impl ElevatorSnapshot {
    pub fn capture(elevator: &impl ElevatorApi) -> Self {
        Self {
            current_floor: elevator.current_floor(),
            destination_direction: elevator.destination_direction(),
            destination_queue: elevator.destination_queue().to_vec(),
            pressed_floors: elevator.pressed_floors(),
            load_factor: elevator.load_factor(),
        }
    }

    /// Rendered value of one field, used for string-equality diffing and
    /// change records.
    pub fn rendered(&self, field: SnapshotField) -> String {
        match field {
            SnapshotField::CurrentFloor => self.current_floor.to_string(),
            SnapshotField::DestinationDirection => self.destination_direction.to_string(),
            SnapshotField::DestinationQueue => format!("{:?}", self.destination_queue),
            SnapshotField::PressedFloors => format!("{:?}", self.pressed_floors),
            SnapshotField::LoadFactor => self.load_factor.to_string(),
        }
    }
}

/// Field-wise diff of two snapshots over their rendered values.
///
/// Includes `current_floor`; consumers that only care about interesting
/// changes filter it out, as [`StateTracker::observe`] does for reporting.
pub fn diff(previous: &ElevatorSnapshot, current: &ElevatorSnapshot) -> Vec<SnapshotField> {
    SnapshotField::ALL
        .iter()
        .copied()
        .filter(|&field| previous.rendered(field) != current.rendered(field))
        .collect()
}

/// Retains the previous tick's snapshot for every elevator.
#[derive(Debug, Default)]
pub struct StateTracker {
    previous: Vec<Option<ElevatorSnapshot>>,
}

impl StateTracker {
    pub fn new(elevator_count: usize) -> Self {
        Self {
            previous: vec![None; elevator_count],
        }
    }

    /// Diff `current` against the stored snapshot, log a change record for
    /// any difference other than `current_floor`, then store `current` as
    /// the new previous snapshot. Returns the raw (unfiltered) diff.
    pub fn observe(&mut self, id: ElevatorId, current: ElevatorSnapshot, now: f64) -> Vec<SnapshotField> {
        let changed = match &self.previous[id.0] {
            Some(previous) => {
                let fields = diff(previous, &current);
                let reported: Vec<SnapshotField> = fields
                    .iter()
                    .copied()
                    .filter(|&field| field != SnapshotField::CurrentFloor)
                    .collect();
                if !reported.is_empty() {
                    let lines: Vec<String> = reported
                        .iter()
                        .map(|&field| {
                            format!(
                                "\t{}: [{} => {}]",
                                field,
                                previous.rendered(field),
                                current.rendered(field)
                            )
                        })
                        .collect();
                    info!("[{:.3}]: elevator {} changes:\n{}", now, id.0, lines.join("\n"));
                }
                fields
            }
            None => Vec::new(),
        };
        self.previous[id.0] = Some(current);
        changed
    }

    pub fn previous(&self, id: ElevatorId) -> Option<&ElevatorSnapshot> {
        self.previous[id.0].as_ref()
    }
}
