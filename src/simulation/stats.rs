//! Simulation statistics
//!
//! Counters updated by the world as the run progresses, plus the derived
//! metrics the headless runner reports at the end.

use log::info;

use crate::controller::PickupRequest;

/// Accumulated statistics for one simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub passengers_spawned: usize,
    pub passengers_delivered: usize,
    pub requests_created: usize,
    pub requests_fulfilled: usize,
    /// Sum of creation-to-fulfillment waits over fulfilled requests
    pub total_pickup_wait: f64,
    /// Sum of creation-to-claim delays over fulfilled requests
    pub total_claim_delay: f64,
    /// Sum of spawn-to-alight times over delivered passengers
    pub total_journey_time: f64,
    pub elapsed_time: f64,
}

impl SimulationStats {
    /// Fold a retired request into the wait-time aggregates.
    pub fn record_fulfillment(&mut self, request: &PickupRequest) {
        self.requests_fulfilled += 1;
        if let Some(fulfilled) = request.fulfillment_time {
            self.total_pickup_wait += fulfilled - request.creation_time;
        }
        if let Some(claimed) = request.claim_time {
            self.total_claim_delay += claimed - request.creation_time;
        }
    }

    pub fn average_pickup_wait(&self) -> f64 {
        if self.requests_fulfilled == 0 {
            return 0.0;
        }
        self.total_pickup_wait / self.requests_fulfilled as f64
    }

    pub fn average_claim_delay(&self) -> f64 {
        if self.requests_fulfilled == 0 {
            return 0.0;
        }
        self.total_claim_delay / self.requests_fulfilled as f64
    }

    pub fn average_journey_time(&self) -> f64 {
        if self.passengers_delivered == 0 {
            return 0.0;
        }
        self.total_journey_time / self.passengers_delivered as f64
    }

    /// Percentage of spawned passengers that reached their destination.
    pub fn delivery_rate(&self) -> f64 {
        if self.passengers_spawned == 0 {
            return 0.0;
        }
        self.passengers_delivered as f64 / self.passengers_spawned as f64 * 100.0
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        info!("Total passengers spawned: {}", self.passengers_spawned);
        info!("Total passengers delivered: {}", self.passengers_delivered);
        info!("Total requests created: {}", self.requests_created);
        info!("Total requests fulfilled: {}", self.requests_fulfilled);
        info!("Average pickup wait: {:.2}s", self.average_pickup_wait());
        info!("Average claim delay: {:.2}s", self.average_claim_delay());
        info!("Average journey time: {:.2}s", self.average_journey_time());
        info!("Delivery rate: {:.1}%", self.delivery_rate());
    }
}
