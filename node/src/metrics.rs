//! Prometheus metrics for the protocol node.
//!
//! [`ProtocolMetrics`] owns a dedicated [`Registry`]; [`ProtocolMetrics::render`]
//! encodes it in the Prometheus text exposition format.

use prometheus::{
    register_gauge_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Encoder, Gauge, IntCounter, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::state::ProtocolState;
use crate::NodeError;

pub struct ProtocolMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    pub tasks_created: IntCounter,
    pub verifications_accepted: IntCounter,
    /// Verification calls that failed, for any reason.
    pub verifications_rejected: IntCounter,
    /// Individual attestor slashes, fraud penalties included.
    pub attestors_slashed: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Total bonded stake, in raw units.
    pub total_staked: Gauge,
    /// Total slashed stake, in raw units.
    pub total_slashed: Gauge,
    pub registered_attestors: IntGauge,
    pub current_task: IntGauge,
}

impl ProtocolMetrics {
    pub fn new() -> Result<Self, NodeError> {
        let registry = Registry::new();

        let tasks_created = register_int_counter_with_registry!(
            Opts::new("attest_tasks_created_total", "Total verification tasks created"),
            registry
        )?;
        let verifications_accepted = register_int_counter_with_registry!(
            Opts::new(
                "attest_verifications_accepted_total",
                "Verification calls that reached consensus"
            ),
            registry
        )?;
        let verifications_rejected = register_int_counter_with_registry!(
            Opts::new(
                "attest_verifications_rejected_total",
                "Verification calls that failed"
            ),
            registry
        )?;
        let attestors_slashed = register_int_counter_with_registry!(
            Opts::new("attest_attestors_slashed_total", "Individual attestor slashes"),
            registry
        )?;

        let total_staked = register_gauge_with_registry!(
            Opts::new("attest_total_staked_raw", "Total bonded stake in raw units"),
            registry
        )?;
        let total_slashed = register_gauge_with_registry!(
            Opts::new("attest_total_slashed_raw", "Total slashed stake in raw units"),
            registry
        )?;
        let registered_attestors = register_int_gauge_with_registry!(
            Opts::new("attest_registered_attestors", "Attestors in the registry"),
            registry
        )?;
        let current_task = register_int_gauge_with_registry!(
            Opts::new("attest_current_task", "Id of the most recent task"),
            registry
        )?;

        Ok(Self {
            registry,
            tasks_created,
            verifications_accepted,
            verifications_rejected,
            attestors_slashed,
            total_staked,
            total_slashed,
            registered_attestors,
            current_task,
        })
    }

    /// Refresh the gauges from committed state.
    pub fn observe(&self, state: &ProtocolState) {
        let ledger = state.governance.ledger();
        self.total_staked.set(ledger.total_staked().raw() as f64);
        self.total_slashed.set(ledger.total_slashed().raw() as f64);
        self.registered_attestors
            .set(state.governance.registry().len() as i64);
        self.current_task
            .set(i64::try_from(state.tasks.current_task()).unwrap_or(i64::MAX));
    }

    /// Encode every metric in the Prometheus text format.
    pub fn render(&self) -> Result<String, NodeError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_registered_metrics() {
        let metrics = ProtocolMetrics::new().unwrap();
        metrics.tasks_created.inc();
        metrics.registered_attestors.set(3);
        let text = metrics.render().unwrap();
        assert!(text.contains("attest_tasks_created_total 1"));
        assert!(text.contains("attest_registered_attestors 3"));
    }
}
