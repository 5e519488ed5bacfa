//! Events published after a protocol operation commits.

use attest_governance::GovernanceEvent;
use attest_types::{Address, ClaimId, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    TaskCreated {
        task_id: TaskId,
        committee: Vec<Address>,
    },
    TaskVerified {
        task_id: TaskId,
        identifier: ClaimId,
        endorsers: Vec<Address>,
    },
    /// Stake, reward, registry and administration changes.
    Governance(GovernanceEvent),
}

/// Synchronous fan-out of committed events.
///
/// Listeners run inline on the thread that committed the operation, after
/// the state lock has been released.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ProtocolEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ProtocolEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ProtocolEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::Amount;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));
        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&ProtocolEvent::Governance(GovernanceEvent::Slashed {
            amount: Amount::new(1),
        }));
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn events_serialize_to_json() {
        let event = ProtocolEvent::TaskCreated {
            task_id: 2,
            committee: vec![Address::new([1; 20])],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("TaskCreated"));
        let back: ProtocolEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
