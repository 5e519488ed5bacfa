//! The attestor registry: an insertion-ordered map from host to address.

use crate::error::GovernanceError;
use attest_types::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestorRegistry {
    entries: IndexMap<String, Address>,
}

impl AttestorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `host` to `address`. Hosts are unique; addresses need not be.
    pub fn insert(&mut self, host: &str, address: Address) -> Result<(), GovernanceError> {
        if self.entries.contains_key(host) {
            return Err(GovernanceError::AttestorAlreadyExists(host.to_string()));
        }
        self.entries.insert(host.to_string(), address);
        Ok(())
    }

    /// Remove `host`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, host: &str) -> Result<Address, GovernanceError> {
        self.entries
            .shift_remove(host)
            .ok_or_else(|| GovernanceError::AttestorDoesNotExist(host.to_string()))
    }

    pub fn get(&self, host: &str) -> Option<Address> {
        self.entries.get(host).copied()
    }

    /// Hosts and addresses as two parallel sequences, in registration order.
    pub fn hosts_and_addresses(&self) -> (Vec<String>, Vec<Address>) {
        self.entries
            .iter()
            .map(|(host, address)| (host.clone(), *address))
            .unzip()
    }

    /// Registered addresses in registration order.
    pub fn addresses(&self) -> Vec<Address> {
        self.entries.values().copied().collect()
    }

    pub fn contains_address(&self, address: &Address) -> bool {
        self.entries.values().any(|a| a == address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn duplicate_host_rejected() {
        let mut registry = AttestorRegistry::new();
        registry.insert("wss://a", addr(1)).unwrap();
        assert_eq!(
            registry.insert("wss://a", addr(2)),
            Err(GovernanceError::AttestorAlreadyExists("wss://a".into()))
        );
        assert_eq!(registry.get("wss://a"), Some(addr(1)));
    }

    #[test]
    fn removal_preserves_order() {
        let mut registry = AttestorRegistry::new();
        for (host, n) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            registry.insert(host, addr(n)).unwrap();
        }
        assert_eq!(registry.remove("b").unwrap(), addr(2));

        let (hosts, addresses) = registry.hosts_and_addresses();
        assert_eq!(hosts, vec!["a", "c", "d"]);
        assert_eq!(addresses, vec![addr(1), addr(3), addr(4)]);
        assert!(!registry.contains_address(&addr(2)));
    }

    #[test]
    fn removing_unknown_host_fails() {
        let mut registry = AttestorRegistry::new();
        assert_eq!(
            registry.remove("nowhere"),
            Err(GovernanceError::AttestorDoesNotExist("nowhere".into()))
        );
    }

    #[test]
    fn order_survives_bincode() {
        let mut registry = AttestorRegistry::new();
        registry.insert("z", addr(1)).unwrap();
        registry.insert("a", addr(2)).unwrap();
        let bytes = bincode::serialize(&registry).unwrap();
        let decoded: AttestorRegistry = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.hosts_and_addresses().0, vec!["z", "a"]);
    }
}
