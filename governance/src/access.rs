//! Operator access control.
//!
//! The owner holds every privileged right. The task manager is the principal
//! allowed to register rewards and slash attestors on the owner's behalf.

use crate::error::GovernanceError;
use attest_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    task_manager: Option<Address>,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            task_manager: None,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn task_manager(&self) -> Option<Address> {
        self.task_manager
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), GovernanceError> {
        if *caller != self.owner {
            return Err(GovernanceError::Unauthorized(*caller));
        }
        Ok(())
    }

    /// Owner or the authorized task manager.
    pub fn ensure_operator(&self, caller: &Address) -> Result<(), GovernanceError> {
        if *caller == self.owner || Some(*caller) == self.task_manager {
            return Ok(());
        }
        Err(GovernanceError::Unauthorized(*caller))
    }

    pub(crate) fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    pub(crate) fn set_task_manager(&mut self, task_manager: Address) {
        self.task_manager = Some(task_manager);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_manager_is_operator_not_owner() {
        let owner = Address::new([1; 20]);
        let manager = Address::new([2; 20]);
        let mut access = AccessControl::new(owner);
        assert!(access.ensure_operator(&manager).is_err());

        access.set_task_manager(manager);
        assert!(access.ensure_operator(&manager).is_ok());
        assert!(access.ensure_operator(&owner).is_ok());
        assert_eq!(
            access.ensure_owner(&manager),
            Err(GovernanceError::Unauthorized(manager))
        );
    }
}
