//! Role registry state.

use borsh::{BorshDeserialize, BorshSerialize};
use custody_primitives::Address;
use serde::{Deserialize, Serialize};

/// Custodian identity and the broker set.
///
/// The custodian is the zero address until one is set. Brokers are kept in
/// insertion order, removal swaps the last broker into the freed slot.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct MembersState {
    owner: Address,
    custodian: Address,
    brokers: Vec<Address>,
}

impl MembersState {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            custodian: Address::zero(),
            brokers: Vec::new(),
        }
    }

    pub const fn owner(&self) -> &Address {
        &self.owner
    }

    pub const fn custodian(&self) -> &Address {
        &self.custodian
    }

    pub fn set_custodian(&mut self, custodian: Address) {
        self.custodian = custodian;
    }

    /// True iff `addr` is the custodian. The zero address never is.
    pub fn is_custodian(&self, addr: &Address) -> bool {
        !addr.is_zero() && self.custodian == *addr
    }

    pub fn is_broker(&self, addr: &Address) -> bool {
        self.brokers.contains(addr)
    }

    pub fn broker_at(&self, index: usize) -> Option<&Address> {
        self.brokers.get(index)
    }

    pub fn broker_count(&self) -> usize {
        self.brokers.len()
    }

    pub fn brokers(&self) -> &[Address] {
        &self.brokers
    }

    /// Inserts a broker. Returns false if it was already present.
    pub fn insert_broker(&mut self, broker: Address) -> bool {
        if self.is_broker(&broker) {
            return false;
        }
        self.brokers.push(broker);
        true
    }

    /// Removes a broker with swap-remove. Returns false if it was absent.
    pub fn remove_broker(&mut self, broker: &Address) -> bool {
        match self.brokers.iter().position(|b| b == broker) {
            Some(pos) => {
                self.brokers.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_remove_moves_last_into_slot() {
        let mut m = MembersState::new(Address::repeat_byte(1));
        for b in 10..14 {
            assert!(m.insert_broker(Address::repeat_byte(b)));
        }
        assert!(m.remove_broker(&Address::repeat_byte(11)));
        assert_eq!(m.broker_count(), 3);
        assert_eq!(m.broker_at(1), Some(&Address::repeat_byte(13)));
        assert_eq!(m.broker_at(3), None);
    }

    #[test]
    fn test_duplicate_and_absent() {
        let mut m = MembersState::new(Address::repeat_byte(1));
        assert!(m.insert_broker(Address::repeat_byte(2)));
        assert!(!m.insert_broker(Address::repeat_byte(2)));
        assert!(!m.remove_broker(&Address::repeat_byte(3)));
    }

    #[test]
    fn test_unset_custodian_matches_nobody() {
        let m = MembersState::new(Address::repeat_byte(1));
        assert!(!m.is_custodian(&Address::zero()));
        assert!(!m.is_custodian(&Address::repeat_byte(1)));
    }
}
