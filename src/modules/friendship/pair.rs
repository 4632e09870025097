use std::cmp::Ordering;

use uuid::Uuid;

use crate::api::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Requester,
    Addressee,
}

/// Unordered pair of two distinct accounts, stored as `low < high`.
///
/// This is the identity of a relationship: `UserPair::new(a, b)` and
/// `UserPair::new(b, a)` are equal, and the store looks rows up by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserPair {
    low: Uuid,
    high: Uuid,
}

impl UserPair {
    pub fn new(a: Uuid, b: Uuid) -> Result<Self, error::SystemError> {
        match a.cmp(&b) {
            Ordering::Less => Ok(UserPair { low: a, high: b }),
            Ordering::Greater => Ok(UserPair { low: b, high: a }),
            Ordering::Equal => {
                Err(error::SystemError::invalid_pair("Cannot form a relationship with yourself"))
            }
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.low == *id || self.high == *id
    }
}

/// A pair that remembers who initiated the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedPair {
    requester: Uuid,
    addressee: Uuid,
    pair: UserPair,
}

impl DirectedPair {
    pub fn new(requester: Uuid, addressee: Uuid) -> Result<Self, error::SystemError> {
        let pair = UserPair::new(requester, addressee)?;
        Ok(DirectedPair { requester, addressee, pair })
    }

    pub fn requester(&self) -> Uuid {
        self.requester
    }

    pub fn addressee(&self) -> Uuid {
        self.addressee
    }

    pub fn pair(&self) -> UserPair {
        self.pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_order_independent() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let ab = UserPair::new(a, b).unwrap();
        let ba = UserPair::new(b, a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab.low() < ab.high());
        assert!(ab.contains(&a) && ab.contains(&b));
        assert!(!ab.contains(&Uuid::now_v7()));
    }

    #[test]
    fn test_pair_rejects_self() {
        let a = Uuid::now_v7();
        assert!(matches!(UserPair::new(a, a), Err(error::SystemError::InvalidPair(_))));
        assert!(matches!(DirectedPair::new(a, a), Err(error::SystemError::InvalidPair(_))));
    }

    #[test]
    fn test_directed_pair_keeps_roles() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let directed = DirectedPair::new(b, a).unwrap();
        assert_eq!(directed.requester(), b);
        assert_eq!(directed.addressee(), a);
        assert_eq!(directed.pair(), UserPair::new(a, b).unwrap());
    }
}
