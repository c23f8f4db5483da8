//! Opaque signature storage per record.
//!
//! One blob per live record: inserted at issuance, removed at burn.
//! Verification is byte-exact comparison, nothing cryptographic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cpd_ledger_core::{RecordId, SignatureBlob};

/// Maps record ids to their stored signature blobs.
///
/// Invariant (maintained by the ledger): the key set equals the set of
/// live record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureStore {
    by_record: BTreeMap<RecordId, SignatureBlob>,
}

impl SignatureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the signature for a newly issued record.
    pub fn insert(&mut self, id: RecordId, signature: SignatureBlob) {
        self.by_record.insert(id, signature);
    }

    /// Remove the signature of a burned record.
    pub fn remove(&mut self, id: RecordId) -> Option<SignatureBlob> {
        self.by_record.remove(&id)
    }

    /// Whether a signature is stored for the given record.
    pub fn contains(&self, id: RecordId) -> bool {
        self.by_record.contains_key(&id)
    }

    /// Byte-exact comparison of a candidate against the stored blob.
    ///
    /// Returns false when no signature is stored for the record.
    pub fn verify(&self, id: RecordId, candidate: &[u8]) -> bool {
        match self.by_record.get(&id) {
            Some(stored) => stored.as_ref() == candidate,
            None => false,
        }
    }

    /// Number of stored signatures.
    pub fn len(&self) -> usize {
        self.by_record.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.by_record.is_empty()
    }

    /// Iterate over stored record ids.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.by_record.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_matches_exact_bytes() {
        let mut store = SignatureStore::new();
        let sig = SignatureBlob::from_bytes([0x11; 65]);
        store.insert(RecordId(1), sig);

        assert!(store.verify(RecordId(1), &[0x11; 65]));
        assert!(!store.verify(RecordId(1), &[0x12; 65]));
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        let mut store = SignatureStore::new();
        store.insert(RecordId(1), SignatureBlob::from_bytes([0x11; 65]));

        assert!(!store.verify(RecordId(1), &[0x11; 64]));
        assert!(!store.verify(RecordId(1), &[]));
    }

    #[test]
    fn test_verify_absent_record_is_false() {
        let store = SignatureStore::new();
        assert!(!store.verify(RecordId(9), &[0x00; 65]));
    }

    #[test]
    fn test_remove_returns_blob() {
        let mut store = SignatureStore::new();
        let sig = SignatureBlob::from_bytes([0xaa; 65]);
        store.insert(RecordId(3), sig);

        assert_eq!(store.remove(RecordId(3)), Some(sig));
        assert!(store.is_empty());
        assert_eq!(store.remove(RecordId(3)), None);
    }
}
