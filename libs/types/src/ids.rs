//! Unique identifier types for registry entities
//!
//! Accounts use UUID v7 so they sort by creation time. Campaigns use the
//! sequential index the registry assigns at creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of an owner or donor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new AccountId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a campaign
///
/// Assigned once by the registry and never reused. The value equals the
/// campaign's position in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(u64);

impl CampaignId {
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Position in the registry's creation-ordered list
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let id1 = AccountId::new();
        let id2 = AccountId::new();
        assert_ne!(id1, id2, "AccountIds should be unique");
    }

    #[test]
    fn test_account_id_serialization() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_campaign_id_index() {
        let id = CampaignId::new(7);
        assert_eq!(id.as_u64(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_campaign_id_is_transparent_in_json() {
        let json = serde_json::to_string(&CampaignId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_campaign_ids_order_by_creation() {
        assert!(CampaignId::new(1) < CampaignId::new(2));
    }
}
