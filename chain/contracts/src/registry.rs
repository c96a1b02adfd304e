//! Registry — creation, identity and paginated listing of campaigns
//!
//! The registry owns every campaign record in creation order. Records are
//! never removed; terminal campaigns stay listed for audit. Mutating
//! operations routed through the registry are appended to its event log.

use crowdfund_types::campaign::DonorPosition;
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use tracing::{debug, info, warn};

use crate::campaign::Campaign;
use crate::config::RegistryConfig;
use crate::custody::Transfer;
use crate::errors::{BoundsError, ConfigError, CrowdfundError};
use crate::events::{CampaignCreated, ContractEvent};

#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    /// Append-only; index == CampaignId
    campaigns: Vec<Campaign>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            campaigns: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            max_page_size = config.max_page_size,
            leaderboard_capacity = config.leaderboard_capacity,
            "Registry initialized"
        );
        Ok(Self {
            config,
            campaigns: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ───────────────────────── Creation ─────────────────────────

    /// Register a new campaign and return its id.
    ///
    /// Emits `CampaignCreated`.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        goal: Amount,
        owner: AccountId,
    ) -> Result<CampaignId, CrowdfundError> {
        let id = CampaignId::new(self.campaigns.len() as u64);
        let campaign = Campaign::new(
            id,
            title,
            description,
            goal,
            owner,
            self.config.leaderboard_capacity,
        )
        .map_err(|err| {
            warn!(owner = %owner, error = %err, "Campaign creation rejected");
            err
        })?;

        let event = ContractEvent::CampaignCreated(CampaignCreated {
            campaign_id: id,
            owner,
            title: campaign.title().to_string(),
            goal,
        });

        self.campaigns.push(campaign);
        self.events.push(event);
        info!(campaign_id = %id, owner = %owner, goal = %goal, "Campaign created");
        Ok(id)
    }

    // ───────────────────────── Listing ─────────────────────────

    /// Campaign ids `[offset, offset + min(limit, max_page_size))` in
    /// creation order, truncated at the end of the list.
    ///
    /// `offset == count` yields an empty page; `offset > count` is an error.
    pub fn list(&self, limit: usize, offset: usize) -> Result<Vec<CampaignId>, BoundsError> {
        let count = self.campaigns.len();
        if offset > count {
            return Err(BoundsError::OffsetOutOfRange { offset, count });
        }

        let limit = limit.min(self.config.max_page_size);
        let end = offset.saturating_add(limit).min(count);
        debug!(offset, limit, returned = end - offset, "Listing campaigns");
        Ok(self.campaigns[offset..end].iter().map(Campaign::id).collect())
    }

    pub fn count(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn campaign(&self, id: CampaignId) -> Result<&Campaign, BoundsError> {
        self.campaigns
            .get(id.index())
            .ok_or(BoundsError::UnknownCampaign { campaign_id: id })
    }

    fn campaign_mut(&mut self, id: CampaignId) -> Result<&mut Campaign, BoundsError> {
        self.campaigns
            .get_mut(id.index())
            .ok_or(BoundsError::UnknownCampaign { campaign_id: id })
    }

    // ───────────────────────── Campaign operations ─────────────────────────

    pub fn donate(
        &mut self,
        id: CampaignId,
        donor: AccountId,
        amount: Amount,
    ) -> Result<ContractEvent, CrowdfundError> {
        let event = self.campaign_mut(id)?.donate(donor, amount)?;
        Ok(self.record(event))
    }

    pub fn complete(
        &mut self,
        id: CampaignId,
        caller: AccountId,
    ) -> Result<ContractEvent, CrowdfundError> {
        let event = self.campaign_mut(id)?.complete(caller)?;
        Ok(self.record(event))
    }

    pub fn cancel(
        &mut self,
        id: CampaignId,
        caller: AccountId,
    ) -> Result<ContractEvent, CrowdfundError> {
        let event = self.campaign_mut(id)?.cancel(caller)?;
        Ok(self.record(event))
    }

    pub fn withdraw<T: Transfer + ?Sized>(
        &mut self,
        id: CampaignId,
        caller: AccountId,
        transfer: &mut T,
    ) -> Result<ContractEvent, CrowdfundError> {
        let event = self.campaign_mut(id)?.withdraw(caller, transfer)?;
        Ok(self.record(event))
    }

    pub fn refund<T: Transfer + ?Sized>(
        &mut self,
        id: CampaignId,
        caller: AccountId,
        transfer: &mut T,
    ) -> Result<ContractEvent, CrowdfundError> {
        let event = self.campaign_mut(id)?.refund(caller, transfer)?;
        Ok(self.record(event))
    }

    fn record(&mut self, event: ContractEvent) -> ContractEvent {
        self.events.push(event.clone());
        event
    }

    // ───────────────────────── Per-user views ─────────────────────────

    /// Ids of every campaign created by `owner`, in creation order.
    pub fn campaigns_by_owner(&self, owner: &AccountId) -> Vec<CampaignId> {
        self.campaigns
            .iter()
            .filter(|c| c.owner() == *owner)
            .map(Campaign::id)
            .collect()
    }

    /// The donor's position in every campaign they gave to.
    pub fn donations_by(&self, donor: &AccountId) -> Vec<DonorPosition> {
        self.campaigns
            .iter()
            .filter_map(|c| c.position_of(donor))
            .collect()
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
