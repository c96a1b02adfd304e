//! Types library for the crowdfunding registry
//!
//! This library provides the value types shared by the campaign contracts
//! and the tooling around them.
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, CampaignId)
//! - `numeric`: Wei-denominated amounts and ether conversion
//! - `campaign`: Campaign status, donation entries, leaderboard entries
//! - `errors`: Unit conversion errors

pub mod ids;
pub mod numeric;
pub mod campaign;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::campaign::*;
    pub use crate::errors::*;
}
