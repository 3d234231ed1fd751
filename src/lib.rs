//! Flock - church membership and offerings
//!
//! Member update sessions with role promotion, search query building, cached
//! search results and a typed client for the membership REST API.
//!
//! ```text
//! MemberRecord ──► MemberUpdateForm ──promote()──► PromotionRule::evaluate
//!                        │                              │
//!                        │◄──── PromotionOutcome ───────┘
//!                        ▼
//!               UpdateMemberRequest ──► ApiClient::update_member
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod promotion;
pub mod report;
pub mod store;
pub mod telemetry;

pub use flock_types;

pub use client::ApiClient;
pub use config::FlockConfig;
pub use error::{ApiError, ConfigError, FlockError, FormError, Result};
pub use form::MemberUpdateForm;
pub use promotion::{promotion_rule_for, PromotionEdge, PromotionOutcome, PromotionRule};
pub use report::{summarize_offerings, OfferingSummary};
pub use store::{SearchResultStore, SearchStores};
