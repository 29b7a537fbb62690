//! Field sync: resolve configured mappings against both schemas and apply
//! the resulting plan to HubSpot

pub mod logic;
pub mod types;

pub use types::{
    Decision, ObjectFailure, ObjectPlan, ObjectSyncReport, ResolvedItem, SyncOutcome, SyncResult,
    SyncRun, SyncSummary,
};

