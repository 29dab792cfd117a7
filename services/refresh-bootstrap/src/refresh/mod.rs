//! Refresh attempt, its result, and the startup hook that triggers it.

pub mod bootstrap;
pub mod hook;
pub mod report;

pub use bootstrap::RefreshBootstrap;
pub use hook::LoadHook;
pub use report::{RefreshOutcome, RefreshReport, RefreshStatus};
