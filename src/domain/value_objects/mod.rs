//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_group;
mod skip_reason;

pub use asset_group::AssetGroup;
pub use skip_reason::SkipReason;
