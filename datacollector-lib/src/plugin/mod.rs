//! Provider interfaces
//!
//! A [`Provider`] supplies the command grammar and the domain documents for one middleware.
//! The CLI only ever reaches providers through a [`ProviderRegistry`], so how providers are
//! discovered stays outside the pipeline.

mod provider;
mod registry;

pub use provider::Provider;
pub use registry::{ProviderRegistry, StaticRegistry};
