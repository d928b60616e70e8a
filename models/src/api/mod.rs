//! The version-independent cluster definition.
//!
//! Every external schema version converts to and from [`ContainerService`]. Besides the data, the
//! model answers the naming and topology questions template generation asks of a cluster.
mod cluster_id;
mod container_service;
mod enums;
pub mod error;
mod orchestrator;
mod profiles;
mod properties;
mod secret;
pub(crate) mod serde_helpers;
mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::cluster_id::ClusterId;
pub use self::container_service::ContainerService;
pub use self::enums::*;
pub use self::error::Error as ModelError;
pub use self::orchestrator::*;
pub use self::profiles::*;
pub use self::properties::{Properties, Topology};
pub use self::secret::Secret;
pub use self::types::*;
