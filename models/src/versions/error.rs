use super::ApiVersion;
use crate::api::OrchestratorType;
use crate::orchestrators::OrchestratorError;

use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("API version '{}' is missing required field '{}'", version, field))]
    MissingField {
        version: ApiVersion,
        field: &'static str,
    },

    #[snafu(display(
        "API version '{}' does not support '{}' for field '{}'",
        version,
        value,
        field
    ))]
    UnsupportedValue {
        version: ApiVersion,
        field: &'static str,
        value: String,
    },

    #[snafu(display(
        "API version '{}' does not allow '{}' for orchestrator '{}'",
        version,
        field,
        orchestrator
    ))]
    MismatchedConfig {
        version: ApiVersion,
        field: &'static str,
        orchestrator: OrchestratorType,
    },

    #[snafu(display(
        "API version '{}' document has both a master profile and a hosted master profile",
        version
    ))]
    AmbiguousTopology { version: ApiVersion },

    #[snafu(display("Document does not declare an apiVersion"))]
    MissingApiVersion,

    #[snafu(display("Unknown API version '{}'", version))]
    UnknownApiVersion { version: String },

    #[snafu(display("Unable to read '{}' document: '{}'", version, source))]
    Deserialize {
        version: ApiVersion,
        source: serde_json::Error,
    },

    #[snafu(display("Unable to write '{}' document: '{}'", version, source))]
    Serialize {
        version: ApiVersion,
        source: serde_json::Error,
    },

    #[snafu(display("Orchestrator catalog lookup for '{}' failed: '{}'", version, source))]
    OrchestratorCatalog {
        version: ApiVersion,
        source: OrchestratorError,
    },
}
