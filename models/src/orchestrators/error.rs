use crate::api::OrchestratorType;

use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Orchestrator '{}' has no supported versions", orchestrator))]
    UnsupportedOrchestrator { orchestrator: OrchestratorType },

    #[snafu(display("Invalid {} version '{}': '{}'", orchestrator, version, source))]
    InvalidVersion {
        source: semver::Error,
        orchestrator: OrchestratorType,
        version: String,
    },

    #[snafu(display("No {} version matches release '{}'", orchestrator, release))]
    UnknownRelease {
        orchestrator: OrchestratorType,
        release: String,
    },
}
