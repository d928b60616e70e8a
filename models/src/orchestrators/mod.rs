//! The released orchestrator versions and the upgrade paths between them.
pub mod error;

use self::error::{InvalidVersionSnafu, Result, UnknownReleaseSnafu, UnsupportedOrchestratorSnafu};
pub use self::error::Error as OrchestratorError;
use crate::api::{OrchestratorProfile, OrchestratorType, OrchestratorVersionProfile};
use crate::constants::{DOCKER_CE_VERSION, SWARM_VERSION};

use semver::Version;
use snafu::ResultExt;

const KUBERNETES_VERSIONS: &[&str] = &[
    "1.10.12", "1.10.13", "1.11.9", "1.11.10", "1.12.7", "1.12.8", "1.13.10", "1.13.11", "1.14.6",
    "1.14.7", "1.15.3", "1.15.4", "1.16.0", "1.16.1",
];
const KUBERNETES_DEFAULT_VERSION: &str = "1.13.11";

const DCOS_VERSIONS: &[&str] = &["1.8.8", "1.9.0", "1.9.8", "1.10.0", "1.11.0", "1.11.2"];
const DCOS_DEFAULT_VERSION: &str = "1.11.2";

const SWARM_VERSIONS: &[&str] = &[SWARM_VERSION];
const SWARM_MODE_VERSIONS: &[&str] = &[DOCKER_CE_VERSION];

const ORCHESTRATORS: &[OrchestratorType] = &[
    OrchestratorType::Kubernetes,
    OrchestratorType::Dcos,
    OrchestratorType::Swarm,
    OrchestratorType::SwarmMode,
];

/// Whether `actual` is a semantic version at least `minimum`. Unparsable versions never are.
pub fn is_version_ge(actual: &str, minimum: &str) -> bool {
    match (parse(actual), parse(minimum)) {
        (Ok(actual), Ok(minimum)) => actual >= minimum,
        _ => false,
    }
}

fn parse(version: &str) -> std::result::Result<Version, semver::Error> {
    Version::parse(version.trim_start_matches('v'))
}

/// Whether the orchestrator's versions are semantic versions with upgrade paths.
fn is_versioned(orchestrator: OrchestratorType) -> bool {
    matches!(
        orchestrator,
        OrchestratorType::Kubernetes | OrchestratorType::Dcos
    )
}

/// Released versions of an orchestrator, oldest first.
pub fn supported_versions(orchestrator: OrchestratorType) -> Result<&'static [&'static str]> {
    match orchestrator {
        OrchestratorType::Kubernetes => Ok(KUBERNETES_VERSIONS),
        OrchestratorType::Dcos => Ok(DCOS_VERSIONS),
        OrchestratorType::Swarm => Ok(SWARM_VERSIONS),
        OrchestratorType::SwarmMode => Ok(SWARM_MODE_VERSIONS),
        OrchestratorType::Mesos => UnsupportedOrchestratorSnafu { orchestrator }.fail(),
    }
}

pub fn default_version(orchestrator: OrchestratorType) -> Result<&'static str> {
    match orchestrator {
        OrchestratorType::Kubernetes => Ok(KUBERNETES_DEFAULT_VERSION),
        OrchestratorType::Dcos => Ok(DCOS_DEFAULT_VERSION),
        OrchestratorType::Swarm => Ok(SWARM_VERSION),
        OrchestratorType::SwarmMode => Ok(DOCKER_CE_VERSION),
        OrchestratorType::Mesos => UnsupportedOrchestratorSnafu { orchestrator }.fail(),
    }
}

/// Resolves a `major.minor` release to its latest released patch version. An empty release
/// resolves to the default version.
pub fn latest_release_version(orchestrator: OrchestratorType, release: &str) -> Result<String> {
    if release.is_empty() {
        return default_version(orchestrator).map(str::to_string);
    }
    let versions = supported_versions(orchestrator)?;
    if !is_versioned(orchestrator) {
        return Ok(versions.last().copied().unwrap_or_default().to_string());
    }

    let prefix = format!("{}.", release.trim_end_matches('.'));
    let mut latest: Option<Version> = None;
    for candidate in versions.iter().filter(|v| v.starts_with(&prefix)) {
        let candidate = parse(candidate).context(InvalidVersionSnafu {
            orchestrator,
            version: *candidate,
        })?;
        if latest.as_ref().map(|l| candidate > *l).unwrap_or(true) {
            latest = Some(candidate);
        }
    }
    match latest {
        Some(version) => Ok(version.to_string()),
        None => UnknownReleaseSnafu {
            orchestrator,
            release,
        }
        .fail(),
    }
}

/// The released versions `current` can upgrade to: later patches of its own minor release and
/// every patch of the next minor release.
fn upgrades(orchestrator: OrchestratorType, current: &str) -> Result<Vec<OrchestratorProfile>> {
    if !is_versioned(orchestrator) {
        return Ok(Vec::new());
    }
    let current = parse(current).context(InvalidVersionSnafu {
        orchestrator,
        version: current,
    })?;

    let mut targets = Vec::new();
    for candidate in supported_versions(orchestrator)? {
        let version = parse(candidate).context(InvalidVersionSnafu {
            orchestrator,
            version: *candidate,
        })?;
        if version > current
            && version.major == current.major
            && (version.minor == current.minor || version.minor == current.minor + 1)
        {
            targets.push(OrchestratorProfile::new(orchestrator, *candidate));
        }
    }
    Ok(targets)
}

/// The catalog entry of a cluster's orchestrator: its version, whether that is the default, and
/// its upgrade targets. An empty version stands for the default version.
pub fn version_profile(profile: &OrchestratorProfile) -> Result<OrchestratorVersionProfile> {
    let orchestrator = profile.orchestrator_type;
    let default = default_version(orchestrator)?;
    let version = if profile.orchestrator_version.is_empty() {
        default
    } else {
        profile.orchestrator_version.as_str()
    };

    Ok(OrchestratorVersionProfile {
        orchestrator_profile: OrchestratorProfile::new(orchestrator, version),
        default: version == default,
        upgrades: upgrades(orchestrator, version)?,
    })
}

/// Profiles of every released version, optionally restricted to one orchestrator.
pub fn version_profiles(
    filter: Option<OrchestratorType>,
) -> Result<Vec<OrchestratorVersionProfile>> {
    let orchestrators = match filter {
        Some(orchestrator) => vec![orchestrator],
        None => ORCHESTRATORS.to_vec(),
    };

    let mut profiles = Vec::new();
    for orchestrator in orchestrators {
        for version in supported_versions(orchestrator)? {
            profiles.push(version_profile(&OrchestratorProfile::new(
                orchestrator,
                *version,
            ))?);
        }
    }
    Ok(profiles)
}
