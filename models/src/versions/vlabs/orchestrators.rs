//! The orchestrator version listing returned to callers choosing or upgrading a version.
use super::{OrchestratorProfile, API_VERSION};
use crate::api::serde_helpers::is_false;
use crate::api::{self, OrchestratorType};
use crate::orchestrators;
use crate::versions::error::{OrchestratorCatalogSnafu, Result};
use crate::versions::table::ORCHESTRATORS_VLABS;

use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::convert::TryFrom;
use tracing::instrument;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorVersionProfile {
    pub orchestrator_type: String,
    pub orchestrator_version: String,
    #[serde(skip_serializing_if = "is_false")]
    pub default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upgrades: Vec<OrchestratorProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorVersionProfileList {
    pub orchestrators: Vec<OrchestratorVersionProfile>,
}

impl From<&api::OrchestratorVersionProfile> for OrchestratorVersionProfile {
    fn from(profile: &api::OrchestratorVersionProfile) -> Self {
        let orchestrator = &profile.orchestrator_profile;
        OrchestratorVersionProfile {
            orchestrator_type: ORCHESTRATORS_VLABS
                .to_versioned(Some(orchestrator.orchestrator_type)),
            orchestrator_version: orchestrator.orchestrator_version.clone(),
            default: profile.default,
            upgrades: profile
                .upgrades
                .iter()
                .map(OrchestratorProfile::from)
                .collect(),
        }
    }
}

impl TryFrom<OrchestratorVersionProfile> for api::OrchestratorVersionProfile {
    type Error = crate::versions::VersionError;

    fn try_from(profile: OrchestratorVersionProfile) -> Result<Self> {
        let orchestrator_type =
            ORCHESTRATORS_VLABS.required(API_VERSION, &profile.orchestrator_type)?;
        let upgrades = profile
            .upgrades
            .into_iter()
            .map(OrchestratorProfile::into_canonical)
            .collect::<Result<Vec<_>>>()?;

        Ok(api::OrchestratorVersionProfile {
            orchestrator_profile: api::OrchestratorProfile::new(
                orchestrator_type,
                profile.orchestrator_version,
            ),
            default: profile.default,
            upgrades,
        })
    }
}

/// Every released orchestrator version with its upgrade targets, optionally for one orchestrator.
#[instrument(err)]
pub fn orchestrator_version_profiles(
    filter: Option<OrchestratorType>,
) -> Result<OrchestratorVersionProfileList> {
    let profiles = orchestrators::version_profiles(filter).context(OrchestratorCatalogSnafu {
        version: API_VERSION,
    })?;
    Ok(OrchestratorVersionProfileList {
        orchestrators: profiles.iter().map(OrchestratorVersionProfile::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upgradable() -> api::OrchestratorVersionProfile {
        api::OrchestratorVersionProfile {
            orchestrator_profile: api::OrchestratorProfile::new(
                OrchestratorType::Kubernetes,
                "1.9.11",
            ),
            default: false,
            upgrades: vec![
                api::OrchestratorProfile::new(OrchestratorType::Kubernetes, "1.10.13"),
                api::OrchestratorProfile::new(OrchestratorType::Kubernetes, "1.11.6"),
            ],
        }
    }

    #[test]
    fn test_upgrades_keep_order() {
        let versioned = OrchestratorVersionProfile::from(&upgradable());
        assert_eq!(versioned.orchestrator_type, "Kubernetes");
        assert_eq!(versioned.orchestrator_version, "1.9.11");
        let upgrades: Vec<_> = versioned
            .upgrades
            .iter()
            .map(|upgrade| {
                (
                    upgrade.orchestrator_type.as_str(),
                    upgrade.orchestrator_version.as_str(),
                )
            })
            .collect();
        assert_eq!(
            upgrades,
            vec![("Kubernetes", "1.10.13"), ("Kubernetes", "1.11.6")]
        );

        let canonical = api::OrchestratorVersionProfile::try_from(versioned).unwrap();
        assert_eq!(canonical, upgradable());
    }

    #[test]
    fn test_wire_shape() {
        let written = serde_json::to_value(OrchestratorVersionProfile::from(&upgradable())).unwrap();
        assert_eq!(
            written,
            json!({
                "orchestratorType": "Kubernetes",
                "orchestratorVersion": "1.9.11",
                "upgrades": [
                    {"orchestratorType": "Kubernetes", "orchestratorRelease": "1.10", "orchestratorVersion": "1.10.13"},
                    {"orchestratorType": "Kubernetes", "orchestratorRelease": "1.11", "orchestratorVersion": "1.11.6"}
                ]
            })
        );
    }

    #[test]
    fn test_unknown_orchestrator_rejected() {
        let profile = OrchestratorVersionProfile {
            orchestrator_type: "Mesos".to_string(),
            orchestrator_version: "1.0.0".to_string(),
            ..Default::default()
        };
        assert!(api::OrchestratorVersionProfile::try_from(profile).is_err());
    }

    #[test]
    fn test_catalog_listing() {
        let list = orchestrator_version_profiles(Some(OrchestratorType::Kubernetes)).unwrap();
        assert!(!list.orchestrators.is_empty());
        assert!(list
            .orchestrators
            .iter()
            .all(|profile| profile.orchestrator_type == "Kubernetes"));
        let defaults: Vec<_> = list
            .orchestrators
            .iter()
            .filter(|profile| profile.default)
            .map(|profile| profile.orchestrator_version.as_str())
            .collect();
        assert_eq!(defaults, vec!["1.13.11"]);

        let all = orchestrator_version_profiles(None).unwrap();
        assert!(all
            .orchestrators
            .iter()
            .any(|profile| profile.orchestrator_type == "SwarmMode"));
    }
}
