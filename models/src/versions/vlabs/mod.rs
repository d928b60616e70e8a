//! The preview schema. It carries every feature of the canonical model that is meant to be set by
//! callers, names orchestrator releases by `major.minor`, and describes custom clouds.
mod nodes;
mod orchestrators;

pub use self::nodes::{AgentPoolProfile, MasterProfile};
pub use self::orchestrators::{
    orchestrator_version_profiles, OrchestratorVersionProfile, OrchestratorVersionProfileList,
};

use super::error::{
    MismatchedConfigSnafu, MissingFieldSnafu, OrchestratorCatalogSnafu, Result,
};
use super::table::{DEPRECATED_OS_IMAGE_KEYS, ORCHESTRATORS_VLABS};
use super::{ApiVersion, Resource, VersionedDocument, VersionedProperties};
use crate::api::serde_helpers::optional_enum;
use crate::api::{
    self, AadProfile, CertificateProfile, CustomCloudProfile, DcosConfig, ExtensionProfile,
    FeatureFlags, KubernetesConfig, LinuxProfile, OrchestratorType, ProvisioningState,
    ServicePrincipalProfile, WindowsProfile,
};
use crate::cloud::AzureOsImageConfig;
use crate::orchestrators::latest_release_version;

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use semver::Version;
use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt, ResultExt};
use std::collections::BTreeMap;
use tracing::{event, Level};

pub(crate) const API_VERSION: ApiVersion = ApiVersion::Vlabs;

pub type ContainerService = Resource<Properties>;

/// JSON schema of a complete `vlabs` document.
pub fn json_schema() -> RootSchema {
    schemars::schema_for!(VersionedDocument<ContainerService>)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestrator_profile: Option<OrchestratorProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_profile: Option<MasterProfile>,
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension_profiles: Vec<ExtensionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_profile: Option<CertificateProfile>,
    #[serde(rename = "aadProfile", skip_serializing_if = "Option::is_none")]
    pub aad_profile: Option<AadProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_flags: Option<FeatureFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_cloud_profile: Option<CustomCloudProfile>,
}

/// The orchestrator and its configuration. A release (`major.minor`) may stand in for the version
/// and resolves to the release's latest patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorProfile {
    pub orchestrator_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_release: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcos_config: Option<DcosConfig>,
}

/// `major.minor` of a version, or empty when it is not a semantic version.
fn release_of(version: &str) -> String {
    Version::parse(version.trim_start_matches('v'))
        .map(|version| format!("{}.{}", version.major, version.minor))
        .unwrap_or_default()
}

impl From<&api::OrchestratorProfile> for OrchestratorProfile {
    fn from(orchestrator: &api::OrchestratorProfile) -> Self {
        OrchestratorProfile {
            orchestrator_type: ORCHESTRATORS_VLABS
                .to_versioned(Some(orchestrator.orchestrator_type)),
            orchestrator_release: release_of(&orchestrator.orchestrator_version),
            orchestrator_version: orchestrator.orchestrator_version.clone(),
            kubernetes_config: orchestrator.kubernetes_config.clone(),
            dcos_config: orchestrator.dcos_config.clone(),
        }
    }
}

impl OrchestratorProfile {
    fn into_canonical(self) -> Result<api::OrchestratorProfile> {
        let orchestrator_type = ORCHESTRATORS_VLABS.required(API_VERSION, &self.orchestrator_type)?;
        ensure!(
            self.kubernetes_config.is_none() || orchestrator_type == OrchestratorType::Kubernetes,
            MismatchedConfigSnafu {
                version: API_VERSION,
                field: "kubernetesConfig",
                orchestrator: orchestrator_type,
            }
        );
        ensure!(
            self.dcos_config.is_none() || orchestrator_type == OrchestratorType::Dcos,
            MismatchedConfigSnafu {
                version: API_VERSION,
                field: "dcosConfig",
                orchestrator: orchestrator_type,
            }
        );
        let orchestrator_version = if !self.orchestrator_version.is_empty()
            || self.orchestrator_release.is_empty()
        {
            self.orchestrator_version
        } else {
            latest_release_version(orchestrator_type, &self.orchestrator_release).context(
                OrchestratorCatalogSnafu {
                    version: API_VERSION,
                },
            )?
        };

        Ok(api::OrchestratorProfile {
            orchestrator_type,
            orchestrator_version,
            kubernetes_config: self.kubernetes_config,
            dcos_config: self.dcos_config,
        })
    }
}

/// Renames the OS image entries keyed by a deprecated distro to the distro replacing it. An entry
/// already present under the modern key wins. Every other key is kept.
fn normalize_os_image_config(
    config: BTreeMap<String, AzureOsImageConfig>,
) -> BTreeMap<String, AzureOsImageConfig> {
    let mut normalized = BTreeMap::new();
    let mut renamed = Vec::new();
    for (key, image) in config {
        match DEPRECATED_OS_IMAGE_KEYS
            .iter()
            .find(|(deprecated, _)| *deprecated == key)
        {
            Some((_, modern)) => renamed.push((key, *modern, image)),
            None => {
                normalized.insert(key, image);
            }
        }
    }
    for (key, modern, image) in renamed {
        if normalized.contains_key(modern) {
            event!(
                Level::INFO,
                key = key.as_str(),
                replacement = modern,
                "Dropped deprecated OS image key in favor of its replacement"
            );
        } else {
            normalized.insert(modern.to_string(), image);
        }
    }
    normalized
}

fn normalize_custom_cloud_profile(mut profile: CustomCloudProfile) -> CustomCloudProfile {
    if let Some(spec) = profile.azure_environment_spec_config.as_mut() {
        spec.os_image_config = normalize_os_image_config(std::mem::take(&mut spec.os_image_config));
    }
    profile
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = API_VERSION;

    fn from_canonical(properties: &api::Properties) -> Self {
        Properties {
            provisioning_state: properties.provisioning_state,
            orchestrator_profile: properties
                .orchestrator_profile
                .as_ref()
                .map(OrchestratorProfile::from),
            master_profile: properties.master_profile.as_ref().map(MasterProfile::from),
            agent_pool_profiles: properties
                .agent_pool_profiles
                .iter()
                .map(AgentPoolProfile::from)
                .collect(),
            linux_profile: properties.linux_profile.clone(),
            windows_profile: properties.windows_profile.clone(),
            extension_profiles: properties.extension_profiles.clone(),
            service_principal_profile: properties.service_principal_profile.clone(),
            certificate_profile: properties.certificate_profile.clone(),
            aad_profile: properties.aad_profile.clone(),
            feature_flags: properties.feature_flags.clone(),
            custom_cloud_profile: properties.custom_cloud_profile.clone(),
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        let orchestrator_profile = self
            .orchestrator_profile
            .context(MissingFieldSnafu {
                version: API_VERSION,
                field: "orchestratorProfile",
            })?
            .into_canonical()?;
        let master_profile = self
            .master_profile
            .map(MasterProfile::into_canonical)
            .transpose()?;
        let agent_pool_profiles = self
            .agent_pool_profiles
            .into_iter()
            .map(AgentPoolProfile::into_canonical)
            .collect::<Result<Vec<_>>>()?;

        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(orchestrator_profile),
            master_profile,
            agent_pool_profiles,
            linux_profile: self.linux_profile,
            windows_profile: self.windows_profile,
            extension_profiles: self.extension_profiles,
            service_principal_profile: self.service_principal_profile,
            certificate_profile: self.certificate_profile,
            aad_profile: self.aad_profile,
            feature_flags: self.feature_flags,
            custom_cloud_profile: self.custom_cloud_profile.map(normalize_custom_cloud_profile),
            ..Default::default()
        })
    }
}
