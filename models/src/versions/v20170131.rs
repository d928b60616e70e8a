//! Adds Windows agent pools and Swarm Mode, spelled `DockerCE`.
use super::error::Result;
use super::table::ORCHESTRATORS_DOCKER_CE;
use super::v20160330::{LinuxProfile, MasterProfile, OrchestratorProfile, WindowsProfile};
use super::v20160930::ServicePrincipalProfile;
use super::{required_orchestrator, ApiVersion, Resource, VersionedProperties};
use crate::api::serde_helpers::optional_enum;
use crate::api::{
    self, CustomProfile, DiagnosticsProfile, JumpboxProfile, OsType, ProvisioningState,
};

use serde::{Deserialize, Serialize};

pub type ContainerService = Resource<Properties>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics_profile: Option<DiagnosticsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpbox_profile: Option<JumpboxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_profile: Option<CustomProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: i32,
    pub vm_size: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub os_type: Option<OsType>,
}

impl From<&api::AgentPoolProfile> for AgentPoolProfile {
    fn from(pool: &api::AgentPoolProfile) -> Self {
        AgentPoolProfile {
            name: pool.name.clone(),
            count: pool.count,
            vm_size: pool.vm_size.clone(),
            dns_prefix: pool.dns_prefix.clone(),
            fqdn: pool.fqdn.clone(),
            os_type: pool.os_type,
        }
    }
}

impl From<AgentPoolProfile> for api::AgentPoolProfile {
    fn from(pool: AgentPoolProfile) -> Self {
        api::AgentPoolProfile {
            name: pool.name,
            count: pool.count,
            vm_size: pool.vm_size,
            dns_prefix: pool.dns_prefix,
            fqdn: pool.fqdn,
            os_type: pool.os_type,
            ..Default::default()
        }
    }
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = ApiVersion::V20170131;

    fn from_canonical(properties: &api::Properties) -> Self {
        Properties {
            provisioning_state: properties.provisioning_state,
            orchestrator_profile: properties.orchestrator_profile.as_ref().map(|orchestrator| {
                OrchestratorProfile {
                    orchestrator_type: ORCHESTRATORS_DOCKER_CE
                        .to_versioned(Some(orchestrator.orchestrator_type)),
                }
            }),
            master_profile: properties.master_profile.as_ref().map(MasterProfile::from),
            agent_pool_profiles: properties
                .agent_pool_profiles
                .iter()
                .map(AgentPoolProfile::from)
                .collect(),
            linux_profile: properties.linux_profile.as_ref().map(LinuxProfile::from),
            windows_profile: properties.windows_profile.as_ref().map(WindowsProfile::from),
            diagnostics_profile: properties.diagnostics_profile.clone(),
            jumpbox_profile: properties.jumpbox_profile.clone(),
            service_principal_profile: properties
                .service_principal_profile
                .as_ref()
                .map(ServicePrincipalProfile::from),
            custom_profile: properties.custom_profile.clone(),
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        let orchestrator_type = required_orchestrator(
            Self::API_VERSION,
            &ORCHESTRATORS_DOCKER_CE,
            self.orchestrator_profile
                .as_ref()
                .map(|orchestrator| orchestrator.orchestrator_type.as_str()),
        )?;

        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(api::OrchestratorProfile::new(orchestrator_type, "")),
            master_profile: self.master_profile.map(Into::into),
            agent_pool_profiles: self
                .agent_pool_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            linux_profile: self.linux_profile.map(Into::into),
            windows_profile: self.windows_profile.map(Into::into),
            diagnostics_profile: self.diagnostics_profile,
            jumpbox_profile: self.jumpbox_profile,
            service_principal_profile: self.service_principal_profile.map(Into::into),
            custom_profile: self.custom_profile,
            ..Default::default()
        })
    }
}
