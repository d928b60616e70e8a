//! The first public schema: Mesos, DC/OS and Swarm clusters with a master, agent pools and the
//! Linux and Windows admin accounts.
use super::error::Result;
use super::table::ORCHESTRATORS_V20160330;
use super::{required_orchestrator, ApiVersion, Resource, VersionedProperties};
use crate::api::serde_helpers::optional_enum;
use crate::api::{self, DiagnosticsProfile, JumpboxProfile, ProvisioningState, Secret, SshConfig};

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
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorProfile {
    pub orchestrator_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterProfile {
    pub count: i32,
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
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
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinuxProfile {
    pub admin_username: String,
    pub ssh: SshConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowsProfile {
    pub admin_username: String,
    pub admin_password: Secret,
}

impl From<&api::MasterProfile> for MasterProfile {
    fn from(master: &api::MasterProfile) -> Self {
        MasterProfile {
            count: master.count,
            dns_prefix: master.dns_prefix.clone(),
            fqdn: master.fqdn.clone(),
        }
    }
}

impl From<MasterProfile> for api::MasterProfile {
    fn from(master: MasterProfile) -> Self {
        api::MasterProfile {
            count: master.count,
            dns_prefix: master.dns_prefix,
            fqdn: master.fqdn,
            ..Default::default()
        }
    }
}

impl From<&api::AgentPoolProfile> for AgentPoolProfile {
    fn from(pool: &api::AgentPoolProfile) -> Self {
        AgentPoolProfile {
            name: pool.name.clone(),
            count: pool.count,
            vm_size: pool.vm_size.clone(),
            dns_prefix: pool.dns_prefix.clone(),
            fqdn: pool.fqdn.clone(),
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
            ..Default::default()
        }
    }
}

impl From<&api::LinuxProfile> for LinuxProfile {
    fn from(linux: &api::LinuxProfile) -> Self {
        LinuxProfile {
            admin_username: linux.admin_username.clone(),
            ssh: linux.ssh.clone(),
        }
    }
}

impl From<LinuxProfile> for api::LinuxProfile {
    fn from(linux: LinuxProfile) -> Self {
        api::LinuxProfile {
            admin_username: linux.admin_username,
            ssh: linux.ssh,
            ..Default::default()
        }
    }
}

impl From<&api::WindowsProfile> for WindowsProfile {
    fn from(windows: &api::WindowsProfile) -> Self {
        WindowsProfile {
            admin_username: windows.admin_username.clone(),
            admin_password: windows.admin_password.clone(),
        }
    }
}

impl From<WindowsProfile> for api::WindowsProfile {
    fn from(windows: WindowsProfile) -> Self {
        api::WindowsProfile {
            admin_username: windows.admin_username,
            admin_password: windows.admin_password,
            ..Default::default()
        }
    }
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = ApiVersion::V20160330;

    fn from_canonical(properties: &api::Properties) -> Self {
        Properties {
            provisioning_state: properties.provisioning_state,
            orchestrator_profile: properties.orchestrator_profile.as_ref().map(|orchestrator| {
                OrchestratorProfile {
                    orchestrator_type: ORCHESTRATORS_V20160330
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
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        let orchestrator_type = required_orchestrator(
            Self::API_VERSION,
            &ORCHESTRATORS_V20160330,
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
            ..Default::default()
        })
    }
}
