//! Adds orchestrator versions, node disk and network placement, and key vault backed service
//! principal secrets. The diagnostics and jumpbox profiles are no longer part of the contract.
use super::error::Result;
use super::table::ORCHESTRATORS_DOCKER_CE;
use super::v20160330::{LinuxProfile, WindowsProfile};
use super::{required_orchestrator, ApiVersion, Resource, VersionedProperties};
use crate::api::serde_helpers::{is_zero, optional_enum};
use crate::api::{
    self, CustomProfile, KeyvaultSecretRef, OsType, ProvisioningState, Secret, StorageProfile,
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
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_profile: Option<CustomProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorProfile {
    pub orchestrator_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterProfile {
    pub count: i32,
    pub dns_prefix: String,
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,
    #[serde(rename = "firstConsecutiveStaticIP", skip_serializing_if = "String::is_empty")]
    pub first_consecutive_static_ip: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: i32,
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub os_type: Option<OsType>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePrincipalProfile {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub secret: Secret,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvault_secret_ref: Option<KeyvaultSecretRef>,
}

impl From<&api::MasterProfile> for MasterProfile {
    fn from(master: &api::MasterProfile) -> Self {
        MasterProfile {
            count: master.count,
            dns_prefix: master.dns_prefix.clone(),
            vm_size: master.vm_size.clone(),
            os_disk_size_gb: master.os_disk_size_gb,
            vnet_subnet_id: master.vnet_subnet_id.clone(),
            first_consecutive_static_ip: master.first_consecutive_static_ip.clone(),
            storage_profile: master.storage_profile,
            fqdn: master.fqdn.clone(),
        }
    }
}

impl From<MasterProfile> for api::MasterProfile {
    fn from(master: MasterProfile) -> Self {
        api::MasterProfile {
            count: master.count,
            dns_prefix: master.dns_prefix,
            vm_size: master.vm_size,
            os_disk_size_gb: master.os_disk_size_gb,
            vnet_subnet_id: master.vnet_subnet_id,
            first_consecutive_static_ip: master.first_consecutive_static_ip,
            storage_profile: master.storage_profile,
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
            os_disk_size_gb: pool.os_disk_size_gb,
            dns_prefix: pool.dns_prefix.clone(),
            fqdn: pool.fqdn.clone(),
            ports: pool.ports.clone(),
            storage_profile: pool.storage_profile,
            vnet_subnet_id: pool.vnet_subnet_id.clone(),
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
            os_disk_size_gb: pool.os_disk_size_gb,
            dns_prefix: pool.dns_prefix,
            fqdn: pool.fqdn,
            ports: pool.ports,
            storage_profile: pool.storage_profile,
            vnet_subnet_id: pool.vnet_subnet_id,
            os_type: pool.os_type,
            ..Default::default()
        }
    }
}

impl From<&api::ServicePrincipalProfile> for ServicePrincipalProfile {
    fn from(principal: &api::ServicePrincipalProfile) -> Self {
        ServicePrincipalProfile {
            client_id: principal.client_id.clone(),
            secret: principal.secret.clone(),
            keyvault_secret_ref: principal.keyvault_secret_ref.clone(),
        }
    }
}

impl From<ServicePrincipalProfile> for api::ServicePrincipalProfile {
    fn from(principal: ServicePrincipalProfile) -> Self {
        api::ServicePrincipalProfile {
            client_id: principal.client_id,
            secret: principal.secret,
            keyvault_secret_ref: principal.keyvault_secret_ref,
            ..Default::default()
        }
    }
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = ApiVersion::V20170701;

    fn from_canonical(properties: &api::Properties) -> Self {
        Properties {
            provisioning_state: properties.provisioning_state,
            orchestrator_profile: properties.orchestrator_profile.as_ref().map(|orchestrator| {
                OrchestratorProfile {
                    orchestrator_type: ORCHESTRATORS_DOCKER_CE
                        .to_versioned(Some(orchestrator.orchestrator_type)),
                    orchestrator_version: orchestrator.orchestrator_version.clone(),
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
        let orchestrator_version = self
            .orchestrator_profile
            .map(|orchestrator| orchestrator.orchestrator_version)
            .unwrap_or_default();

        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(api::OrchestratorProfile::new(
                orchestrator_type,
                orchestrator_version,
            )),
            master_profile: self.master_profile.map(Into::into),
            agent_pool_profiles: self
                .agent_pool_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            linux_profile: self.linux_profile.map(Into::into),
            windows_profile: self.windows_profile.map(Into::into),
            service_principal_profile: self.service_principal_profile.map(Into::into),
            custom_profile: self.custom_profile,
            ..Default::default()
        })
    }
}
