//! Adds cluster networking, RBAC, addons and Azure Active Directory integration to the managed
//! cluster.
use super::{control_plane, hosted_master, kubernetes_version, AgentPoolProfile};
use crate::api::serde_helpers::optional_enum;
use crate::api::{self, AddonProfile, KubernetesConfig, OrchestratorType, ProvisioningState, Secret};
use crate::versions::error::Result;
use crate::versions::table::{NETWORK_PLUGINS_V20180331, NETWORK_POLICIES_V20180331};
use crate::versions::v20160330::{LinuxProfile, WindowsProfile};
use crate::versions::v20170701::ServicePrincipalProfile;
use crate::versions::{ApiVersion, Resource, VersionedProperties};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ManagedCluster = Resource<Properties>;

const API_VERSION: ApiVersion = ApiVersion::V20180331;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub addon_profiles: BTreeMap<String, AddonProfile>,
    #[serde(rename = "enableRBAC", skip_serializing_if = "Option::is_none")]
    pub enable_rbac: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_profile: Option<NetworkProfile>,
    #[serde(rename = "aadProfile", skip_serializing_if = "Option::is_none")]
    pub aad_profile: Option<AadProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_plugin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_policy: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pod_cidr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,
    #[serde(rename = "dnsServiceIP", skip_serializing_if = "String::is_empty")]
    pub dns_service_ip: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_bridge_cidr: String,
}

impl NetworkProfile {
    /// The network settings of a Kubernetes configuration, if it carries any.
    fn from_config(config: &KubernetesConfig) -> Option<Self> {
        let profile = NetworkProfile {
            network_plugin: NETWORK_PLUGINS_V20180331.to_versioned(config.network_plugin),
            network_policy: NETWORK_POLICIES_V20180331.to_versioned(config.network_policy),
            pod_cidr: config.cluster_subnet.clone(),
            service_cidr: config.service_cidr.clone(),
            dns_service_ip: config.dns_service_ip.clone(),
            docker_bridge_cidr: config.docker_bridge_subnet.clone(),
        };
        if profile == NetworkProfile::default() {
            None
        } else {
            Some(profile)
        }
    }

    fn apply(self, config: &mut KubernetesConfig) -> Result<()> {
        config.network_plugin =
            NETWORK_PLUGINS_V20180331.to_canonical(API_VERSION, &self.network_plugin)?;
        config.network_policy =
            NETWORK_POLICIES_V20180331.to_canonical(API_VERSION, &self.network_policy)?;
        config.cluster_subnet = self.pod_cidr;
        config.service_cidr = self.service_cidr;
        config.dns_service_ip = self.dns_service_ip;
        config.docker_bridge_subnet = self.docker_bridge_cidr;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AadProfile {
    #[serde(rename = "clientAppID")]
    pub client_app_id: String,
    #[serde(rename = "serverAppID")]
    pub server_app_id: String,
    #[serde(rename = "serverAppSecret", skip_serializing_if = "Secret::is_empty")]
    pub server_app_secret: Secret,
    #[serde(rename = "tenantID", skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
}

impl From<&api::AadProfile> for AadProfile {
    fn from(aad: &api::AadProfile) -> Self {
        AadProfile {
            client_app_id: aad.client_app_id.clone(),
            server_app_id: aad.server_app_id.clone(),
            server_app_secret: aad.server_app_secret.clone(),
            tenant_id: aad.tenant_id.clone(),
        }
    }
}

impl From<AadProfile> for api::AadProfile {
    fn from(aad: AadProfile) -> Self {
        api::AadProfile {
            client_app_id: aad.client_app_id,
            server_app_id: aad.server_app_id,
            server_app_secret: aad.server_app_secret,
            tenant_id: aad.tenant_id,
            ..Default::default()
        }
    }
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = API_VERSION;

    fn from_canonical(properties: &api::Properties) -> Self {
        let (dns_prefix, fqdn) = control_plane(properties);
        let kubernetes_config = properties
            .orchestrator_profile
            .as_ref()
            .and_then(|orchestrator| orchestrator.kubernetes_config.as_ref());

        Properties {
            provisioning_state: properties.provisioning_state,
            kubernetes_version: kubernetes_version(properties),
            dns_prefix,
            fqdn,
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
            addon_profiles: properties.addon_profiles.clone(),
            enable_rbac: kubernetes_config.and_then(|config| config.enable_rbac),
            network_profile: kubernetes_config.and_then(NetworkProfile::from_config),
            aad_profile: properties.aad_profile.as_ref().map(AadProfile::from),
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        let kubernetes_config = if self.network_profile.is_some() || self.enable_rbac.is_some() {
            let mut config = KubernetesConfig {
                enable_rbac: self.enable_rbac,
                ..Default::default()
            };
            if let Some(network) = self.network_profile {
                network.apply(&mut config)?;
            }
            Some(config)
        } else {
            None
        };

        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(api::OrchestratorProfile {
                kubernetes_config,
                ..api::OrchestratorProfile::new(
                    OrchestratorType::Kubernetes,
                    self.kubernetes_version,
                )
            }),
            hosted_master_profile: Some(hosted_master(self.dns_prefix, self.fqdn)),
            agent_pool_profiles: self
                .agent_pool_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            linux_profile: self.linux_profile.map(Into::into),
            windows_profile: self.windows_profile.map(Into::into),
            service_principal_profile: self.service_principal_profile.map(Into::into),
            addon_profiles: self.addon_profiles,
            aad_profile: self.aad_profile.map(Into::into),
            ..Default::default()
        })
    }
}
