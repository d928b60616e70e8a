use super::{control_plane, hosted_master, kubernetes_version, AgentPoolProfile};
use crate::api::serde_helpers::optional_enum;
use crate::api::{self, OrchestratorType, ProvisioningState};
use crate::versions::error::Result;
use crate::versions::v20160330::{LinuxProfile, WindowsProfile};
use crate::versions::v20170701::ServicePrincipalProfile;
use crate::versions::{ApiVersion, Resource, VersionedProperties};

use serde::{Deserialize, Serialize};

pub type ManagedCluster = Resource<Properties>;

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
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = ApiVersion::V20170831;

    fn from_canonical(properties: &api::Properties) -> Self {
        let (dns_prefix, fqdn) = control_plane(properties);
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
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(api::OrchestratorProfile::new(
                OrchestratorType::Kubernetes,
                self.kubernetes_version,
            )),
            hosted_master_profile: Some(hosted_master(self.dns_prefix, self.fqdn)),
            agent_pool_profiles: self
                .agent_pool_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            linux_profile: self.linux_profile.map(Into::into),
            windows_profile: self.windows_profile.map(Into::into),
            service_principal_profile: self.service_principal_profile.map(Into::into),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::default_container_service;
    use crate::api::{OsType, StorageProfile};
    use crate::versions::{VersionedDocument, VersionedModel};
    use serde_json::json;

    #[test]
    fn test_read_managed_cluster() {
        let document: VersionedDocument<ManagedCluster> = serde_json::from_value(json!({
            "apiVersion": "2017-08-31",
            "location": "eastus",
            "properties": {
                "kubernetesVersion": "1.7.7",
                "dnsPrefix": "aks",
                "agentPoolProfiles": [{
                    "name": "nodepool1",
                    "count": 3,
                    "vmSize": "Standard_D2_v2",
                    "osDiskSizeGB": 30,
                    "storageProfile": "ManagedDisks",
                    "osType": "Linux"
                }],
                "servicePrincipalProfile": {"clientId": "id", "secret": "secret"}
            }
        }))
        .unwrap();
        let cs = document.model.into_canonical().unwrap();
        let properties = &cs.properties;

        assert_eq!(cs.location, "eastus");
        assert_eq!(
            properties.orchestrator_profile,
            Some(api::OrchestratorProfile::new(
                OrchestratorType::Kubernetes,
                "1.7.7"
            ))
        );
        assert!(properties.is_hosted_master_profile());
        assert!(properties.master_profile.is_none());
        assert_eq!(
            properties.hosted_master_profile.as_ref().unwrap().dns_prefix,
            "aks"
        );

        let pool = &properties.agent_pool_profiles[0];
        assert_eq!(pool.name, "nodepool1");
        assert_eq!(pool.os_disk_size_gb, 30);
        assert_eq!(pool.storage_profile, Some(StorageProfile::ManagedDisks));
        assert_eq!(pool.os_type, Some(OsType::Linux));
        assert_eq!(
            properties.service_principal_profile.as_ref().unwrap().secret.expose(),
            "secret"
        );
    }

    #[test]
    fn test_write_managed_cluster() {
        let mut cs = default_container_service();
        cs.properties.master_profile = None;
        cs.properties.hosted_master_profile = Some(hosted_master(
            "aks".to_string(),
            "aks.hcp.westus2.azmk8s.io".to_string(),
        ));
        let written = serde_json::to_value(ManagedCluster::from_canonical(&cs)).unwrap();
        let properties = &written["properties"];

        assert_eq!(properties["kubernetesVersion"], "1.11.6");
        assert_eq!(properties["dnsPrefix"], "aks");
        assert_eq!(properties["fqdn"], "aks.hcp.westus2.azmk8s.io");
        assert_eq!(properties["agentPoolProfiles"][0]["name"], "sampleAgent");
        assert!(properties.get("masterProfile").is_none());
        assert!(properties.get("orchestratorProfile").is_none());
        assert!(properties.get("networkProfile").is_none());
        assert!(properties["agentPoolProfiles"][0].get("dnsPrefix").is_none());
    }

    #[test]
    fn test_round_trip_keeps_pools() {
        let cs = default_container_service();
        let back = ManagedCluster::from_canonical(&cs).into_canonical().unwrap();
        let (pools, original) = (
            &back.properties.agent_pool_profiles,
            &cs.properties.agent_pool_profiles,
        );
        assert_eq!(pools.len(), original.len());
        for (pool, original) in pools.iter().zip(original) {
            assert_eq!(pool.name, original.name);
            assert_eq!(pool.count, original.count);
            assert_eq!(pool.vm_size, original.vm_size);
            assert_eq!(pool.os_type, original.os_type);
        }
        assert_eq!(
            back.properties.linux_profile.unwrap().admin_username,
            "azureuser"
        );
    }
}
