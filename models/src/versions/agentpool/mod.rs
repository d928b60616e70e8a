//! Managed cluster versions. The service runs the control plane, so a document only names the
//! Kubernetes version, the control plane DNS prefix and the agent pools.
pub mod v20170831;
pub mod v20180331;

use crate::api::serde_helpers::{is_zero, optional_enum};
use crate::api::{self, HostedMasterProfile, OrchestratorType, OsType, StorageProfile};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: i32,
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
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

impl From<&api::AgentPoolProfile> for AgentPoolProfile {
    fn from(pool: &api::AgentPoolProfile) -> Self {
        AgentPoolProfile {
            name: pool.name.clone(),
            count: pool.count,
            vm_size: pool.vm_size.clone(),
            os_disk_size_gb: pool.os_disk_size_gb,
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
            storage_profile: pool.storage_profile,
            vnet_subnet_id: pool.vnet_subnet_id,
            os_type: pool.os_type,
            ..Default::default()
        }
    }
}

/// The DNS prefix and FQDN of the control plane, preferring the hosted master.
pub(super) fn control_plane(properties: &api::Properties) -> (String, String) {
    match (&properties.hosted_master_profile, &properties.master_profile) {
        (Some(hosted), _) => (hosted.dns_prefix.clone(), hosted.fqdn.clone()),
        (None, Some(master)) => (master.dns_prefix.clone(), master.fqdn.clone()),
        (None, None) => Default::default(),
    }
}

/// The Kubernetes version of the cluster, empty for any other orchestrator.
pub(super) fn kubernetes_version(properties: &api::Properties) -> String {
    properties
        .orchestrator_profile
        .as_ref()
        .filter(|orchestrator| orchestrator.orchestrator_type == OrchestratorType::Kubernetes)
        .map(|orchestrator| orchestrator.orchestrator_version.clone())
        .unwrap_or_default()
}

pub(super) fn hosted_master(dns_prefix: String, fqdn: String) -> HostedMasterProfile {
    HostedMasterProfile {
        dns_prefix,
        fqdn,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::default_container_service;

    #[test]
    fn test_control_plane_prefers_hosted_master() {
        let mut properties = default_container_service().properties;
        let master = properties.master_profile.clone().unwrap();
        assert_eq!(
            control_plane(&properties),
            (master.dns_prefix.clone(), master.fqdn.clone())
        );

        properties.hosted_master_profile = Some(hosted_master(
            "aks".to_string(),
            "aks.hcp.westus2.azmk8s.io".to_string(),
        ));
        assert_eq!(
            control_plane(&properties),
            ("aks".to_string(), "aks.hcp.westus2.azmk8s.io".to_string())
        );

        properties.hosted_master_profile = None;
        properties.master_profile = None;
        assert_eq!(control_plane(&properties), (String::new(), String::new()));
    }

    #[test]
    fn test_kubernetes_version_only_for_kubernetes() {
        let mut properties = default_container_service().properties;
        assert!(!kubernetes_version(&properties).is_empty());

        properties.orchestrator_profile = Some(api::OrchestratorProfile::new(
            OrchestratorType::Dcos,
            "1.11.2",
        ));
        assert_eq!(kubernetes_version(&properties), "");
    }
}
