//! Master and agent pool shapes. Distros go through the version's distro table so the deprecated
//! AKS spellings are still read.
use super::API_VERSION;
use crate::api::serde_helpers::{is_false, is_zero, optional_enum};
use crate::api::{
    self, AgentPoolProfileRole, AvailabilityProfile, CustomFile, Extension, ImageReference,
    KubernetesConfig, OsType, ScaleSetEvictionPolicy, ScaleSetPriority, StorageProfile,
};
use crate::versions::error::Result;
use crate::versions::table::DISTROS_VLABS;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterProfile {
    pub count: i32,
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject_alt_names: Vec<String>,
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vnet_cidr: String,
    #[serde(rename = "agentVnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub agent_vnet_subnet_id: String,
    #[serde(rename = "firstConsecutiveStaticIP", skip_serializing_if = "String::is_empty")]
    pub first_consecutive_static_ip: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
    #[serde(rename = "HTTPSourceAddressPrefix", skip_serializing_if = "String::is_empty")]
    pub http_source_address_prefix: String,
    #[serde(skip_serializing_if = "is_false")]
    pub oauth_enabled: bool,
    #[serde(rename = "preProvisionExtension", skip_serializing_if = "Option::is_none")]
    pub preprovision_extension: Option<Extension>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub distro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,
    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_files: Option<Vec<CustomFile>>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability_profile: Option<AvailabilityProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fault_domain_count: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub agent_subnet: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_placement_group: Option<bool>,
    #[serde(rename = "auditDEnabled", skip_serializing_if = "Option::is_none")]
    pub audit_d_enabled: Option<bool>,
    #[serde(rename = "customVMTags", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_vm_tags: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmos_etcd: Option<bool>,
}

impl From<&api::MasterProfile> for MasterProfile {
    fn from(master: &api::MasterProfile) -> Self {
        MasterProfile {
            count: master.count,
            dns_prefix: master.dns_prefix.clone(),
            subject_alt_names: master.subject_alt_names.clone(),
            vm_size: master.vm_size.clone(),
            os_disk_size_gb: master.os_disk_size_gb,
            vnet_subnet_id: master.vnet_subnet_id.clone(),
            vnet_cidr: master.vnet_cidr.clone(),
            agent_vnet_subnet_id: master.agent_vnet_subnet_id.clone(),
            first_consecutive_static_ip: master.first_consecutive_static_ip.clone(),
            ip_address_count: master.ip_address_count,
            storage_profile: master.storage_profile,
            http_source_address_prefix: master.http_source_address_prefix.clone(),
            oauth_enabled: master.oauth_enabled,
            preprovision_extension: master.preprovision_extension.clone(),
            extensions: master.extensions.clone(),
            distro: DISTROS_VLABS.to_versioned(master.distro),
            kubernetes_config: master.kubernetes_config.clone(),
            image_ref: master.image_ref.clone(),
            custom_files: master.custom_files.clone(),
            availability_profile: master.availability_profile,
            platform_fault_domain_count: master.platform_fault_domain_count,
            agent_subnet: master.agent_subnet.clone(),
            availability_zones: master.availability_zones.clone(),
            single_placement_group: master.single_placement_group,
            audit_d_enabled: master.audit_d_enabled,
            custom_vm_tags: master.custom_vm_tags.clone(),
            fqdn: master.fqdn.clone(),
            cosmos_etcd: master.cosmos_etcd,
        }
    }
}

impl MasterProfile {
    pub(super) fn into_canonical(self) -> Result<api::MasterProfile> {
        Ok(api::MasterProfile {
            count: self.count,
            dns_prefix: self.dns_prefix,
            subject_alt_names: self.subject_alt_names,
            vm_size: self.vm_size,
            os_disk_size_gb: self.os_disk_size_gb,
            vnet_subnet_id: self.vnet_subnet_id,
            vnet_cidr: self.vnet_cidr,
            agent_vnet_subnet_id: self.agent_vnet_subnet_id,
            first_consecutive_static_ip: self.first_consecutive_static_ip,
            ip_address_count: self.ip_address_count,
            storage_profile: self.storage_profile,
            http_source_address_prefix: self.http_source_address_prefix,
            oauth_enabled: self.oauth_enabled,
            preprovision_extension: self.preprovision_extension,
            extensions: self.extensions,
            distro: DISTROS_VLABS.to_canonical(API_VERSION, &self.distro)?,
            kubernetes_config: self.kubernetes_config,
            image_ref: self.image_ref,
            custom_files: self.custom_files,
            availability_profile: self.availability_profile,
            platform_fault_domain_count: self.platform_fault_domain_count,
            agent_subnet: self.agent_subnet,
            availability_zones: self.availability_zones,
            single_placement_group: self.single_placement_group,
            audit_d_enabled: self.audit_d_enabled,
            custom_vm_tags: self.custom_vm_tags,
            fqdn: self.fqdn,
            cosmos_etcd: self.cosmos_etcd,
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: i32,
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_prefix: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub os_type: Option<OsType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability_profile: Option<AvailabilityProfile>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale_set_priority: Option<ScaleSetPriority>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale_set_eviction_policy: Option<ScaleSetEvictionPolicy>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
    #[serde(rename = "diskSizesGB", skip_serializing_if = "Vec::is_empty")]
    pub disk_sizes_gb: Vec<i32>,
    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub distro: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<AgentPoolProfileRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerated_networking_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerated_networking_enabled_windows: Option<bool>,
    #[serde(rename = "vmssOverProvisioningEnabled", skip_serializing_if = "Option::is_none")]
    pub vmss_over_provisioning_enabled: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_node_labels: BTreeMap<String, String>,
    #[serde(rename = "preProvisionExtension", skip_serializing_if = "Option::is_none")]
    pub preprovision_extension: Option<Extension>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,
    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fault_domain_count: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_placement_group: Option<bool>,
    #[serde(rename = "enableVMSSNodePublicIP", skip_serializing_if = "Option::is_none")]
    pub enable_vmss_node_public_ip: Option<bool>,
    #[serde(
        rename = "loadBalancerBackendAddressPoolIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub load_balancer_backend_address_pool_ids: Option<Vec<String>>,
    #[serde(rename = "auditDEnabled", skip_serializing_if = "Option::is_none")]
    pub audit_d_enabled: Option<bool>,
    #[serde(rename = "customVMTags", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_vm_tags: BTreeMap<String, String>,
}

impl From<&api::AgentPoolProfile> for AgentPoolProfile {
    fn from(pool: &api::AgentPoolProfile) -> Self {
        AgentPoolProfile {
            name: pool.name.clone(),
            count: pool.count,
            vm_size: pool.vm_size.clone(),
            os_disk_size_gb: pool.os_disk_size_gb,
            dns_prefix: pool.dns_prefix.clone(),
            os_type: pool.os_type,
            ports: pool.ports.clone(),
            availability_profile: pool.availability_profile,
            scale_set_priority: pool.scale_set_priority,
            scale_set_eviction_policy: pool.scale_set_eviction_policy,
            storage_profile: pool.storage_profile,
            disk_sizes_gb: pool.disk_sizes_gb.clone(),
            vnet_subnet_id: pool.vnet_subnet_id.clone(),
            ip_address_count: pool.ip_address_count,
            distro: DISTROS_VLABS.to_versioned(pool.distro),
            role: pool.role,
            accelerated_networking_enabled: pool.accelerated_networking_enabled,
            accelerated_networking_enabled_windows: pool.accelerated_networking_enabled_windows,
            vmss_over_provisioning_enabled: pool.vmss_over_provisioning_enabled,
            fqdn: pool.fqdn.clone(),
            custom_node_labels: pool.custom_node_labels.clone(),
            preprovision_extension: pool.preprovision_extension.clone(),
            extensions: pool.extensions.clone(),
            kubernetes_config: pool.kubernetes_config.clone(),
            image_ref: pool.image_ref.clone(),
            platform_fault_domain_count: pool.platform_fault_domain_count,
            availability_zones: pool.availability_zones.clone(),
            single_placement_group: pool.single_placement_group,
            enable_vmss_node_public_ip: pool.enable_vmss_node_public_ip,
            load_balancer_backend_address_pool_ids: pool
                .load_balancer_backend_address_pool_ids
                .clone(),
            audit_d_enabled: pool.audit_d_enabled,
            custom_vm_tags: pool.custom_vm_tags.clone(),
        }
    }
}

impl AgentPoolProfile {
    pub(super) fn into_canonical(self) -> Result<api::AgentPoolProfile> {
        Ok(api::AgentPoolProfile {
            name: self.name,
            count: self.count,
            vm_size: self.vm_size,
            os_disk_size_gb: self.os_disk_size_gb,
            dns_prefix: self.dns_prefix,
            os_type: self.os_type,
            ports: self.ports,
            availability_profile: self.availability_profile,
            scale_set_priority: self.scale_set_priority,
            scale_set_eviction_policy: self.scale_set_eviction_policy,
            storage_profile: self.storage_profile,
            disk_sizes_gb: self.disk_sizes_gb,
            vnet_subnet_id: self.vnet_subnet_id,
            ip_address_count: self.ip_address_count,
            distro: DISTROS_VLABS.to_canonical(API_VERSION, &self.distro)?,
            role: self.role,
            accelerated_networking_enabled: self.accelerated_networking_enabled,
            accelerated_networking_enabled_windows: self.accelerated_networking_enabled_windows,
            vmss_over_provisioning_enabled: self.vmss_over_provisioning_enabled,
            fqdn: self.fqdn,
            custom_node_labels: self.custom_node_labels,
            preprovision_extension: self.preprovision_extension,
            extensions: self.extensions,
            kubernetes_config: self.kubernetes_config,
            image_ref: self.image_ref,
            platform_fault_domain_count: self.platform_fault_domain_count,
            availability_zones: self.availability_zones,
            single_placement_group: self.single_placement_group,
            enable_vmss_node_public_ip: self.enable_vmss_node_public_ip,
            load_balancer_backend_address_pool_ids: self.load_balancer_backend_address_pool_ids,
            audit_d_enabled: self.audit_d_enabled,
            custom_vm_tags: self.custom_vm_tags,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Distro;
    use serde_json::json;

    #[test]
    fn test_legacy_distros() {
        for (legacy, modern, spelled) in [
            ("aks", Distro::AksUbuntu1604, "aks-ubuntu-16.04"),
            ("aks-1804", Distro::AksUbuntu1804, "aks-ubuntu-18.04"),
            ("aks-docker-engine", Distro::AksUbuntu1604, "aks-ubuntu-16.04"),
        ] {
            let master: MasterProfile =
                serde_json::from_value(json!({"count": 1, "distro": legacy})).unwrap();
            let master = master.into_canonical().unwrap();
            assert_eq!(master.distro, Some(modern));
            assert_eq!(MasterProfile::from(&master).distro, spelled);

            let pool: AgentPoolProfile =
                serde_json::from_value(json!({"name": "pool", "distro": legacy})).unwrap();
            let pool = pool.into_canonical().unwrap();
            assert_eq!(pool.distro, Some(modern));
            assert_eq!(AgentPoolProfile::from(&pool).distro, spelled);
        }
    }

    #[test]
    fn test_unknown_distro_rejected() {
        let pool: AgentPoolProfile =
            serde_json::from_value(json!({"name": "pool", "distro": "debian"})).unwrap();
        assert!(pool.into_canonical().is_err());
    }

    #[test]
    fn test_internal_fields_not_written() {
        let master = api::MasterProfile {
            subnet: "10.240.0.0/16".to_string(),
            ..Default::default()
        };
        let written = serde_json::to_value(MasterProfile::from(&master)).unwrap();
        assert!(written.get("subnet").is_none());

        let pool = api::AgentPoolProfile {
            subnet: "10.240.0.0/16".to_string(),
            orchestrator_version: "1.13.11".to_string(),
            ..Default::default()
        };
        let written = serde_json::to_value(AgentPoolProfile::from(&pool)).unwrap();
        assert!(written.get("subnet").is_none());
        assert!(written.get("orchestratorVersion").is_none());
    }
}
