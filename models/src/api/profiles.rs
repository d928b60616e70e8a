//! Node group descriptors: the master profile and agent pools.
use super::serde_helpers::{is_zero, optional_enum};
use super::{
    AgentPoolProfileRole, AvailabilityProfile, CustomFile, Distro, Extension, ImageReference,
    KubernetesConfig, OsType, ProvisioningState, ScaleSetEvictionPolicy, ScaleSetPriority,
    StorageProfile,
};
use crate::constants::{
    DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP,
    DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET,
    DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS, ETCD_ENDPOINT_URI_SUFFIX,
};

use ipnet::IpNet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// VM sizes carrying NVIDIA GPUs.
const NVIDIA_ENABLED_SKUS: &[&str] = &[
    "Standard_NC6",
    "Standard_NC12",
    "Standard_NC24",
    "Standard_NC24r",
    "Standard_NV6",
    "Standard_NV12",
    "Standard_NV24",
    "Standard_NV24r",
    "Standard_ND6s",
    "Standard_ND12s",
    "Standard_ND24s",
    "Standard_ND24rs",
    "Standard_NC6s_v2",
    "Standard_NC12s_v2",
    "Standard_NC24s_v2",
    "Standard_NC24rs_v2",
    "Standard_NC6s_v3",
    "Standard_NC12s_v3",
    "Standard_NC24s_v3",
    "Standard_NC24rs_v3",
    "Standard_ND40s_v2",
    "Standard_NV12s_v3",
    "Standard_NV24s_v3",
    "Standard_NV48s_v3",
];

pub fn is_nvidia_enabled_sku(vm_size: &str) -> bool {
    NVIDIA_ENABLED_SKUS.contains(&vm_size)
}

/// The managed disk tier a VM size supports: premium when its capability segment
/// (`Standard_DS2_v2` -> `DS2`) contains an `s`. `None` for malformed size names.
pub fn storage_account_type(vm_size: &str) -> Option<&'static str> {
    let capability = vm_size.split('_').nth(1)?;
    if capability.to_lowercase().contains('s') {
        Some("Premium_LRS")
    } else {
        Some("Standard_LRS")
    }
}

/// The self-hosted control plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterProfile {
    pub count: i32,
    pub dns_prefix: String,
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
    pub subnet: String,
    #[serde(rename = "subnetIPv6")]
    pub subnet_ipv6: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
    #[serde(rename = "HTTPSourceAddressPrefix", skip_serializing_if = "String::is_empty")]
    pub http_source_address_prefix: String,
    pub oauth_enabled: bool,
    #[serde(rename = "preProvisionExtension")]
    pub preprovision_extension: Option<Extension>,
    pub extensions: Vec<Extension>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub distro: Option<Distro>,
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
    /// Master load balancer endpoint. Returned on GET only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    /// Use a cosmos etcd endpoint instead of running etcd on the masters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmos_etcd: Option<bool>,
}

impl MasterProfile {
    pub fn has_image_ref(&self) -> bool {
        self.image_ref
            .as_ref()
            .map(ImageReference::is_custom_image)
            .unwrap_or(false)
    }

    pub fn has_image_gallery(&self) -> bool {
        self.image_ref
            .as_ref()
            .map(ImageReference::is_gallery_image)
            .unwrap_or(false)
    }

    pub fn is_custom_vnet(&self) -> bool {
        !self.vnet_subnet_id.is_empty()
    }

    pub fn is_managed_disks(&self) -> bool {
        self.storage_profile == Some(StorageProfile::ManagedDisks)
    }

    pub fn is_storage_account(&self) -> bool {
        self.storage_profile == Some(StorageProfile::StorageAccount)
    }

    pub fn is_rhel(&self) -> bool {
        self.distro == Some(Distro::Rhel)
    }

    pub fn is_coreos(&self) -> bool {
        self.distro == Some(Distro::CoreOs)
    }

    pub fn is_vhd_distro(&self) -> bool {
        self.distro.map(|distro| distro.is_vhd()).unwrap_or(false)
    }

    pub fn is_virtual_machine_scale_sets(&self) -> bool {
        self.availability_profile == Some(AvailabilityProfile::VirtualMachineScaleSets)
    }

    /// The address of master 0 inside `subnet`.
    ///
    /// Scale set masters start at offset 4 of the subnet. Availability set masters are placed in
    /// the last /24 of the subnet at offset 5: every host bit above the last octet is set. A
    /// malformed CIDR yields the Kubernetes default address.
    pub fn first_consecutive_static_ip_address(&self, subnet: &str) -> String {
        let subnet: IpNet = match subnet.parse() {
            Ok(subnet) => subnet,
            Err(_) => return DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP.to_string(),
        };

        let ones = usize::from(subnet.prefix_len());
        let bits = usize::from(subnet.max_prefix_len());
        let first_octet = ones / 8;
        let last_octet = bits / 8 - 1;

        let mut octets = match subnet.network() {
            IpAddr::V4(address) => address.octets().to_vec(),
            IpAddr::V6(address) => address.octets().to_vec(),
        };

        if self.is_virtual_machine_scale_sets() {
            octets[last_octet] = DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS;
        } else {
            if first_octet < octets.len() {
                octets[first_octet] |= ((1u16 << (8 - ones % 8)) - 1) as u8;
            }
            for octet in octets.iter_mut().take(last_octet).skip(first_octet + 1) {
                *octet = 255;
            }
            octets[last_octet] = DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET;
        }

        octets_to_string(&octets)
    }

    pub fn has_availability_zones(&self) -> bool {
        !self.availability_zones.is_empty()
    }

    pub fn is_ubuntu_1604(&self) -> bool {
        self.distro.map(|d| d.is_ubuntu_1604()).unwrap_or(false)
    }

    pub fn is_ubuntu_1804(&self) -> bool {
        self.distro.map(|d| d.is_ubuntu_1804()).unwrap_or(false)
    }

    pub fn is_ubuntu(&self) -> bool {
        self.is_ubuntu_1604() || self.is_ubuntu_1804()
    }

    pub fn is_ubuntu_non_vhd(&self) -> bool {
        self.is_ubuntu() && !self.is_vhd_distro()
    }

    pub fn has_multiple_nodes(&self) -> bool {
        self.count > 1
    }

    pub fn has_cosmos_etcd(&self) -> bool {
        self.cosmos_etcd.unwrap_or(false)
    }

    /// The cosmos etcd endpoint for this master, empty when cosmos etcd is off.
    pub fn cosmos_endpoint_uri(&self) -> String {
        if self.has_cosmos_etcd() {
            format!("{}{}", self.dns_prefix, ETCD_ENDPOINT_URI_SUFFIX)
        } else {
            String::new()
        }
    }
}

fn octets_to_string(octets: &[u8]) -> String {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        Ipv4Addr::from(v4).to_string()
    } else if let Ok(v6) = <[u8; 16]>::try_from(octets) {
        Ipv6Addr::from(v6).to_string()
    } else {
        DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP.to_string()
    }
}

/// An agent pool.
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
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability_profile: Option<AvailabilityProfile>,
    pub platform_fault_domain_count: Option<i32>,
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
    pub subnet: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub distro: Option<Distro>,
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
    #[serde(rename = "preProvisionExtension")]
    pub preprovision_extension: Option<Extension>,
    pub extensions: Vec<Extension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,
    pub orchestrator_version: String,
    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_scaling: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_placement_group: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vnet_cidrs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_nodes_properties: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub windows_name_version: String,
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

impl AgentPoolProfile {
    pub fn has_image_ref(&self) -> bool {
        self.image_ref
            .as_ref()
            .map(ImageReference::is_custom_image)
            .unwrap_or(false)
    }

    pub fn has_image_gallery(&self) -> bool {
        self.image_ref
            .as_ref()
            .map(ImageReference::is_gallery_image)
            .unwrap_or(false)
    }

    pub fn is_custom_vnet(&self) -> bool {
        !self.vnet_subnet_id.is_empty()
    }

    pub fn is_windows(&self) -> bool {
        self.os_type == Some(OsType::Windows)
    }

    pub fn is_linux(&self) -> bool {
        self.os_type == Some(OsType::Linux)
    }

    pub fn is_rhel(&self) -> bool {
        self.is_linux() && self.distro == Some(Distro::Rhel)
    }

    pub fn is_coreos(&self) -> bool {
        self.is_linux() && self.distro == Some(Distro::CoreOs)
    }

    pub fn is_vhd_distro(&self) -> bool {
        self.distro.map(|distro| distro.is_vhd()).unwrap_or(false)
    }

    pub fn is_availability_sets(&self) -> bool {
        self.availability_profile == Some(AvailabilityProfile::AvailabilitySet)
    }

    pub fn is_virtual_machine_scale_sets(&self) -> bool {
        self.availability_profile == Some(AvailabilityProfile::VirtualMachineScaleSets)
    }

    pub fn is_low_priority_scale_set(&self) -> bool {
        self.is_virtual_machine_scale_sets()
            && self.scale_set_priority == Some(ScaleSetPriority::Low)
    }

    pub fn is_managed_disks(&self) -> bool {
        self.storage_profile == Some(StorageProfile::ManagedDisks)
    }

    pub fn is_storage_account(&self) -> bool {
        self.storage_profile == Some(StorageProfile::StorageAccount)
    }

    pub fn is_ephemeral(&self) -> bool {
        self.storage_profile == Some(StorageProfile::Ephemeral)
    }

    pub fn has_disks(&self) -> bool {
        !self.disk_sizes_gb.is_empty()
    }

    pub fn has_availability_zones(&self) -> bool {
        !self.availability_zones.is_empty()
    }

    pub fn is_ubuntu_1604(&self) -> bool {
        !self.is_windows() && self.distro.map(|d| d.is_ubuntu_1604()).unwrap_or(false)
    }

    pub fn is_ubuntu_1804(&self) -> bool {
        !self.is_windows() && self.distro.map(|d| d.is_ubuntu_1804()).unwrap_or(false)
    }

    pub fn is_ubuntu(&self) -> bool {
        self.is_ubuntu_1604() || self.is_ubuntu_1804()
    }

    pub fn is_ubuntu_non_vhd(&self) -> bool {
        self.is_ubuntu() && !self.is_vhd_distro()
    }

    pub fn is_n_series_sku(&self) -> bool {
        is_nvidia_enabled_sku(&self.vm_size)
    }

    /// The node labels of this pool, in the order kubelet receives them.
    ///
    /// `deprecated` adds the legacy role labels. Custom labels come last, ordered by key.
    pub fn kubernetes_labels(&self, resource_group: &str, deprecated: bool) -> String {
        let mut labels = String::from("kubernetes.azure.com/role=agent");
        if deprecated {
            labels.push_str(",node-role.kubernetes.io/agent=");
            labels.push_str(",kubernetes.io/role=agent");
        }
        labels.push_str(&format!(",agentpool={}", self.name));
        if self.is_managed_disks() {
            let storage_tier = storage_account_type(&self.vm_size).unwrap_or_default();
            labels.push_str(&format!(
                ",storageprofile=managed,storagetier={}",
                storage_tier
            ));
        }
        if self.is_n_series_sku() {
            labels.push_str(",accelerator=nvidia");
        }
        labels.push_str(&format!(",kubernetes.azure.com/cluster={}", resource_group));
        for (key, value) in &self.custom_node_labels {
            labels.push_str(&format!(",{}={}", key, value));
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;

    fn master(availability_profile: Option<AvailabilityProfile>) -> MasterProfile {
        MasterProfile {
            availability_profile,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_consecutive_static_ip() {
        let vmas = master(Some(AvailabilityProfile::AvailabilitySet));
        let vmss = master(Some(AvailabilityProfile::VirtualMachineScaleSets));
        let unset = master(None);

        for (subnet, expected_vmas, expected_vmss) in [
            ("10.240.0.0/16", "10.240.255.5", "10.240.0.4"),
            ("10.0.0.0/8", "10.255.255.5", "10.0.0.4"),
            ("172.16.0.0/24", "172.16.0.5", "172.16.0.4"),
            ("10.240.0.0/12", "10.255.255.5", "10.240.0.4"),
            ("192.168.1.0/28", "192.168.1.5", "192.168.1.4"),
        ] {
            assert_eq!(vmas.first_consecutive_static_ip_address(subnet), expected_vmas);
            assert_eq!(unset.first_consecutive_static_ip_address(subnet), expected_vmas);
            assert_eq!(vmss.first_consecutive_static_ip_address(subnet), expected_vmss);
        }
    }

    #[test]
    fn test_first_consecutive_static_ip_malformed_falls_back() {
        for subnet in ["not-a-cidr", "", "10.240.0.0", "10.240.0.0/33"] {
            assert_eq!(
                master(None).first_consecutive_static_ip_address(subnet),
                "10.240.255.5"
            );
            assert_eq!(
                master(Some(AvailabilityProfile::VirtualMachineScaleSets))
                    .first_consecutive_static_ip_address(subnet),
                "10.240.255.5"
            );
        }
    }

    #[test]
    fn test_cosmos_endpoint() {
        let mut profile = MasterProfile {
            dns_prefix: "mycluster".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.cosmos_endpoint_uri(), "");
        profile.cosmos_etcd = Some(true);
        assert_eq!(
            profile.cosmos_endpoint_uri(),
            "myclusterk8s.etcd.cosmosdb.azure.com"
        );
    }

    #[test]
    fn test_distro_queries() {
        let agent = AgentPoolProfile {
            os_type: Some(OsType::Linux),
            distro: Some(Distro::AksUbuntu1804),
            ..Default::default()
        };
        assert!(agent.is_vhd_distro());
        assert!(agent.is_ubuntu_1804());
        assert!(!agent.is_ubuntu_non_vhd());

        let windows = AgentPoolProfile {
            os_type: Some(OsType::Windows),
            distro: Some(Distro::Ubuntu),
            ..Default::default()
        };
        assert!(!windows.is_ubuntu());

        let base = MasterProfile {
            distro: Some(Distro::Ubuntu),
            ..Default::default()
        };
        assert!(base.is_ubuntu_non_vhd());
        assert!(!base.is_rhel());
    }

    #[test]
    fn test_storage_account_type() {
        assert_eq!(storage_account_type("Standard_DS2_v2"), Some("Premium_LRS"));
        assert_eq!(storage_account_type("Standard_D2_v2"), Some("Standard_LRS"));
        assert_eq!(storage_account_type("bogus"), None);
    }

    #[test]
    fn test_kubernetes_labels() {
        let agent = AgentPoolProfile {
            name: "gpu".to_string(),
            vm_size: "Standard_NC6".to_string(),
            storage_profile: Some(StorageProfile::ManagedDisks),
            custom_node_labels: btreemap! {
                "zeta".to_string() => "z".to_string(),
                "alpha".to_string() => "a".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(
            agent.kubernetes_labels("my-rg", false),
            "kubernetes.azure.com/role=agent,agentpool=gpu,storageprofile=managed,\
             storagetier=Standard_LRS,accelerator=nvidia,kubernetes.azure.com/cluster=my-rg,\
             alpha=a,zeta=z"
        );

        let plain = AgentPoolProfile {
            name: "pool1".to_string(),
            vm_size: "Standard_D2_v2".to_string(),
            ..Default::default()
        };
        assert_eq!(
            plain.kubernetes_labels("rg", true),
            "kubernetes.azure.com/role=agent,node-role.kubernetes.io/agent=,\
             kubernetes.io/role=agent,agentpool=pool1,kubernetes.azure.com/cluster=rg"
        );
    }

    #[test]
    fn test_low_priority_scale_set() {
        let agent = AgentPoolProfile {
            availability_profile: Some(AvailabilityProfile::VirtualMachineScaleSets),
            scale_set_priority: Some(ScaleSetPriority::Low),
            ..Default::default()
        };
        assert!(agent.is_low_priority_scale_set());
        assert!(!agent.is_availability_sets());
    }
}
