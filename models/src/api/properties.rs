//! The cluster definition and the derived facts template generation reads from it.
use super::error::{self, Result};
use super::serde_helpers::optional_enum;
use super::{
    AadProfile, AddonProfile, AgentPoolProfile, AuthenticationMethod, CertificateProfile,
    ClusterId, ClusterMetadata, CustomCloudProfile, CustomProfile, DiagnosticsProfile, Distro,
    ExtensionProfile, FeatureFlags, HostedMasterProfile, IdentitySystem, JumpboxProfile,
    LinuxProfile, MasterProfile, OrchestratorProfile, OsType, ProvisioningState,
    ServicePrincipalProfile, StorageProfile, WindowsProfile,
};
use crate::constants::{
    DEFAULT_CNI_CIDR, DEFAULT_HOSTED_PROFILE_MASTER_NAME,
    DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET,
    DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS, DEFAULT_ORCHESTRATOR_NAME,
    DEFAULT_SUBNET_NAME_RESOURCE_SEGMENT_INDEX, DEFAULT_VNET_CIDR,
    DEFAULT_VNET_NAME_RESOURCE_SEGMENT_INDEX, DEFAULT_VNET_RESOURCE_GROUP_SEGMENT_INDEX,
    FEATURE_ENABLE_IPV6_DUAL_STACK, MAX_AGENT_COUNT, MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR,
    NVIDIA_DEVICE_PLUGIN_ADDON_NAME,
};
use crate::orchestrators::is_version_ge;

use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::collections::BTreeMap;

/// The control plane of a cluster: managed by the service, or modeled by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Topology<'a> {
    Hosted(&'a HostedMasterProfile),
    SelfHosted(&'a MasterProfile),
}

/// The cluster definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(rename = "ClusterID", skip_serializing_if = "ClusterId::is_empty")]
    pub cluster_id: ClusterId,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestrator_profile: Option<OrchestratorProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_profile: Option<MasterProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,
    pub extension_profiles: Vec<ExtensionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics_profile: Option<DiagnosticsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpbox_profile: Option<JumpboxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_profile: Option<CertificateProfile>,
    #[serde(rename = "aadProfile", skip_serializing_if = "Option::is_none")]
    pub aad_profile: Option<AadProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_profile: Option<CustomProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_master_profile: Option<HostedMasterProfile>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub addon_profiles: BTreeMap<String, AddonProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_flags: Option<FeatureFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_cloud_profile: Option<CustomCloudProfile>,
}

impl Properties {
    /// The control plane of the cluster. Exactly one of the two master profiles must be set.
    pub fn topology(&self) -> Result<Topology<'_>> {
        match (&self.hosted_master_profile, &self.master_profile) {
            (Some(hosted), None) => Ok(Topology::Hosted(hosted)),
            (None, Some(master)) => Ok(Topology::SelfHosted(master)),
            (Some(_), Some(_)) => error::TopologyAmbiguousSnafu.fail(),
            (None, None) => error::TopologyMissingSnafu.fail(),
        }
    }

    pub fn is_hosted_master_profile(&self) -> bool {
        self.hosted_master_profile.is_some()
    }

    /// The memoized cluster identifier.
    ///
    /// Derived on first access from the master DNS prefix, the hosted master DNS prefix or the
    /// name of the first agent pool, whichever is present first.
    pub fn cluster_id(&self) -> &str {
        let seed = if let Some(master) = &self.master_profile {
            master.dns_prefix.as_str()
        } else if let Some(hosted) = &self.hosted_master_profile {
            hosted.dns_prefix.as_str()
        } else if let Some(pool) = self.agent_pool_profiles.first() {
            pool.name.as_str()
        } else {
            ""
        };
        self.cluster_id.get_or_derive(seed)
    }

    fn is_kubernetes(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .map(OrchestratorProfile::is_kubernetes)
            .unwrap_or(false)
    }

    fn is_azure_cni(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .map(OrchestratorProfile::is_azure_cni)
            .unwrap_or(false)
    }

    /// Three letter orchestrator code used in resource names. Empty for non-Kubernetes clusters.
    pub fn k8s_orchestrator_name(&self) -> &'static str {
        match (self.is_kubernetes(), self.is_hosted_master_profile()) {
            (true, true) => DEFAULT_HOSTED_PROFILE_MASTER_NAME,
            (true, false) => DEFAULT_ORCHESTRATOR_NAME,
            (false, _) => "",
        }
    }

    pub fn has_core_os(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.distro == Some(Distro::CoreOs))
    }

    pub fn has_windows(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.os_type == Some(OsType::Windows))
    }

    fn private_jumpbox_storage_profile(&self) -> Option<StorageProfile> {
        let config = self.orchestrator_profile.as_ref()?.kubernetes_config.as_ref()?;
        if !config.private_jumpbox_provision() {
            return None;
        }
        config
            .private_cluster
            .as_ref()?
            .jumpbox_profile
            .as_ref()?
            .storage_profile
    }

    fn uses_storage_profile(&self, storage: StorageProfile) -> bool {
        self.master_profile
            .as_ref()
            .map(|master| master.storage_profile == Some(storage))
            .unwrap_or(false)
            || self
                .agent_pool_profiles
                .iter()
                .any(|pool| pool.storage_profile == Some(storage))
            || self.private_jumpbox_storage_profile() == Some(storage)
    }

    pub fn has_managed_disks(&self) -> bool {
        self.uses_storage_profile(StorageProfile::ManagedDisks)
    }

    pub fn has_storage_account_disks(&self) -> bool {
        self.uses_storage_profile(StorageProfile::StorageAccount)
    }

    pub fn has_ephemeral_disks(&self) -> bool {
        self.agent_pool_profiles.iter().any(AgentPoolProfile::is_ephemeral)
    }

    pub fn total_nodes(&self) -> i32 {
        let masters = self
            .master_profile
            .as_ref()
            .map(|master| master.count)
            .unwrap_or(0);
        masters
            + self
                .agent_pool_profiles
                .iter()
                .map(|pool| pool.count)
                .sum::<i32>()
    }

    pub fn has_vmss_agent_pool(&self) -> bool {
        self.any_agent_uses_virtual_machine_scale_sets()
    }

    pub fn any_agent_uses_virtual_machine_scale_sets(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_virtual_machine_scale_sets)
    }

    pub fn any_agent_uses_availability_sets(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_availability_sets)
    }

    pub fn any_agent_is_linux(&self) -> bool {
        self.agent_pool_profiles.iter().any(AgentPoolProfile::is_linux)
    }

    pub fn any_agent_has_load_balancer_backend_address_pool_ids(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.load_balancer_backend_address_pool_ids.is_some())
    }

    pub fn agent_pool_index_by_name(&self, name: &str) -> Option<usize> {
        self.agent_pool_profiles
            .iter()
            .position(|pool| pool.name == name)
    }

    /// The VM name prefix of the agent pool at `index`.
    pub fn agent_vm_prefix(&self, pool: &AgentPoolProfile, index: usize) -> String {
        let orchestrator = self.k8s_orchestrator_name();
        let cluster_id = self.cluster_id();
        if pool.is_windows() {
            if pool.windows_name_version == "v2" {
                format!("{}{}", orchestrator, pool.name)
            } else {
                let short_id = cluster_id.get(..4).unwrap_or(cluster_id);
                format!("{}{}{:02}", short_id, orchestrator, index)
            }
        } else {
            let mut prefix = format!("{}-{}-{}-", orchestrator, pool.name, cluster_id);
            if pool.is_virtual_machine_scale_sets() {
                prefix.push_str("vmss");
            }
            prefix
        }
    }

    pub fn master_vm_prefix(&self) -> String {
        format!("{}-master-{}-", self.k8s_orchestrator_name(), self.cluster_id())
    }

    /// Prefix of every cluster-wide resource name.
    pub fn resource_prefix(&self) -> String {
        let role = if self.is_hosted_master_profile() {
            "agentpool"
        } else {
            "master"
        };
        format!(
            "{}-{}-{}-",
            self.k8s_orchestrator_name(),
            role,
            self.cluster_id()
        )
    }

    pub fn route_table_name(&self) -> String {
        format!("{}routetable", self.resource_prefix())
    }

    pub fn nsg_name(&self) -> String {
        format!("{}nsg", self.resource_prefix())
    }

    /// Availability set of the first agent pool, when that pool uses availability sets.
    pub fn primary_availability_set_name(&self) -> String {
        match self.agent_pool_profiles.first() {
            Some(pool) if pool.is_availability_sets() => {
                format!("{}-availabilitySet-{}", pool.name, self.cluster_id())
            }
            _ => String::new(),
        }
    }

    /// Scale set of the first agent pool, when that pool uses scale sets.
    pub fn primary_scale_set_name(&self) -> String {
        match self.agent_pool_profiles.first() {
            Some(pool) if pool.is_virtual_machine_scale_sets() => self.agent_vm_prefix(pool, 0),
            _ => String::new(),
        }
    }

    /// True when the cluster has agent pools and every one of them sits in a custom VNET.
    pub fn are_agent_profiles_custom_vnet(&self) -> bool {
        !self.agent_pool_profiles.is_empty()
            && self
                .agent_pool_profiles
                .iter()
                .all(AgentPoolProfile::is_custom_vnet)
    }

    /// The subnet resource ID naming the custom VNET of the cluster, if it has one.
    fn custom_vnet_subnet_id(&self) -> Option<&str> {
        if self.is_hosted_master_profile() {
            if self.are_agent_profiles_custom_vnet() {
                return self
                    .agent_pool_profiles
                    .first()
                    .map(|pool| pool.vnet_subnet_id.as_str());
            }
            None
        } else {
            self.master_profile
                .as_ref()
                .filter(|master| master.is_custom_vnet())
                .map(|master| master.vnet_subnet_id.as_str())
        }
    }

    fn custom_vnet_segment(&self, index: usize) -> Option<String> {
        self.custom_vnet_subnet_id()
            .map(|id| id.split('/').nth(index).unwrap_or_default().to_string())
    }

    pub fn vnet_resource_group_name(&self) -> String {
        self.custom_vnet_segment(DEFAULT_VNET_RESOURCE_GROUP_SEGMENT_INDEX)
            .unwrap_or_default()
    }

    pub fn virtual_network_name(&self) -> String {
        self.custom_vnet_segment(DEFAULT_VNET_NAME_RESOURCE_SEGMENT_INDEX)
            .unwrap_or_else(|| {
                format!("{}-vnet-{}", self.k8s_orchestrator_name(), self.cluster_id())
            })
    }

    pub fn subnet_name(&self) -> String {
        self.custom_vnet_segment(DEFAULT_SUBNET_NAME_RESOURCE_SEGMENT_INDEX)
            .unwrap_or_else(|| format!("{}-subnet", self.k8s_orchestrator_name()))
    }

    pub fn cluster_metadata(&self) -> ClusterMetadata {
        ClusterMetadata {
            subnet_name: self.subnet_name(),
            vnet_resource_group_name: self.vnet_resource_group_name(),
            virtual_network_name: self.virtual_network_name(),
            security_group_name: self.nsg_name(),
            route_table_name: self.route_table_name(),
            primary_availability_set_name: self.primary_availability_set_name(),
            primary_scale_set_name: self.primary_scale_set_name(),
            resource_prefix: self.resource_prefix(),
        }
    }

    /// Hosted clusters follow their master profile; otherwise the ip-masq-agent addon decides.
    pub fn is_ip_masq_agent_enabled(&self) -> bool {
        if let Some(hosted) = &self.hosted_master_profile {
            return hosted.ip_masq_agent;
        }
        self.orchestrator_profile
            .as_ref()
            .and_then(|profile| profile.kubernetes_config.as_ref())
            .map(|config| config.is_ip_masq_agent_enabled())
            .unwrap_or(false)
    }

    pub fn has_zones_for_all_agent_pools(&self) -> bool {
        !self.agent_pool_profiles.is_empty()
            && self
                .agent_pool_profiles
                .iter()
                .all(AgentPoolProfile::has_availability_zones)
    }

    pub fn has_availability_zones(&self) -> bool {
        self.master_profile
            .as_ref()
            .map(MasterProfile::has_availability_zones)
            .unwrap_or(false)
            || self
                .agent_pool_profiles
                .iter()
                .any(AgentPoolProfile::has_availability_zones)
    }

    pub fn is_vhd_distro_for_all_nodes(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .all(AgentPoolProfile::is_vhd_distro)
            && self
                .master_profile
                .as_ref()
                .map(MasterProfile::is_vhd_distro)
                .unwrap_or(true)
    }

    /// Whether the agents and master all run a base (non-VHD) Ubuntu image.
    pub fn is_ubuntu_distro_for_all_nodes(&self) -> bool {
        let is_base_ubuntu = |distro: Option<Distro>| {
            distro.map(|distro| distro.is_base_ubuntu()).unwrap_or(false)
        };
        self.agent_pool_profiles
            .iter()
            .all(|pool| is_base_ubuntu(pool.distro))
            && self
                .master_profile
                .as_ref()
                .map(|master| is_base_ubuntu(master.distro))
                .unwrap_or(true)
    }

    fn any_node_has_distro(&self, predicate: impl Fn(Distro) -> bool) -> bool {
        let matches = |distro: Option<Distro>| distro.map(&predicate).unwrap_or(false);
        self.agent_pool_profiles
            .iter()
            .any(|pool| matches(pool.distro))
            || self
                .master_profile
                .as_ref()
                .map(|master| matches(master.distro))
                .unwrap_or(false)
    }

    pub fn has_ubuntu_distro_nodes(&self) -> bool {
        self.any_node_has_distro(|distro| distro.is_base_ubuntu())
    }

    pub fn has_ubuntu_1604_distro_nodes(&self) -> bool {
        self.any_node_has_distro(|distro| distro == Distro::Ubuntu)
    }

    pub fn has_ubuntu_1804_distro_nodes(&self) -> bool {
        self.any_node_has_distro(|distro| distro == Distro::Ubuntu1804)
    }

    /// The CIDR ip-masq-agent leaves unmasqueraded. Empty for hosted clusters.
    pub fn non_masquerade_cidr(&self) -> String {
        if self.is_hosted_master_profile() {
            return String::new();
        }
        if self.is_azure_cni() {
            return match &self.master_profile {
                Some(master) if master.is_custom_vnet() => master.vnet_cidr.clone(),
                _ => DEFAULT_VNET_CIDR.to_string(),
            };
        }
        let cluster_subnet = self
            .orchestrator_profile
            .as_ref()
            .and_then(|profile| profile.kubernetes_config.as_ref())
            .map(|config| config.cluster_subnet.as_str())
            .unwrap_or_default();
        if self.is_feature_enabled(FEATURE_ENABLE_IPV6_DUAL_STACK) {
            // kube-proxy accepts a single CIDR: keep the IPv4 one
            cluster_subnet
                .split(',')
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            cluster_subnet.to_string()
        }
    }

    pub fn azure_cni_cidr(&self) -> &'static str {
        if self.is_azure_cni() {
            DEFAULT_CNI_CIDR
        } else {
            ""
        }
    }

    pub fn master_fqdn(&self) -> &str {
        match (&self.hosted_master_profile, &self.master_profile) {
            (Some(hosted), _) => &hosted.fqdn,
            (None, Some(master)) => &master.fqdn,
            (None, None) => "",
        }
    }

    pub fn has_aad_profile(&self) -> bool {
        self.aad_profile.is_some()
    }

    pub fn is_feature_enabled(&self, feature: &str) -> bool {
        self.feature_flags
            .as_ref()
            .map(|flags| flags.is_feature_enabled(feature))
            .unwrap_or(false)
    }

    /// Whether any agent pool runs on an N-series (GPU) VM size.
    pub fn has_n_series_sku(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.vm_size.contains("Standard_N"))
    }

    pub fn is_nvidia_device_plugin_enabled(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .and_then(|profile| profile.kubernetes_config.as_ref())
            .map(|config| config.is_addon_enabled(NVIDIA_DEVICE_PLUGIN_ADDON_NAME))
            .unwrap_or(false)
    }

    /// GPU pools on Kubernetes 1.10.0 or later can run the nvidia device plugin.
    pub fn is_nvidia_device_plugin_capable(&self) -> bool {
        let version = self
            .orchestrator_profile
            .as_ref()
            .map(|profile| profile.orchestrator_version.as_str())
            .unwrap_or_default();
        self.has_n_series_sku() && is_version_ge(version, "1.10.0")
    }

    pub fn is_azure_stack_cloud(&self) -> bool {
        self.custom_cloud_profile.is_some()
    }

    /// The custom cloud environment as JSON, with quotes escaped when `escape` is set. Empty
    /// unless the cluster targets a custom cloud.
    pub fn custom_environment_json(&self, escape: bool) -> Result<String> {
        let profile = match &self.custom_cloud_profile {
            Some(profile) => profile,
            None => return Ok(String::new()),
        };
        let json =
            serde_json::to_string(&profile.environment).context(error::EnvironmentSerializeSnafu)?;
        Ok(if escape {
            json.replace('"', "\\\"")
        } else {
            json
        })
    }

    /// Name of the custom cloud environment. Empty for the well-known clouds.
    pub fn custom_cloud_name(&self) -> &str {
        self.custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.environment.as_ref())
            .map(|environment| environment.name.as_str())
            .unwrap_or_default()
    }

    pub fn custom_cloud_authentication_method(&self) -> AuthenticationMethod {
        self.custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.authentication_method)
            .unwrap_or_default()
    }

    pub fn custom_cloud_identity_system(&self) -> IdentitySystem {
        self.custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.identity_system)
            .unwrap_or_default()
    }

    /// Fills the unset cloud provider rate limits.
    ///
    /// Self-hosted clusters with scale set pools get a bucket sized to the largest possible
    /// number of scale set VMs. The QPS never drops below a tenth of the bucket.
    pub fn set_cloud_provider_rate_limit_defaults(&mut self) {
        let vmss_bucket = if self.has_vmss_agent_pool() && !self.is_hosted_master_profile() {
            let vmss_pools = self
                .agent_pool_profiles
                .iter()
                .filter(|pool| pool.is_virtual_machine_scale_sets())
                .count() as i32;
            Some(vmss_pools * MAX_AGENT_COUNT)
        } else {
            None
        };
        let config = match self
            .orchestrator_profile
            .as_mut()
            .and_then(|profile| profile.kubernetes_config.as_mut())
        {
            Some(config) => config,
            None => return,
        };

        if config.cloud_provider_rate_limit_bucket == 0 {
            config.cloud_provider_rate_limit_bucket =
                vmss_bucket.unwrap_or(DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET);
        }
        if config.cloud_provider_rate_limit_qps == 0.0 {
            let bucket = f64::from(config.cloud_provider_rate_limit_bucket);
            config.cloud_provider_rate_limit_qps =
                if DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS / bucket
                    < MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR
                {
                    bucket * MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR
                } else {
                    DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS
                };
        }
    }
}
