//! Orchestrator profile and the orchestrator-specific configuration it carries.
use super::serde_helpers::{is_false, is_zero, optional_enum};
use super::{ContainerRuntime, KubeProxyMode, NetworkPlugin, NetworkPolicy, OrchestratorType};
use super::StorageProfile;
use crate::cloud::AzureEnvironmentSpecConfig;
use crate::constants::{
    AAD_POD_IDENTITY_ADDON_NAME, APP_GW_INGRESS_ADDON_NAME, CLUSTER_AUTOSCALER_ADDON_NAME,
    DCOS_VERSION_1_9_0, DCOS_VERSION_1_9_8, DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION,
    DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT,
    DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER,
    DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES, IP_MASQ_AGENT_ADDON_NAME,
    RESCHEDULER_ADDON_NAME,
};
use crate::orchestrators::is_version_ge;

use schemars::JsonSchema;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// The orchestrator of a cluster and its configuration.
///
/// Only the configuration matching `orchestrator_type` is populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorProfile {
    pub orchestrator_type: OrchestratorType,
    #[serde(default)]
    pub orchestrator_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dcos_config: Option<DcosConfig>,
}

impl OrchestratorProfile {
    pub fn new<S: Into<String>>(orchestrator_type: OrchestratorType, version: S) -> Self {
        Self {
            orchestrator_type,
            orchestrator_version: version.into(),
            kubernetes_config: None,
            dcos_config: None,
        }
    }

    pub fn is_swarm_mode(&self) -> bool {
        self.orchestrator_type == OrchestratorType::SwarmMode
    }

    pub fn is_kubernetes(&self) -> bool {
        self.orchestrator_type == OrchestratorType::Kubernetes
    }

    pub fn is_dcos(&self) -> bool {
        self.orchestrator_type == OrchestratorType::Dcos
    }

    /// True for the DC/OS 1.9 releases.
    pub fn is_dcos19(&self) -> bool {
        self.is_dcos()
            && (self.orchestrator_version == DCOS_VERSION_1_9_0
                || self.orchestrator_version == DCOS_VERSION_1_9_8)
    }

    pub fn is_azure_cni(&self) -> bool {
        self.kubernetes_config
            .as_ref()
            .map(|config| config.network_plugin == Some(NetworkPlugin::Azure))
            .unwrap_or(false)
    }

    /// Whether the deployment needs a route table. Only kubenet Kubernetes clusters without the
    /// cilium policy do.
    pub fn require_route_table(&self) -> bool {
        if !self.is_kubernetes() || self.is_azure_cni() {
            return false;
        }
        match &self.kubernetes_config {
            Some(config) => {
                config.network_policy != Some(NetworkPolicy::Cilium)
                    && config.network_plugin != Some(NetworkPlugin::Flannel)
            }
            None => true,
        }
    }

    pub fn is_private_cluster(&self) -> bool {
        self.is_kubernetes()
            && self
                .kubernetes_config
                .as_ref()
                .and_then(|config| config.private_cluster.as_ref())
                .and_then(|private| private.enabled)
                .unwrap_or(false)
    }

    /// Kubernetes 1.7 and 1.8 clusters need the exechealthz pod.
    pub fn needs_exec_healthz(&self) -> bool {
        self.is_kubernetes()
            && is_version_ge(&self.orchestrator_version, "1.7.0")
            && !is_version_ge(&self.orchestrator_version, "1.9.0")
    }

    /// The `etcd<major>` storage backend name handed to the API server, or empty when there is
    /// no Kubernetes configuration.
    pub fn api_server_etcd_api_version(&self) -> String {
        match &self.kubernetes_config {
            Some(config) => {
                let major = Version::parse(&config.etcd_version)
                    .map(|version| version.major)
                    .unwrap_or(0);
                format!("etcd{}", major)
            }
            None => String::new(),
        }
    }
}

/// A supported orchestrator version, whether it is the default, and the versions it can upgrade to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorVersionProfile {
    #[serde(flatten)]
    pub orchestrator_profile: OrchestratorProfile,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upgrades: Vec<OrchestratorProfile>,
}

/// Container resources of an addon.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KubernetesContainerSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(rename = "cpuRequests", skip_serializing_if = "String::is_empty")]
    pub cpu_requests: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory_requests: String,
    #[serde(rename = "cpuLimits", skip_serializing_if = "String::is_empty")]
    pub cpu_limits: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory_limits: String,
}

/// A Kubernetes addon and its configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KubernetesAddon {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<KubernetesContainerSpec>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
}

impl KubernetesAddon {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn container_index_by_name(&self, container_name: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|container| container.name == container_name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivateCluster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpbox_profile: Option<PrivateJumpboxProfile>,
}

/// A jumpbox provisioned for a private cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivateJumpboxProfile {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    #[validate(range(min = 0, max = 1023))]
    pub os_disk_size_gb: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[validate(length(min = 1))]
    pub public_key: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_profile: Option<StorageProfile>,
}

/// Kubernetes specific configuration.
///
/// Optional booleans are tri-state: unset means the computed default applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KubernetesConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_image_base: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_subnet: String,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_policy: Option<NetworkPolicy>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_plugin: Option<NetworkPlugin>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_runtime: Option<ContainerRuntime>,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_pods: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_bridge_subnet: String,
    #[serde(rename = "dnsServiceIP", skip_serializing_if = "String::is_empty")]
    pub dns_service_ip: String,
    #[serde(rename = "serviceCidr", skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,
    #[serde(skip_serializing_if = "is_false")]
    pub use_managed_identity: bool,
    #[serde(rename = "userAssignedID", skip_serializing_if = "String::is_empty")]
    pub user_assigned_id: String,
    /// Never read from a definition; carried into azure.json only.
    #[serde(rename = "userAssignedClientID", skip_serializing_if = "String::is_empty")]
    pub user_assigned_client_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_hyperkube_image: String,
    /// Deprecated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_engine_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub moby_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub containerd_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_ccm_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cloud_controller_manager: Option<bool>,
    #[serde(rename = "customWindowsPackageURL", skip_serializing_if = "String::is_empty")]
    pub custom_windows_package_url: String,
    #[serde(rename = "windowsNodeBinariesURL", skip_serializing_if = "String::is_empty")]
    pub windows_node_binaries_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_instance_metadata: Option<bool>,
    #[serde(rename = "enableRbac", skip_serializing_if = "Option::is_none")]
    pub enable_rbac: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_kubelet: Option<bool>,
    #[serde(rename = "enableAggregatedAPIs", skip_serializing_if = "is_false")]
    pub enable_aggregated_apis: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_cluster: Option<PrivateCluster>,
    #[serde(rename = "gchighthreshold", skip_serializing_if = "is_zero")]
    pub gc_high_threshold: i32,
    #[serde(rename = "gclowthreshold", skip_serializing_if = "is_zero")]
    pub gc_low_threshold: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_version: String,
    #[serde(rename = "etcdDiskSizeGB", skip_serializing_if = "String::is_empty")]
    pub etcd_disk_size_gb: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_encryption_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_data_encryption_at_rest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_encryption_with_external_kms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pod_security_policy: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<KubernetesAddon>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub kubelet_config: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub controller_manager_config: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cloud_controller_manager_config: BTreeMap<String, String>,
    #[serde(rename = "apiServerConfig", skip_serializing_if = "BTreeMap::is_empty")]
    pub api_server_config: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scheduler_config: BTreeMap<String, String>,
    /// Deprecated.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub pod_security_policy_config: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_backoff: Option<bool>,
    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_retries: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_jitter: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_duration: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_exponent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_rate_limit: Option<bool>,
    #[serde(rename = "cloudProviderRateLimitQPS", skip_serializing_if = "is_zero")]
    pub cloud_provider_rate_limit_qps: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_rate_limit_bucket: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub non_masquerade_cidr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_status_update_frequency: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hard_eviction_threshold: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ctrl_mgr_node_monitor_grace_period: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ctrl_mgr_pod_eviction_timeout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ctrl_mgr_route_reconciliation_period: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub load_balancer_sku: String,
    #[serde(rename = "excludeMasterFromStandardLB", skip_serializing_if = "Option::is_none")]
    pub exclude_master_from_standard_lb: Option<bool>,
    #[serde(rename = "azureCNIVersion", skip_serializing_if = "String::is_empty")]
    pub azure_cni_version: String,
    #[serde(rename = "azureCNIURLLinux", skip_serializing_if = "String::is_empty")]
    pub azure_cni_url_linux: String,
    #[serde(rename = "azureCNIURLWindows", skip_serializing_if = "String::is_empty")]
    pub azure_cni_url_windows: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_vault_sku: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub maximum_load_balancer_rule_count: i32,
    #[serde(
        rename = "kubeProxyMode",
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub proxy_mode: Option<KubeProxyMode>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_azure_registry_server: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub outbound_rule_idle_timeout_in_minutes: i32,
}

impl KubernetesConfig {
    pub fn addon_by_name(&self, addon_name: &str) -> Option<&KubernetesAddon> {
        self.addons.iter().find(|addon| addon.name == addon_name)
    }

    /// The raw script data supplied for an addon, or empty.
    pub fn addon_script(&self, addon_name: &str) -> &str {
        self.addon_by_name(addon_name)
            .map(|addon| addon.data.as_str())
            .unwrap_or_default()
    }

    /// An addon is enabled only when it is listed and explicitly enabled.
    pub fn is_addon_enabled(&self, addon_name: &str) -> bool {
        self.addon_by_name(addon_name)
            .map(KubernetesAddon::is_enabled)
            .unwrap_or(false)
    }

    pub fn is_aad_pod_identity_enabled(&self) -> bool {
        self.is_addon_enabled(AAD_POD_IDENTITY_ADDON_NAME)
    }

    pub fn is_cluster_autoscaler_enabled(&self) -> bool {
        self.is_addon_enabled(CLUSTER_AUTOSCALER_ADDON_NAME)
    }

    pub fn is_app_gw_ingress_enabled(&self) -> bool {
        self.is_addon_enabled(APP_GW_INGRESS_ADDON_NAME)
    }

    pub fn is_ip_masq_agent_enabled(&self) -> bool {
        self.is_addon_enabled(IP_MASQ_AGENT_ADDON_NAME)
    }

    pub fn is_rescheduler_enabled(&self) -> bool {
        self.is_addon_enabled(RESCHEDULER_ADDON_NAME)
    }

    pub fn is_rbac_enabled(&self) -> bool {
        self.enable_rbac.unwrap_or(false)
    }

    pub fn user_assigned_id_enabled(&self) -> bool {
        self.use_managed_identity && !self.user_assigned_id.is_empty()
    }

    pub fn user_assigned_client_id_enabled(&self) -> bool {
        self.use_managed_identity && !self.user_assigned_client_id.is_empty()
    }

    pub fn user_assigned_id(&self) -> &str {
        if self.user_assigned_id_enabled() {
            &self.user_assigned_id
        } else {
            ""
        }
    }

    pub fn user_assigned_client_id(&self) -> &str {
        if self.user_assigned_client_id_enabled() {
            &self.user_assigned_client_id
        } else {
            ""
        }
    }

    /// Kubelet flags as `key=value ` pairs, ordered by key.
    pub fn ordered_kubelet_config_string(&self) -> String {
        self.kubelet_config
            .iter()
            .map(|(key, value)| format!("{}={} ", key, value))
            .collect()
    }

    /// Kubelet flags as a PowerShell array body: `"key=value", "key=value"`, ordered by key.
    pub fn ordered_kubelet_config_string_for_powershell(&self) -> String {
        self.kubelet_config
            .iter()
            .map(|(key, value)| format!("\"{}={}\"", key, value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether a private cluster has a jumpbox to auto-provision.
    pub fn private_jumpbox_provision(&self) -> bool {
        self.private_cluster
            .as_ref()
            .map(|private| private.enabled.unwrap_or(false) && private.jumpbox_profile.is_some())
            .unwrap_or(false)
    }

    pub fn requires_docker(&self) -> bool {
        matches!(self.container_runtime, None | Some(ContainerRuntime::Docker))
    }

    /// Fills every unset cloud provider backoff tunable with its default.
    pub fn set_cloud_provider_backoff_defaults(&mut self) {
        if self.cloud_provider_backoff_duration == 0 {
            self.cloud_provider_backoff_duration =
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION;
        }
        if self.cloud_provider_backoff_exponent == 0.0 {
            self.cloud_provider_backoff_exponent =
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT;
        }
        if self.cloud_provider_backoff_jitter == 0.0 {
            self.cloud_provider_backoff_jitter = DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER;
        }
        if self.cloud_provider_backoff_retries == 0 {
            self.cloud_provider_backoff_retries = DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES;
        }
    }

    pub fn azure_cni_url_linux<'a>(&'a self, spec: &'a AzureEnvironmentSpecConfig) -> &'a str {
        if self.azure_cni_url_linux.is_empty() {
            &spec.kubernetes_spec_config.vnet_cni_linux_plugins_download_url
        } else {
            &self.azure_cni_url_linux
        }
    }

    pub fn azure_cni_url_windows<'a>(&'a self, spec: &'a AzureEnvironmentSpecConfig) -> &'a str {
        if self.azure_cni_url_windows.is_empty() {
            &spec.kubernetes_spec_config.vnet_cni_windows_plugins_download_url
        } else {
            &self.azure_cni_url_windows
        }
    }
}

/// The DC/OS bootstrap node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BootstrapProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub oauth_enabled: bool,
    #[serde(rename = "staticIP", skip_serializing_if = "String::is_empty")]
    pub static_ip: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subnet: String,
}

/// DC/OS specific configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DcosConfig {
    #[serde(rename = "dcosBootstrapURL", skip_serializing_if = "String::is_empty")]
    pub dcos_bootstrap_url: String,
    #[serde(rename = "dcosWindowsBootstrapURL", skip_serializing_if = "String::is_empty")]
    pub dcos_windows_bootstrap_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub registry: String,
    #[serde(rename = "registryUser", skip_serializing_if = "String::is_empty")]
    pub registry_user: String,
    #[serde(rename = "registryPassword", skip_serializing_if = "super::Secret::is_empty")]
    pub registry_pass: super::Secret,
    #[serde(rename = "dcosRepositoryURL", skip_serializing_if = "String::is_empty")]
    pub dcos_repository_url: String,
    #[serde(rename = "dcosClusterPackageListID", skip_serializing_if = "String::is_empty")]
    pub dcos_cluster_package_list_id: String,
    #[serde(rename = "dcosProviderPackageID", skip_serializing_if = "String::is_empty")]
    pub dcos_provider_package_id: String,
    #[serde(rename = "bootstrapProfile", skip_serializing_if = "Option::is_none")]
    pub bootstrap_profile: Option<BootstrapProfile>,
}

impl DcosConfig {
    pub fn has_private_registry(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn has_bootstrap(&self) -> bool {
        self.bootstrap_profile.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use serde_json::json;

    fn kubernetes(version: &str, config: KubernetesConfig) -> OrchestratorProfile {
        OrchestratorProfile {
            kubernetes_config: Some(config),
            ..OrchestratorProfile::new(OrchestratorType::Kubernetes, version)
        }
    }

    #[test]
    fn test_route_table_requirement() {
        let kubenet = kubernetes(
            "1.13.11",
            KubernetesConfig {
                network_plugin: Some(NetworkPlugin::Kubenet),
                ..Default::default()
            },
        );
        assert!(kubenet.require_route_table());

        let azure = kubernetes(
            "1.13.11",
            KubernetesConfig {
                network_plugin: Some(NetworkPlugin::Azure),
                ..Default::default()
            },
        );
        assert!(!azure.require_route_table());
        assert!(azure.is_azure_cni());

        let cilium = kubernetes(
            "1.13.11",
            KubernetesConfig {
                network_policy: Some(NetworkPolicy::Cilium),
                ..Default::default()
            },
        );
        assert!(!cilium.require_route_table());

        let dcos = OrchestratorProfile::new(OrchestratorType::Dcos, "1.11.2");
        assert!(!dcos.require_route_table());
    }

    #[test]
    fn test_exec_healthz_window() {
        for (version, expected) in [
            ("1.6.9", false),
            ("1.7.0", true),
            ("1.8.15", true),
            ("1.9.0", false),
            ("garbage", false),
        ] {
            let profile = OrchestratorProfile::new(OrchestratorType::Kubernetes, version);
            assert_eq!(profile.needs_exec_healthz(), expected, "{}", version);
        }
        let swarm = OrchestratorProfile::new(OrchestratorType::Swarm, "1.8.0");
        assert!(!swarm.needs_exec_healthz());
    }

    #[test]
    fn test_dcos19() {
        assert!(OrchestratorProfile::new(OrchestratorType::Dcos, "1.9.8").is_dcos19());
        assert!(!OrchestratorProfile::new(OrchestratorType::Dcos, "1.10.0").is_dcos19());
        assert!(!OrchestratorProfile::new(OrchestratorType::Kubernetes, "1.9.0").is_dcos19());
    }

    #[test]
    fn test_etcd_api_version() {
        let profile = kubernetes(
            "1.13.11",
            KubernetesConfig {
                etcd_version: "3.3.13".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(profile.api_server_etcd_api_version(), "etcd3");

        let unparseable = kubernetes("1.13.11", KubernetesConfig::default());
        assert_eq!(unparseable.api_server_etcd_api_version(), "etcd0");

        let bare = OrchestratorProfile::new(OrchestratorType::Kubernetes, "1.13.11");
        assert_eq!(bare.api_server_etcd_api_version(), "");
    }

    #[test]
    fn test_addons() {
        let config = KubernetesConfig {
            addons: vec![
                KubernetesAddon {
                    name: "ip-masq-agent".to_string(),
                    enabled: Some(true),
                    data: "c2NyaXB0".to_string(),
                    ..Default::default()
                },
                KubernetesAddon {
                    name: "cluster-autoscaler".to_string(),
                    enabled: None,
                    containers: vec![KubernetesContainerSpec {
                        name: "autoscaler".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(config.is_ip_masq_agent_enabled());
        assert!(!config.is_cluster_autoscaler_enabled());
        assert!(!config.is_rescheduler_enabled());
        assert_eq!(config.addon_script("ip-masq-agent"), "c2NyaXB0");
        assert_eq!(config.addon_script("missing"), "");
        assert_eq!(
            config
                .addon_by_name("cluster-autoscaler")
                .and_then(|addon| addon.container_index_by_name("autoscaler")),
            Some(0)
        );
    }

    #[test]
    fn test_kubelet_config_strings() {
        let config = KubernetesConfig {
            kubelet_config: btreemap! {
                "--max-pods".to_string() => "30".to_string(),
                "--eviction-hard".to_string() => "memory.available<750Mi".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(
            config.ordered_kubelet_config_string(),
            "--eviction-hard=memory.available<750Mi --max-pods=30 "
        );
        assert_eq!(
            config.ordered_kubelet_config_string_for_powershell(),
            r#""--eviction-hard=memory.available<750Mi", "--max-pods=30""#
        );
    }

    #[test]
    fn test_backoff_defaults_fill_only_unset() {
        let mut config = KubernetesConfig {
            cloud_provider_backoff_retries: 2,
            ..Default::default()
        };
        config.set_cloud_provider_backoff_defaults();
        assert_eq!(config.cloud_provider_backoff_retries, 2);
        assert_eq!(config.cloud_provider_backoff_duration, 5);
        assert_eq!(config.cloud_provider_backoff_exponent, 1.5);
        assert_eq!(config.cloud_provider_backoff_jitter, 1.0);
    }

    #[test]
    fn test_identity_helpers() {
        let mut config = KubernetesConfig {
            user_assigned_id: "/identity".to_string(),
            ..Default::default()
        };
        assert_eq!(config.user_assigned_id(), "");
        config.use_managed_identity = true;
        assert_eq!(config.user_assigned_id(), "/identity");
        assert!(!config.user_assigned_client_id_enabled());
        assert!(config.requires_docker());
        config.container_runtime = Some(ContainerRuntime::Containerd);
        assert!(!config.requires_docker());
    }

    #[test]
    fn test_private_jumpbox_validation() {
        let valid = PrivateJumpboxProfile {
            name: "jb".to_string(),
            vm_size: "Standard_D2_v2".to_string(),
            os_disk_size_gb: 30,
            public_key: "ssh-rsa AAAA".to_string(),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let oversized = PrivateJumpboxProfile {
            os_disk_size_gb: 1024,
            ..valid.clone()
        };
        assert!(oversized.validate().is_err());

        let unnamed = PrivateJumpboxProfile {
            name: String::new(),
            ..valid
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_unknown_network_plugin_rejected() {
        let result: Result<KubernetesConfig, _> =
            serde_json::from_value(json!({"networkPlugin": "weave"}));
        assert!(result.is_err());

        let config: KubernetesConfig =
            serde_json::from_value(json!({"networkPlugin": "", "kubeProxyMode": "ipvs"})).unwrap();
        assert_eq!(config.network_plugin, None);
        assert_eq!(config.proxy_mode, Some(KubeProxyMode::Ipvs));
    }
}
