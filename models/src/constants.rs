/// Builds the download URL of a release of the Azure CNI plugins for an OS, in the
/// `https://acs-mirror.azureedge.net/cni/azure-vnet-cni-<os>-amd64-<version>.<ext>` layout used by
/// every cloud's mirror.
#[macro_export]
macro_rules! azure_cni_url {
    ($base:literal, $os:literal, $version:literal, $ext:literal) => {
        concat!($base, "/azure-vnet-cni-", $os, "-amd64-", $version, ".", $ext)
    };
}

// Orchestrator names
pub const DEFAULT_ORCHESTRATOR_NAME: &str = "k8s";
pub const DEFAULT_HOSTED_PROFILE_MASTER_NAME: &str = "aks";

// Orchestrator release defaults
pub const SWARM_VERSION: &str = "swarm:1.1.0";
pub const DOCKER_CE_VERSION: &str = "17.03.*";
pub const DCOS_VERSION_1_9_0: &str = "1.9.0";
pub const DCOS_VERSION_1_9_8: &str = "1.9.8";

// Windows defaults
pub const KUBERNETES_WINDOWS_DOCKER_VERSION: &str = "18.09.7";
pub const KUBERNETES_DEFAULT_WINDOWS_SKU: &str = "Datacenter-Core-1809-with-Containers-smalldisk";
pub const DEFAULT_ENABLE_AUTOMATIC_UPDATES: bool = true;

// Pool limits
pub const MAX_AGENT_COUNT: i32 = 100;

// Networking
pub const DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP: &str = "10.240.255.5";
pub const DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET: u8 = 5;
pub const DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS: u8 = 4;
pub const DEFAULT_CNI_CIDR: &str = "168.63.129.16/32";
pub const DEFAULT_VNET_CIDR: &str = "10.0.0.0/8";

// Segment offsets in an Azure subnet resource ID, e.g.
// /subscriptions/<sub>/resourceGroups/<rg>/providers/Microsoft.Network/virtualNetworks/<vnet>/subnets/<subnet>
pub const DEFAULT_VNET_RESOURCE_GROUP_SEGMENT_INDEX: usize = 4;
pub const DEFAULT_VNET_NAME_RESOURCE_SEGMENT_INDEX: usize = 8;
pub const DEFAULT_SUBNET_NAME_RESOURCE_SEGMENT_INDEX: usize = 10;

// Cloud provider tuning
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES: i32 = 6;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER: f64 = 1.0;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION: i32 = 5;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT: f64 = 1.5;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS: f64 = 3.0;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET: i32 = 10;
pub const MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR: f64 = 0.1;

// Cosmos etcd endpoint suffix, appended to the master DNS prefix.
pub const ETCD_ENDPOINT_URI_SUFFIX: &str = "k8s.etcd.cosmosdb.azure.com";

// Addon names
pub const AAD_POD_IDENTITY_ADDON_NAME: &str = "aad-pod-identity";
pub const APP_GW_INGRESS_ADDON_NAME: &str = "appgw-ingress";
pub const CLUSTER_AUTOSCALER_ADDON_NAME: &str = "cluster-autoscaler";
pub const IP_MASQ_AGENT_ADDON_NAME: &str = "ip-masq-agent";
pub const NVIDIA_DEVICE_PLUGIN_ADDON_NAME: &str = "nvidia-device-plugin";
pub const RESCHEDULER_ADDON_NAME: &str = "rescheduler";

// Cloud names
pub const AZURE_PUBLIC_CLOUD: &str = "AzurePublicCloud";
pub const AZURE_CHINA_CLOUD: &str = "AzureChinaCloud";
pub const AZURE_GERMAN_CLOUD: &str = "AzureGermanCloud";
pub const AZURE_US_GOVERNMENT_CLOUD: &str = "AzureUSGovernmentCloud";
pub const AZURE_STACK_CLOUD: &str = "AzureStackCloud";

// Feature flags, by name
pub const FEATURE_CSE_RUN_IN_BACKGROUND: &str = "CSERunInBackground";
pub const FEATURE_BLOCK_OUTBOUND_INTERNET: &str = "BlockOutboundInternet";
pub const FEATURE_ENABLE_IPV6_DUAL_STACK: &str = "EnableIPv6DualStack";

// Azure CNI plugin downloads
pub const VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL: &str = azure_cni_url!(
    "https://acs-mirror.azureedge.net/cni",
    "linux",
    "v1.0.25",
    "tgz"
);
pub const VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL: &str = azure_cni_url!(
    "https://acs-mirror.azureedge.net/cni",
    "windows",
    "v1.0.25",
    "zip"
);
pub const VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL_CHINA: &str = azure_cni_url!(
    "https://mirror.azk8s.cn/kubernetes/azure-container-networking",
    "linux",
    "v1.0.25",
    "tgz"
);
pub const VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL_CHINA: &str = azure_cni_url!(
    "https://mirror.azk8s.cn/kubernetes/azure-container-networking",
    "windows",
    "v1.0.25",
    "zip"
);
pub const CNI_PLUGINS_DOWNLOAD_URL: &str =
    "https://acs-mirror.azureedge.net/cni/cni-plugins-amd64-v0.7.5.tgz";
pub const CNI_PLUGINS_DOWNLOAD_URL_CHINA: &str =
    "https://mirror.azk8s.cn/kubernetes/containernetworking-plugins/cni-plugins-amd64-v0.7.5.tgz";
