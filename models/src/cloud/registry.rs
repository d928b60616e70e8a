use super::error::UnknownCloudSnafu;
use super::{
    AzureEndpointConfig, AzureEnvironmentSpecConfig, AzureOsImageConfig, DcosSpecConfig,
    DockerSpecConfig, KubernetesSpecConfig, Result,
};
use crate::constants::{
    AZURE_CHINA_CLOUD, AZURE_GERMAN_CLOUD, AZURE_PUBLIC_CLOUD, AZURE_STACK_CLOUD,
    AZURE_US_GOVERNMENT_CLOUD, CNI_PLUGINS_DOWNLOAD_URL, CNI_PLUGINS_DOWNLOAD_URL_CHINA,
    VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL, VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL_CHINA,
    VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL, VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL_CHINA,
};

use lazy_static::lazy_static;
use snafu::OptionExt;
use std::collections::{BTreeMap, HashMap};

const DCOS_BOOTSTRAP_BASE: &str = "https://dcosio.azureedge.net/dcos";
const DCOS_BOOTSTRAP_BASE_CHINA: &str = "https://acsengine.blob.core.chinacloudapi.cn/dcos";
const DCOS_WINDOWS_BOOTSTRAP_URL: &str =
    "http://dcos-win.westus.cloudapp.azure.com/dcos-windows/stable/";
const DCOS_REPOSITORY_URL: &str = "https://dcosio.azureedge.net/dcos/stable/1.11.0";
const DCOS_CLUSTER_PACKAGE_LIST_ID: &str = "248a66388bba1adbcb14a52fd3b7b424ab06fa76";
const WINDOWS_TELEMETRY_GUID: &str = "fb801154-36b9-41bc-89c2-f4d4f05472b0";

const AZURE_LOCATIONS: &[&str] = &[
    "australiacentral",
    "australiacentral2",
    "australiaeast",
    "australiasoutheast",
    "brazilsouth",
    "canadacentral",
    "canadaeast",
    "centralindia",
    "centralus",
    "centraluseuap",
    "chinaeast",
    "chinaeast2",
    "chinanorth",
    "chinanorth2",
    "eastasia",
    "eastus",
    "eastus2",
    "eastus2euap",
    "francecentral",
    "francesouth",
    "germanycentral",
    "germanynortheast",
    "japaneast",
    "japanwest",
    "koreacentral",
    "koreasouth",
    "northcentralus",
    "northeurope",
    "southafricanorth",
    "southafricawest",
    "southcentralus",
    "southeastasia",
    "southindia",
    "uaecentral",
    "uaenorth",
    "uksouth",
    "ukwest",
    "usdodcentral",
    "usdodeast",
    "usgovarizona",
    "usgoviowa",
    "usgovtexas",
    "usgovvirginia",
    "westcentralus",
    "westeurope",
    "westindia",
    "westus",
    "westus2",
];

lazy_static! {
    static ref CLOUD_SPECS: HashMap<&'static str, AzureEnvironmentSpecConfig> = {
        let mut specs = HashMap::new();
        specs.insert(AZURE_PUBLIC_CLOUD, public_cloud(AZURE_PUBLIC_CLOUD));
        specs.insert(AZURE_STACK_CLOUD, public_cloud(AZURE_STACK_CLOUD));
        specs.insert(AZURE_CHINA_CLOUD, china_cloud());
        specs.insert(AZURE_GERMAN_CLOUD, german_cloud());
        specs.insert(AZURE_US_GOVERNMENT_CLOUD, us_government_cloud());
        specs
    };
}

/// The static spec config of a named cloud.
pub fn cloud_spec_config(name: &str) -> Result<&'static AzureEnvironmentSpecConfig> {
    CLOUD_SPECS.get(name).context(UnknownCloudSnafu { name })
}

/// Names of every cloud with a static spec config, sorted.
pub fn cloud_names() -> Vec<&'static str> {
    let mut names: Vec<_> = CLOUD_SPECS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Every Azure region a cluster may be placed in.
pub fn azure_locations() -> &'static [&'static str] {
    AZURE_LOCATIONS
}

fn image(offer: &str, sku: &str, publisher: &str, version: &str) -> AzureOsImageConfig {
    AzureOsImageConfig {
        image_offer: offer.to_string(),
        image_sku: sku.to_string(),
        image_publisher: publisher.to_string(),
        image_version: version.to_string(),
    }
}

fn default_os_images() -> BTreeMap<String, AzureOsImageConfig> {
    let ubuntu = image("UbuntuServer", "16.04-LTS", "Canonical", "latest");
    [
        ("ubuntu", ubuntu.clone()),
        (
            "ubuntu-18.04",
            image("UbuntuServer", "18.04-LTS", "Canonical", "latest"),
        ),
        ("rhel", image("RHEL", "7.3", "RedHat", "latest")),
        ("coreos", image("CoreOS", "Stable", "CoreOS", "latest")),
        (
            "aks-ubuntu-16.04",
            image("aks", "aks-ubuntu-1604-201910", "microsoft-aks", "2019.10.24"),
        ),
        (
            "aks-ubuntu-18.04",
            image("aks", "aks-ubuntu-1804-201910", "microsoft-aks", "2019.10.24"),
        ),
        (
            "acc-16.04",
            image(
                "confidential-compute-preview",
                "16.04-LTS",
                "Canonical",
                "latest",
            ),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_dcos_spec(base: &str) -> DcosSpecConfig {
    let bootstrap = |channel: &str, id: &str| format!("{}/{}/bootstrap/{}.bootstrap.tar.xz", base, channel, id);
    DcosSpecConfig {
        dcos188_bootstrap_download_url: bootstrap(
            "stable",
            "5df43052907c021eeb5de145419a3da1898c58a5",
        ),
        dcos190_bootstrap_download_url: bootstrap(
            "EarlyAccess",
            "58fd0833ce81b6244fc73bf65b5deb43217b0bd7",
        ),
        dcos198_bootstrap_download_url: bootstrap(
            "stable/1.9.8",
            "f4ae0d20665fc68ee25282d6f78681b2773c6e10",
        ),
        dcos110_bootstrap_download_url: bootstrap(
            "stable/1.10.0",
            "4d92536e7381176206e71ee15b5ffe454439920c",
        ),
        dcos111_bootstrap_download_url: bootstrap(
            "stable/1.11.0",
            "a0654657903fb68dff60f6e522a7f241c1bfbf0f",
        ),
        dcos_windows_bootstrap_download_url: DCOS_WINDOWS_BOOTSTRAP_URL.to_string(),
        dcos_repository_url: DCOS_REPOSITORY_URL.to_string(),
        dcos_cluster_package_list_id: DCOS_CLUSTER_PACKAGE_LIST_ID.to_string(),
        dcos_provider_package_id: String::new(),
    }
}

fn default_kubernetes_spec() -> KubernetesSpecConfig {
    KubernetesSpecConfig {
        kubernetes_image_base: "k8s.gcr.io/".to_string(),
        tiller_image_base: "gcr.io/kubernetes-helm/".to_string(),
        aci_connector_image_base: "microsoft/".to_string(),
        nvidia_image_base: "nvidia/".to_string(),
        azure_cni_image_base: "mcr.microsoft.com/containernetworking/".to_string(),
        calico_image_base: "calico/".to_string(),
        etcd_download_url_base: "https://acs-mirror.azureedge.net/github-coreos".to_string(),
        kube_binaries_sas_url_base: "https://acs-mirror.azureedge.net/wink8s/".to_string(),
        windows_telemetry_guid: WINDOWS_TELEMETRY_GUID.to_string(),
        cni_plugins_download_url: CNI_PLUGINS_DOWNLOAD_URL.to_string(),
        vnet_cni_linux_plugins_download_url: VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL.to_string(),
        vnet_cni_windows_plugins_download_url: VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL.to_string(),
        containerd_download_url_base: "https://storage.googleapis.com/cri-containerd-release/"
            .to_string(),
    }
}

fn default_docker_spec() -> DockerSpecConfig {
    DockerSpecConfig {
        docker_engine_repo: "https://aptdocker.azureedge.net/repo".to_string(),
        docker_compose_download_url: "https://github.com/docker/compose/releases/download"
            .to_string(),
    }
}

fn endpoint(suffix: &str) -> AzureEndpointConfig {
    AzureEndpointConfig {
        resource_manager_vm_dns_suffix: suffix.to_string(),
    }
}

fn public_cloud(cloud_name: &str) -> AzureEnvironmentSpecConfig {
    AzureEnvironmentSpecConfig {
        cloud_name: cloud_name.to_string(),
        docker_spec_config: default_docker_spec(),
        kubernetes_spec_config: default_kubernetes_spec(),
        dcos_spec_config: default_dcos_spec(DCOS_BOOTSTRAP_BASE),
        endpoint_config: endpoint("cloudapp.azure.com"),
        os_image_config: default_os_images(),
    }
}

fn german_cloud() -> AzureEnvironmentSpecConfig {
    // No AKS images are published to the German cloud; fall back to stock Ubuntu.
    let mut os_images = default_os_images();
    let ubuntu = image("UbuntuServer", "16.04-LTS", "Canonical", "latest");
    let ubuntu_1804 = image("UbuntuServer", "18.04-LTS", "Canonical", "latest");
    os_images.insert("aks-ubuntu-16.04".to_string(), ubuntu);
    os_images.insert("aks-ubuntu-18.04".to_string(), ubuntu_1804);

    AzureEnvironmentSpecConfig {
        cloud_name: AZURE_GERMAN_CLOUD.to_string(),
        endpoint_config: endpoint("cloudapp.microsoftazure.de"),
        os_image_config: os_images,
        ..public_cloud(AZURE_GERMAN_CLOUD)
    }
}

fn us_government_cloud() -> AzureEnvironmentSpecConfig {
    AzureEnvironmentSpecConfig {
        cloud_name: AZURE_US_GOVERNMENT_CLOUD.to_string(),
        endpoint_config: endpoint("cloudapp.usgovcloudapi.net"),
        ..public_cloud(AZURE_US_GOVERNMENT_CLOUD)
    }
}

fn china_cloud() -> AzureEnvironmentSpecConfig {
    AzureEnvironmentSpecConfig {
        cloud_name: AZURE_CHINA_CLOUD.to_string(),
        docker_spec_config: DockerSpecConfig {
            docker_engine_repo: "https://mirror.azk8s.cn/docker-engine/apt/repo/".to_string(),
            docker_compose_download_url: "https://mirror.azk8s.cn/docker-toolbox/linux/compose"
                .to_string(),
        },
        kubernetes_spec_config: KubernetesSpecConfig {
            kubernetes_image_base: "gcr.azk8s.cn/google_containers/".to_string(),
            tiller_image_base: "gcr.azk8s.cn/kubernetes-helm/".to_string(),
            aci_connector_image_base: "dockerhub.azk8s.cn/microsoft/".to_string(),
            nvidia_image_base: "dockerhub.azk8s.cn/nvidia/".to_string(),
            azure_cni_image_base: "mcr.azk8s.cn/containernetworking/".to_string(),
            calico_image_base: "dockerhub.azk8s.cn/calico/".to_string(),
            etcd_download_url_base: "https://mirror.azk8s.cn/kubernetes/etcd".to_string(),
            kube_binaries_sas_url_base: "https://mirror.azk8s.cn/kubernetes/k8s/".to_string(),
            windows_telemetry_guid: WINDOWS_TELEMETRY_GUID.to_string(),
            cni_plugins_download_url: CNI_PLUGINS_DOWNLOAD_URL_CHINA.to_string(),
            vnet_cni_linux_plugins_download_url: VNET_CNI_LINUX_PLUGINS_DOWNLOAD_URL_CHINA
                .to_string(),
            vnet_cni_windows_plugins_download_url: VNET_CNI_WINDOWS_PLUGINS_DOWNLOAD_URL_CHINA
                .to_string(),
            containerd_download_url_base: "https://mirror.azk8s.cn/kubernetes/containerd/"
                .to_string(),
        },
        dcos_spec_config: default_dcos_spec(DCOS_BOOTSTRAP_BASE_CHINA),
        endpoint_config: endpoint("cloudapp.chinacloudapi.cn"),
        os_image_config: default_os_images(),
    }
}
