//! The per-cloud defaults consulted by conversion and defaulting.
//!
//! Four well-known clouds are selected by location. Azure Stack clouds carry their own
//! [`AzureEnvironmentSpecConfig`] inline on the cluster definition, which takes precedence over
//! the static table.
mod registry;

pub use self::error::CloudError;
pub use self::registry::{azure_locations, cloud_spec_config, cloud_names};

use crate::constants::{
    AZURE_CHINA_CLOUD, AZURE_GERMAN_CLOUD, AZURE_PUBLIC_CLOUD, AZURE_STACK_CLOUD,
    AZURE_US_GOVERNMENT_CLOUD,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Result<T> = std::result::Result<T, CloudError>;

/// Endpoints of an Azure cloud.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Environment {
    pub name: String,
    #[serde(rename = "managementPortalURL")]
    pub management_portal_url: String,
    #[serde(rename = "publishSettingsURL")]
    pub publish_settings_url: String,
    pub service_management_endpoint: String,
    pub resource_manager_endpoint: String,
    pub active_directory_endpoint: String,
    pub gallery_endpoint: String,
    pub key_vault_endpoint: String,
    pub graph_endpoint: String,
    pub service_bus_endpoint: String,
    pub batch_management_endpoint: String,
    pub storage_endpoint_suffix: String,
    #[serde(rename = "sqlDatabaseDNSSuffix")]
    pub sql_database_dns_suffix: String,
    #[serde(rename = "trafficManagerDNSSuffix")]
    pub traffic_manager_dns_suffix: String,
    #[serde(rename = "keyVaultDNSSuffix")]
    pub key_vault_dns_suffix: String,
    pub service_bus_endpoint_suffix: String,
    #[serde(rename = "serviceManagementVMDNSSuffix")]
    pub service_management_vm_dns_suffix: String,
    #[serde(rename = "resourceManagerVMDNSSuffix")]
    pub resource_manager_vm_dns_suffix: String,
    #[serde(rename = "containerRegistryDNSSuffix")]
    pub container_registry_dns_suffix: String,
    #[serde(rename = "cosmosDBDNSSuffix")]
    pub cosmos_db_dns_suffix: String,
    pub token_audience: String,
    pub resource_identifiers: ResourceIdentifier,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceIdentifier {
    pub graph: String,
    pub key_vault: String,
    pub datalake: String,
    pub batch: String,
    pub operational_insights: String,
}

/// Everything a deployment needs to know about the cloud it targets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureEnvironmentSpecConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,
    pub docker_spec_config: DockerSpecConfig,
    pub kubernetes_spec_config: KubernetesSpecConfig,
    #[serde(rename = "dcosSpecConfig")]
    pub dcos_spec_config: DcosSpecConfig,
    pub endpoint_config: AzureEndpointConfig,
    /// OS images keyed by distro name. Keys are free-form so custom images survive conversion.
    #[serde(rename = "osImageConfig", skip_serializing_if = "BTreeMap::is_empty")]
    pub os_image_config: BTreeMap<String, AzureOsImageConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DockerSpecConfig {
    #[serde(rename = "dockerEngineRepo", skip_serializing_if = "String::is_empty")]
    pub docker_engine_repo: String,
    #[serde(rename = "dockerComposeDownloadURL", skip_serializing_if = "String::is_empty")]
    pub docker_compose_download_url: String,
}

/// Image bases and download locations for Kubernetes components.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KubernetesSpecConfig {
    #[serde(rename = "kubernetesImageBase", skip_serializing_if = "String::is_empty")]
    pub kubernetes_image_base: String,
    #[serde(rename = "tillerImageBase", skip_serializing_if = "String::is_empty")]
    pub tiller_image_base: String,
    #[serde(rename = "aciConnectorImageBase", skip_serializing_if = "String::is_empty")]
    pub aci_connector_image_base: String,
    #[serde(rename = "nvidiaImageBase", skip_serializing_if = "String::is_empty")]
    pub nvidia_image_base: String,
    #[serde(rename = "azureCNIImageBase", skip_serializing_if = "String::is_empty")]
    pub azure_cni_image_base: String,
    #[serde(rename = "CalicoImageBase", skip_serializing_if = "String::is_empty")]
    pub calico_image_base: String,
    #[serde(rename = "etcdDownloadURLBase", skip_serializing_if = "String::is_empty")]
    pub etcd_download_url_base: String,
    #[serde(rename = "kubeBinariesSASURLBase", skip_serializing_if = "String::is_empty")]
    pub kube_binaries_sas_url_base: String,
    #[serde(rename = "windowsTelemetryGUID", skip_serializing_if = "String::is_empty")]
    pub windows_telemetry_guid: String,
    #[serde(rename = "cniPluginsDownloadURL", skip_serializing_if = "String::is_empty")]
    pub cni_plugins_download_url: String,
    #[serde(rename = "vnetCNILinuxPluginsDownloadURL", skip_serializing_if = "String::is_empty")]
    pub vnet_cni_linux_plugins_download_url: String,
    #[serde(
        rename = "vnetCNIWindowsPluginsDownloadURL",
        skip_serializing_if = "String::is_empty"
    )]
    pub vnet_cni_windows_plugins_download_url: String,
    #[serde(rename = "containerdDownloadURLBase", skip_serializing_if = "String::is_empty")]
    pub containerd_download_url_base: String,
}

/// DC/OS bootstrap downloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DcosSpecConfig {
    #[serde(rename = "dcos188BootstrapDownloadURL", skip_serializing_if = "String::is_empty")]
    pub dcos188_bootstrap_download_url: String,
    #[serde(rename = "dcos190BootstrapDownloadURL", skip_serializing_if = "String::is_empty")]
    pub dcos190_bootstrap_download_url: String,
    #[serde(rename = "dcos198BootstrapDownloadURL", skip_serializing_if = "String::is_empty")]
    pub dcos198_bootstrap_download_url: String,
    #[serde(rename = "dcos110BootstrapDownloadURL", skip_serializing_if = "String::is_empty")]
    pub dcos110_bootstrap_download_url: String,
    #[serde(rename = "dcos111BootstrapDownloadURL", skip_serializing_if = "String::is_empty")]
    pub dcos111_bootstrap_download_url: String,
    #[serde(
        rename = "dcosWindowsBootstrapDownloadURL",
        skip_serializing_if = "String::is_empty"
    )]
    pub dcos_windows_bootstrap_download_url: String,
    #[serde(rename = "dcosRepositoryURL", skip_serializing_if = "String::is_empty")]
    pub dcos_repository_url: String,
    #[serde(rename = "dcosClusterPackageListID", skip_serializing_if = "String::is_empty")]
    pub dcos_cluster_package_list_id: String,
    #[serde(rename = "dcosProviderPackageID", skip_serializing_if = "String::is_empty")]
    pub dcos_provider_package_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AzureEndpointConfig {
    #[serde(rename = "resourceManagerVMDNSSuffix", skip_serializing_if = "String::is_empty")]
    pub resource_manager_vm_dns_suffix: String,
}

/// A marketplace image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureOsImageConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_offer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_sku: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_publisher: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_version: String,
}

/// The cloud a location belongs to.
pub fn cloud_target_env(location: &str) -> &'static str {
    let location: String = location
        .split_whitespace()
        .collect::<String>()
        .to_lowercase();
    if location.starts_with("china") {
        AZURE_CHINA_CLOUD
    } else if location == "germanycentral" || location == "germanynortheast" {
        AZURE_GERMAN_CLOUD
    } else if location.starts_with("usgov") || location.starts_with("usdod") {
        AZURE_US_GOVERNMENT_CLOUD
    } else {
        AZURE_PUBLIC_CLOUD
    }
}

/// The cloud a deployment targets. A custom cloud named `AzureStackCloud` (any casing) wins over
/// the location.
pub fn target_env(location: &str, custom_cloud_name: &str) -> &'static str {
    if !custom_cloud_name.is_empty() && custom_cloud_name.eq_ignore_ascii_case(AZURE_STACK_CLOUD) {
        AZURE_STACK_CLOUD
    } else {
        cloud_target_env(location)
    }
}

/// `<prefix>.<location>.<suffix>` for the cloud a location belongs to.
pub fn format_azure_prod_fqdn_by_location(fqdn_prefix: &str, location: &str) -> Result<String> {
    format_prod_fqdn_by_location(fqdn_prefix, location, "")
}

/// `<prefix>.<location>.<suffix>`, honoring a custom cloud name.
pub fn format_prod_fqdn_by_location(
    fqdn_prefix: &str,
    location: &str,
    custom_cloud_name: &str,
) -> Result<String> {
    let spec = cloud_spec_config(target_env(location, custom_cloud_name))?;
    Ok(format_fqdn(fqdn_prefix, location, spec))
}

pub(crate) fn format_fqdn(
    fqdn_prefix: &str,
    location: &str,
    spec: &AzureEnvironmentSpecConfig,
) -> String {
    format!(
        "{}.{}.{}",
        fqdn_prefix, location, spec.endpoint_config.resource_manager_vm_dns_suffix
    )
}

pub mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub))]
    pub enum CloudError {
        #[snafu(display("Unknown cloud '{}'", name))]
        UnknownCloud { name: String },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_target_env() {
        for (location, expected) in [
            ("westus2", "AzurePublicCloud"),
            ("chinaeast2", "AzureChinaCloud"),
            ("China North", "AzureChinaCloud"),
            ("germanycentral", "AzureGermanCloud"),
            ("usgovvirginia", "AzureUSGovernmentCloud"),
            ("usdodeast", "AzureUSGovernmentCloud"),
            ("", "AzurePublicCloud"),
        ] {
            assert_eq!(cloud_target_env(location), expected, "{}", location);
        }
    }

    #[test]
    fn test_target_env_custom_cloud() {
        assert_eq!(target_env("local", "azurestackcloud"), "AzureStackCloud");
        assert_eq!(target_env("chinaeast", ""), "AzureChinaCloud");
        assert_eq!(target_env("westus", "SomethingElse"), "AzurePublicCloud");
    }

    #[test]
    fn test_fqdn_formatting() {
        assert_eq!(
            format_azure_prod_fqdn_by_location("mycluster", "westus2").unwrap(),
            "mycluster.westus2.cloudapp.azure.com"
        );
        assert_eq!(
            format_prod_fqdn_by_location("mycluster", "chinaeast", "").unwrap(),
            "mycluster.chinaeast.cloudapp.chinacloudapi.cn"
        );
        assert_eq!(
            format_prod_fqdn_by_location("mycluster", "usgovvirginia", "").unwrap(),
            "mycluster.usgovvirginia.cloudapp.usgovcloudapi.net"
        );
        assert_eq!(
            format_prod_fqdn_by_location("mycluster", "germanycentral", "").unwrap(),
            "mycluster.germanycentral.cloudapp.microsoftazure.de"
        );
    }

    #[test]
    fn test_os_image_keys_are_free_form() {
        let spec: AzureEnvironmentSpecConfig = serde_json::from_value(serde_json::json!({
            "cloudName": "AzureStackCloud",
            "osImageConfig": {
                "Test": {"imageOffer": "o", "imageSku": "s"},
            },
        }))
        .unwrap();
        assert_eq!(spec.os_image_config["Test"].image_sku, "s");
    }
}
