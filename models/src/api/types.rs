//! Leaf profiles of the cluster definition.
use super::serde_helpers::{is_false, optional_enum};
use super::{
    AuthenticationMethod, AuthenticatorType, DependenciesLocation, IdentitySystem, OsType, Secret,
};
use crate::cloud::{AzureEnvironmentSpecConfig, Environment};
use crate::constants::{
    DEFAULT_ENABLE_AUTOMATIC_UPDATES, FEATURE_BLOCK_OUTBOUND_INTERNET,
    FEATURE_CSE_RUN_IN_BACKGROUND, FEATURE_ENABLE_IPV6_DUAL_STACK,
    KUBERNETES_DEFAULT_WINDOWS_SKU, KUBERNETES_WINDOWS_DOCKER_VERSION,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource plan as required by ARM for billing purposes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePurchasePlan {
    pub name: String,
    pub product: String,
    pub promotion_code: String,
    pub publisher: String,
}

/// The client and secret used by the cluster for Azure resource CRUD.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePrincipalProfile {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvault_secret_ref: Option<KeyvaultSecretRef>,
}

/// Path to a secret in an Azure key vault, with an optional secret version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeyvaultSecretRef {
    #[serde(rename = "vaultID")]
    pub vault_id: String,
    #[serde(rename = "secretName")]
    pub secret_name: String,
    #[serde(rename = "version", skip_serializing_if = "String::is_empty")]
    pub secret_version: String,
}

/// PKI material of a cluster. Every value is a secret.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateProfile {
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub ca_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub ca_private_key: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_server_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_server_private_key: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub client_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub client_private_key: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub kube_config_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub kube_config_private_key: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub etcd_server_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub etcd_server_private_key: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub etcd_client_certificate: Secret,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub etcd_client_private_key: Secret,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub etcd_peer_certificates: Vec<Secret>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub etcd_peer_private_keys: Vec<Secret>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicKey {
    pub key_data: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SshConfig {
    pub public_keys: Vec<PublicKey>,
}

/// Search domain used when the custom VNET has a Windows Server DNS as a nameserver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSearchDomain {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub realm_user: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub realm_password: Secret,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomNodesDns {
    #[serde(rename = "dnsServer", skip_serializing_if = "String::is_empty")]
    pub dns_server: String,
}

/// Certificates to install on a pool of machines from a given key vault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyVaultSecrets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_vault: Option<KeyVaultId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vault_certificates: Vec<KeyVaultCertificate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeyVaultId {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyVaultCertificate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub certificate_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub certificate_store: String,
}

/// Linux parameters passed to the cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LinuxProfile {
    pub admin_username: String,
    pub ssh: SshConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<KeyVaultSecrets>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub distro: Option<super::Distro>,
    #[serde(rename = "scriptroot", skip_serializing_if = "String::is_empty")]
    pub script_root_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_search_domain: Option<CustomSearchDomain>,
    #[serde(rename = "CustomNodesDNS", skip_serializing_if = "Option::is_none")]
    pub custom_nodes_dns: Option<CustomNodesDns>,
    #[serde(rename = "isSSHKeyAutoGenerated", skip_serializing_if = "Option::is_none")]
    pub is_ssh_key_auto_generated: Option<bool>,
}

impl LinuxProfile {
    pub fn has_secrets(&self) -> bool {
        !self.secrets.is_empty()
    }

    /// True when a complete custom search domain (name and realm credentials) is configured.
    pub fn has_search_domain(&self) -> bool {
        self.custom_search_domain
            .as_ref()
            .map(|domain| {
                !domain.name.is_empty()
                    && !domain.realm_password.is_empty()
                    && !domain.realm_user.is_empty()
            })
            .unwrap_or(false)
    }

    pub fn has_custom_nodes_dns(&self) -> bool {
        self.custom_nodes_dns
            .as_ref()
            .map(|dns| !dns.dns_server.is_empty())
            .unwrap_or(false)
    }
}

/// Windows parameters passed to the cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowsProfile {
    pub admin_username: String,
    pub admin_password: Secret,
    pub image_version: String,
    #[serde(rename = "windowsImageSourceURL")]
    pub windows_image_source_url: String,
    pub windows_publisher: String,
    pub windows_offer: String,
    pub windows_sku: String,
    pub windows_docker_version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<KeyVaultSecrets>,
    #[serde(skip_serializing_if = "is_false")]
    pub ssh_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_automatic_updates: Option<bool>,
}

impl WindowsProfile {
    pub fn has_secrets(&self) -> bool {
        !self.secrets.is_empty()
    }

    pub fn has_custom_image(&self) -> bool {
        !self.windows_image_source_url.is_empty()
    }

    pub fn windows_docker_version(&self) -> &str {
        if self.windows_docker_version.is_empty() {
            KUBERNETES_WINDOWS_DOCKER_VERSION
        } else {
            &self.windows_docker_version
        }
    }

    pub fn windows_sku(&self) -> &str {
        if self.windows_sku.is_empty() {
            KUBERNETES_DEFAULT_WINDOWS_SKU
        } else {
            &self.windows_sku
        }
    }

    pub fn enable_windows_update(&self) -> bool {
        self.enable_automatic_updates
            .unwrap_or(DEFAULT_ENABLE_AUTOMATIC_UPDATES)
    }
}

/// Boot diagnostics settings for the VMs of the cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsProfile {
    pub vm_diagnostics: Option<VmDiagnostics>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VmDiagnostics {
    pub enabled: bool,
    /// Blob endpoint of the storage account receiving boot and VM diagnostics. Read-only.
    #[serde(rename = "storageUrl")]
    pub storage_url: Option<String>,
}

/// Jumpbox of a self-hosted cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JumpboxProfile {
    #[serde(deserialize_with = "optional_enum::deserialize")]
    pub os_type: Option<OsType>,
    pub dns_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
}

/// Properties of a managed control plane.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HostedMasterProfile {
    /// Master public endpoint. Returned on GET only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    pub dns_prefix: String,
    /// Subnet the agents are provisioned in.
    pub subnet: String,
    /// Comma separated CIDRs allowed to reach the API server.
    pub api_server_white_list_range: Option<String>,
    pub ip_masq_agent: bool,
}

/// Azure Active Directory integration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AadProfile {
    #[serde(rename = "clientAppID", skip_serializing_if = "String::is_empty")]
    pub client_app_id: String,
    #[serde(rename = "serverAppID", skip_serializing_if = "String::is_empty")]
    pub server_app_id: String,
    #[serde(rename = "serverAppSecret", skip_serializing_if = "Secret::is_empty")]
    pub server_app_secret: Secret,
    #[serde(rename = "tenantID", skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    #[serde(rename = "adminGroupID", skip_serializing_if = "String::is_empty")]
    pub admin_group_id: String,
    #[serde(deserialize_with = "optional_enum::deserialize")]
    pub authenticator: Option<AuthenticatorType>,
}

/// Custom properties used for cluster instantiation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator: String,
}

/// An addon of a managed cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AddonProfile {
    pub enabled: bool,
    pub config: Option<BTreeMap<String, String>>,
}

/// Functionality restricted behind feature flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FeatureFlags {
    #[serde(rename = "enableCSERunInBackground", skip_serializing_if = "is_false")]
    pub enable_cse_run_in_background: bool,
    #[serde(rename = "blockOutboundInternet", skip_serializing_if = "is_false")]
    pub block_outbound_internet: bool,
    #[serde(rename = "enableIPv6DualStack", skip_serializing_if = "is_false")]
    pub enable_ipv6_dual_stack: bool,
}

impl FeatureFlags {
    /// Looks a flag up by its name. Unknown names are off.
    pub fn is_feature_enabled(&self, feature: &str) -> bool {
        match feature {
            FEATURE_CSE_RUN_IN_BACKGROUND => self.enable_cse_run_in_background,
            FEATURE_BLOCK_OUTBOUND_INTERNET => self.block_outbound_internet,
            FEATURE_ENABLE_IPV6_DUAL_STACK => self.enable_ipv6_dual_stack,
            _ => false,
        }
    }
}

/// A reference to an Image resource in Azure, optionally in a shared image gallery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageReference {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_group: String,
    #[serde(rename = "subscriptionId", skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gallery: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl ImageReference {
    pub(crate) fn is_custom_image(&self) -> bool {
        !self.name.is_empty() && !self.resource_group.is_empty()
    }

    pub(crate) fn is_gallery_image(&self) -> bool {
        !self.subscription_id.is_empty() && !self.gallery.is_empty() && !self.version.is_empty()
    }
}

/// An extension definition available to the node profiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionProfile {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension_parameters: String,
    #[serde(
        rename = "parametersKeyvaultSecretRef",
        skip_serializing_if = "Option::is_none"
    )]
    pub extension_parameters_key_vault_ref: Option<KeyvaultSecretRef>,
    #[serde(rename = "rootURL", skip_serializing_if = "String::is_empty")]
    pub root_url: String,
    /// Bash script, for preprovision extensions only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(rename = "urlQuery", skip_serializing_if = "String::is_empty")]
    pub url_query: String,
}

/// An extension attached to the master or an agent pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Extension {
    pub name: String,
    pub single_or_all: String,
    pub template: String,
}

/// A file copied from `source` to `dest` on master nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomFile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dest: String,
}

/// Resource names of a deployed cluster, all derived from the cluster definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterMetadata {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subnet_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vnet_resource_group_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub virtual_network_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub security_group_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_table_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_availability_set_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_scale_set_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_prefix: String,
}

/// A sovereign or Azure Stack cloud. Its presence marks the deployment target as non-standard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomCloudProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_environment_spec_config: Option<AzureEnvironmentSpecConfig>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub identity_system: Option<IdentitySystem>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub authentication_method: Option<AuthenticationMethod>,
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependencies_location: Option<DependenciesLocation>,
    #[serde(rename = "portalURL", skip_serializing_if = "String::is_empty")]
    pub portal_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_windows_defaults() {
        let profile = WindowsProfile::default();
        assert_eq!(profile.windows_docker_version(), "18.09.7");
        assert_eq!(
            profile.windows_sku(),
            "Datacenter-Core-1809-with-Containers-smalldisk"
        );
        assert!(profile.enable_windows_update());

        let profile = WindowsProfile {
            windows_docker_version: "19.03.2".to_string(),
            windows_sku: "custom".to_string(),
            enable_automatic_updates: Some(false),
            ..Default::default()
        };
        assert_eq!(profile.windows_docker_version(), "19.03.2");
        assert_eq!(profile.windows_sku(), "custom");
        assert!(!profile.enable_windows_update());
    }

    #[test]
    fn test_search_domain_requires_all_parts() {
        let mut profile = LinuxProfile {
            custom_search_domain: Some(CustomSearchDomain {
                name: "contoso.com".to_string(),
                realm_user: "admin".to_string(),
                realm_password: Secret::default(),
            }),
            ..Default::default()
        };
        assert!(!profile.has_search_domain());

        if let Some(domain) = profile.custom_search_domain.as_mut() {
            domain.realm_password = Secret::from("pass");
        }
        assert!(profile.has_search_domain());
        assert!(!profile.has_custom_nodes_dns());
    }

    #[test]
    fn test_feature_flags_by_name() {
        let flags = FeatureFlags {
            enable_ipv6_dual_stack: true,
            ..Default::default()
        };
        assert!(flags.is_feature_enabled("EnableIPv6DualStack"));
        assert!(!flags.is_feature_enabled("BlockOutboundInternet"));
        assert!(!flags.is_feature_enabled("NotAFlag"));
    }

    #[test]
    fn test_quirky_wire_names() {
        let linux: LinuxProfile = serde_json::from_value(json!({
            "adminUsername": "azureuser",
            "ssh": {"publicKeys": [{"keyData": "ssh-rsa AAAA"}]},
            "scriptroot": "https://scripts",
            "CustomNodesDNS": {"dnsServer": "10.0.0.1"},
            "distro": "",
            "someFutureField": true,
        }))
        .unwrap();
        assert_eq!(linux.script_root_url, "https://scripts");
        assert!(linux.has_custom_nodes_dns());
        assert_eq!(linux.distro, None);

        let reference = KeyvaultSecretRef {
            vault_id: "/vault".to_string(),
            secret_name: "sp".to_string(),
            secret_version: "1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({"vaultID": "/vault", "secretName": "sp", "version": "1"})
        );
    }
}
