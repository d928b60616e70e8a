//! Closed value sets of the canonical model.
//!
//! Every enumerated field of the cluster definition is one of these types. Their serde spelling is
//! the canonical wire spelling; unknown spellings fail to deserialize instead of being carried
//! through as opaque strings. Versions that spell a value differently map through the tables in
//! [`crate::versions::table`].
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The orchestrator a cluster is deployed with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OrchestratorType {
    Mesos,
    #[serde(rename = "DCOS")]
    Dcos,
    Swarm,
    Kubernetes,
    SwarmMode,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OsType {
    Linux,
    Windows,
}

/// Linux distribution of a node group.
///
/// The deprecated AKS distro spellings are accepted as aliases on input and normalized to their
/// replacement; they are never written back out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Distro {
    #[serde(rename = "ubuntu")]
    Ubuntu,
    #[serde(rename = "ubuntu-18.04")]
    Ubuntu1804,
    #[serde(rename = "rhel")]
    Rhel,
    #[serde(rename = "coreos")]
    CoreOs,
    #[serde(
        rename = "aks-ubuntu-16.04",
        alias = "aks",
        alias = "aks-docker-engine"
    )]
    AksUbuntu1604,
    #[serde(rename = "aks-ubuntu-18.04", alias = "aks-1804")]
    AksUbuntu1804,
    #[serde(rename = "acc-16.04")]
    Acc1604,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum StorageProfile {
    StorageAccount,
    ManagedDisks,
    Ephemeral,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AvailabilityProfile {
    AvailabilitySet,
    VirtualMachineScaleSets,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ScaleSetPriority {
    Regular,
    Low,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ScaleSetEvictionPolicy {
    Delete,
    Deallocate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerRuntime {
    Docker,
    KataContainers,
    Containerd,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPlugin {
    Azure,
    Kubenet,
    Flannel,
    Cilium,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
    Calico,
    Cilium,
    Azure,
    None,
}

/// kube-proxy operating mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum KubeProxyMode {
    #[serde(rename = "iptables")]
    IpTables,
    #[serde(rename = "ipvs")]
    Ipvs,
}

/// Role of an agent pool. An absent role means a plain agent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgentPoolProfileRole {
    Compute,
    Infra,
    Master,
}

/// Current state of a container service resource.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProvisioningState {
    Creating,
    Updating,
    Scaling,
    Failed,
    Succeeded,
    Deleting,
    Migrating,
    Upgrading,
}

/// The authenticator an AAD-integrated cluster was set up with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticatorType {
    Oidc,
    Webhook,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum IdentitySystem {
    #[default]
    #[serde(rename = "azure_ad")]
    AzureAd,
    #[serde(rename = "adfs")]
    Adfs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMethod {
    #[default]
    ClientSecret,
    ClientCertificate,
}

/// Where an Azure Stack deployment downloads its dependencies from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DependenciesLocation {
    Public,
    China,
    German,
    UsGovernment,
}

serde_plain::derive_display_from_serialize!(OrchestratorType);
serde_plain::derive_fromstr_from_deserialize!(OrchestratorType);
serde_plain::derive_display_from_serialize!(OsType);
serde_plain::derive_display_from_serialize!(Distro);
serde_plain::derive_fromstr_from_deserialize!(Distro);
serde_plain::derive_display_from_serialize!(StorageProfile);
serde_plain::derive_display_from_serialize!(AvailabilityProfile);
serde_plain::derive_display_from_serialize!(ContainerRuntime);
serde_plain::derive_display_from_serialize!(NetworkPlugin);
serde_plain::derive_display_from_serialize!(NetworkPolicy);
serde_plain::derive_display_from_serialize!(KubeProxyMode);
serde_plain::derive_display_from_serialize!(IdentitySystem);
serde_plain::derive_display_from_serialize!(AuthenticationMethod);

impl Distro {
    /// Whether the distro is one of the prebuilt AKS VHD images.
    pub fn is_vhd(&self) -> bool {
        matches!(self, Self::AksUbuntu1604 | Self::AksUbuntu1804)
    }

    pub fn is_ubuntu_1604(&self) -> bool {
        matches!(self, Self::AksUbuntu1604 | Self::Ubuntu | Self::Acc1604)
    }

    pub fn is_ubuntu_1804(&self) -> bool {
        matches!(self, Self::AksUbuntu1804 | Self::Ubuntu1804)
    }

    /// Whether the distro is one of the base (non-VHD) Ubuntu images.
    pub fn is_base_ubuntu(&self) -> bool {
        matches!(self, Self::Ubuntu | Self::Ubuntu1804)
    }
}
