//! Adds Kubernetes, its service principal and custom orchestrator profiles. Mesos is gone.
use super::error::Result;
use super::table::ORCHESTRATORS_V20160930;
use super::v20160330::{
    AgentPoolProfile, LinuxProfile, MasterProfile, OrchestratorProfile, WindowsProfile,
};
use super::{required_orchestrator, ApiVersion, Resource, VersionedProperties};
use crate::api::serde_helpers::optional_enum;
use crate::api::{
    self, CustomProfile, DiagnosticsProfile, JumpboxProfile, ProvisioningState, Secret,
};

use serde::{Deserialize, Serialize};

pub type ContainerService = Resource<Properties>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(
        deserialize_with = "optional_enum::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestrator_profile: Option<OrchestratorProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_profile: Option<MasterProfile>,
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics_profile: Option<DiagnosticsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpbox_profile: Option<JumpboxProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_profile: Option<CustomProfile>,
}

/// Credentials Kubernetes uses against the Azure API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePrincipalProfile {
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub secret: Secret,
}

impl From<&api::ServicePrincipalProfile> for ServicePrincipalProfile {
    fn from(principal: &api::ServicePrincipalProfile) -> Self {
        ServicePrincipalProfile {
            client_id: principal.client_id.clone(),
            secret: principal.secret.clone(),
        }
    }
}

impl From<ServicePrincipalProfile> for api::ServicePrincipalProfile {
    fn from(principal: ServicePrincipalProfile) -> Self {
        api::ServicePrincipalProfile {
            client_id: principal.client_id,
            secret: principal.secret,
            ..Default::default()
        }
    }
}

impl VersionedProperties for Properties {
    const API_VERSION: ApiVersion = ApiVersion::V20160930;

    fn from_canonical(properties: &api::Properties) -> Self {
        Properties {
            provisioning_state: properties.provisioning_state,
            orchestrator_profile: properties.orchestrator_profile.as_ref().map(|orchestrator| {
                OrchestratorProfile {
                    orchestrator_type: ORCHESTRATORS_V20160930
                        .to_versioned(Some(orchestrator.orchestrator_type)),
                }
            }),
            master_profile: properties.master_profile.as_ref().map(MasterProfile::from),
            agent_pool_profiles: properties
                .agent_pool_profiles
                .iter()
                .map(AgentPoolProfile::from)
                .collect(),
            linux_profile: properties.linux_profile.as_ref().map(LinuxProfile::from),
            windows_profile: properties.windows_profile.as_ref().map(WindowsProfile::from),
            diagnostics_profile: properties.diagnostics_profile.clone(),
            jumpbox_profile: properties.jumpbox_profile.clone(),
            service_principal_profile: properties
                .service_principal_profile
                .as_ref()
                .map(ServicePrincipalProfile::from),
            custom_profile: properties.custom_profile.clone(),
        }
    }

    fn into_canonical(self) -> Result<api::Properties> {
        let orchestrator_type = required_orchestrator(
            Self::API_VERSION,
            &ORCHESTRATORS_V20160930,
            self.orchestrator_profile
                .as_ref()
                .map(|orchestrator| orchestrator.orchestrator_type.as_str()),
        )?;

        Ok(api::Properties {
            provisioning_state: self.provisioning_state,
            orchestrator_profile: Some(api::OrchestratorProfile::new(orchestrator_type, "")),
            master_profile: self.master_profile.map(Into::into),
            agent_pool_profiles: self
                .agent_pool_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            linux_profile: self.linux_profile.map(Into::into),
            windows_profile: self.windows_profile.map(Into::into),
            diagnostics_profile: self.diagnostics_profile,
            jumpbox_profile: self.jumpbox_profile,
            service_principal_profile: self.service_principal_profile.map(Into::into),
            custom_profile: self.custom_profile,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::default_container_service;
    use crate::api::OrchestratorType;
    use crate::versions::VersionedModel;
    use serde_json::json;

    #[test]
    fn test_shared_fields_round_trip() {
        let cs = default_container_service();
        let back = ContainerService::from_canonical(&cs).into_canonical().unwrap();
        let (properties, original) = (&back.properties, &cs.properties);

        assert_eq!(
            properties.orchestrator_profile.as_ref().unwrap().orchestrator_type,
            OrchestratorType::Kubernetes
        );
        let principal = properties.service_principal_profile.as_ref().unwrap();
        let original_principal = original.service_principal_profile.as_ref().unwrap();
        assert_eq!(principal.client_id, original_principal.client_id);
        assert_eq!(principal.secret, original_principal.secret);
        assert!(principal.keyvault_secret_ref.is_none());
        assert_eq!(properties.custom_profile, original.custom_profile);
        assert_eq!(
            properties.master_profile.as_ref().unwrap().dns_prefix,
            "blueorange"
        );
    }

    #[test]
    fn test_service_principal_wire_names() {
        let cs = default_container_service();
        let document = serde_json::to_value(ContainerService::from_canonical(&cs)).unwrap();
        assert_eq!(
            document["properties"]["servicePrincipalProfile"],
            json!({"clientId": "fooClientID", "secret": "fooSecret"})
        );
    }

    #[test]
    fn test_swarm_mode_not_representable() {
        let mut cs = default_container_service();
        cs.properties.orchestrator_profile =
            Some(api::OrchestratorProfile::new(OrchestratorType::SwarmMode, ""));
        let versioned = ContainerService::from_canonical(&cs);
        assert_eq!(
            versioned
                .properties
                .as_ref()
                .and_then(|properties| properties.orchestrator_profile.clone())
                .unwrap()
                .orchestrator_type,
            ""
        );
    }
}
