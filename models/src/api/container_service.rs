use super::error::{self, Result};
use super::{Properties, ResourcePurchasePlan};
use crate::cloud::{self, AzureEnvironmentSpecConfig};
use crate::constants::{AZURE_CHINA_CLOUD, AZURE_PUBLIC_CLOUD, AZURE_US_GOVERNMENT_CLOUD};

use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::collections::BTreeMap;

/// The ARM resource wrapping a cluster definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerService {
    pub id: String,
    pub location: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ResourcePurchasePlan>,
    pub tags: BTreeMap<String, String>,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub properties: Properties,
}

impl ContainerService {
    /// Regions the cluster may be deployed to. A custom cloud only offers the cluster's own.
    pub fn locations(&self) -> Vec<String> {
        if self.properties.is_azure_stack_cloud() {
            vec![self.location.clone()]
        } else {
            cloud::azure_locations()
                .iter()
                .map(|location| location.to_string())
                .collect()
        }
    }

    /// The defaults of the cloud the cluster targets. A spec carried by the custom cloud profile
    /// takes precedence over the static table.
    pub fn cloud_spec_config(&self) -> Result<&AzureEnvironmentSpecConfig> {
        if let Some(spec) = self
            .properties
            .custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.azure_environment_spec_config.as_ref())
        {
            return Ok(spec);
        }
        let target = cloud::target_env(&self.location, self.properties.custom_cloud_name());
        cloud::cloud_spec_config(target).context(error::CloudSpecSnafu {
            cloud_location: self.location.as_str(),
        })
    }

    pub fn is_aks_billing_enabled(&self) -> Result<bool> {
        let spec = self.cloud_spec_config()?;
        Ok([AZURE_PUBLIC_CLOUD, AZURE_CHINA_CLOUD, AZURE_US_GOVERNMENT_CLOUD]
            .contains(&spec.cloud_name.as_str()))
    }

    /// `<master dns prefix>.<location>.<cloud dns suffix>`.
    pub fn azure_prod_fqdn(&self) -> Result<String> {
        let master = self
            .properties
            .master_profile
            .as_ref()
            .context(error::MasterProfileMissingSnafu)?;
        let spec = self.cloud_spec_config()?;
        Ok(cloud::format_fqdn(&master.dns_prefix, &self.location, spec))
    }

    /// Sets the fault domain count of the master and of every agent pool.
    pub fn set_platform_fault_domain_count(&mut self, count: i32) {
        if let Some(master) = self.properties.master_profile.as_mut() {
            master.platform_fault_domain_count = Some(count);
        }
        for pool in &mut self.properties.agent_pool_profiles {
            pool.platform_fault_domain_count = Some(count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::default_container_service;
    use crate::api::{CustomCloudProfile, MasterProfile};
    use crate::cloud::{AzureEndpointConfig, Environment};

    #[test]
    fn test_public_cloud() {
        let cs = default_container_service();
        assert_eq!(cs.cloud_spec_config().unwrap().cloud_name, "AzurePublicCloud");
        assert!(cs.is_aks_billing_enabled().unwrap());
        assert!(cs.locations().contains(&"westus2".to_string()));
    }

    #[test]
    fn test_german_cloud_not_billed() {
        let cs = ContainerService {
            location: "germanycentral".to_string(),
            ..default_container_service()
        };
        assert!(!cs.is_aks_billing_enabled().unwrap());
    }

    #[test]
    fn test_prod_fqdn() {
        let mut cs = default_container_service();
        cs.properties.master_profile = Some(MasterProfile {
            dns_prefix: "mymaster".to_string(),
            ..Default::default()
        });
        assert_eq!(
            cs.azure_prod_fqdn().unwrap(),
            "mymaster.westus2.cloudapp.azure.com"
        );

        cs.properties.master_profile = None;
        assert!(cs.azure_prod_fqdn().is_err());
    }

    #[test]
    fn test_custom_cloud_spec_wins() {
        let mut cs = default_container_service();
        cs.location = "local".to_string();
        cs.properties.master_profile = Some(MasterProfile {
            dns_prefix: "stack".to_string(),
            ..Default::default()
        });
        cs.properties.custom_cloud_profile = Some(CustomCloudProfile {
            environment: Some(Environment {
                name: "AzureStackCloud".to_string(),
                ..Default::default()
            }),
            azure_environment_spec_config: Some(AzureEnvironmentSpecConfig {
                cloud_name: "AzureStackCloud".to_string(),
                endpoint_config: AzureEndpointConfig {
                    resource_manager_vm_dns_suffix: "cloudapp.azurestack.external".to_string(),
                },
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(cs.locations(), vec!["local".to_string()]);
        let inline = cs
            .properties
            .custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.azure_environment_spec_config.as_ref())
            .unwrap();
        assert!(std::ptr::eq(cs.cloud_spec_config().unwrap(), inline));
        assert!(!cs.is_aks_billing_enabled().unwrap());
        assert_eq!(
            cs.azure_prod_fqdn().unwrap(),
            "stack.local.cloudapp.azurestack.external"
        );
    }

    #[test]
    fn test_set_platform_fault_domain_count() {
        let mut cs = default_container_service();
        cs.properties.master_profile = Some(MasterProfile::default());
        cs.set_platform_fault_domain_count(2);
        assert_eq!(
            cs.properties
                .master_profile
                .as_ref()
                .and_then(|master| master.platform_fault_domain_count),
            Some(2)
        );
        assert!(cs
            .properties
            .agent_pool_profiles
            .iter()
            .all(|pool| pool.platform_fault_domain_count == Some(2)));
    }
}
