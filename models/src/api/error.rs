use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Cluster has neither a master profile nor a hosted master profile"))]
    TopologyMissing,

    #[snafu(display("Cluster has both a master profile and a hosted master profile"))]
    TopologyAmbiguous,

    #[snafu(display("Cluster has no master profile"))]
    MasterProfileMissing,

    #[snafu(display("Could not serialize Environment object: '{}'", source))]
    EnvironmentSerialize { source: serde_json::Error },

    #[snafu(display(
        "Unable to resolve cloud spec for location '{}': '{}'",
        cloud_location,
        source
    ))]
    CloudSpec {
        source: crate::cloud::CloudError,
        cloud_location: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::CloudError;

    #[test]
    fn test_cloud_spec_message_names_location() {
        let err = Error::CloudSpec {
            source: CloudError::UnknownCloud {
                name: "AzureMoonCloud".to_string(),
            },
            cloud_location: "moonbase1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to resolve cloud spec for location 'moonbase1': 'Unknown cloud 'AzureMoonCloud''"
        );
    }
}
