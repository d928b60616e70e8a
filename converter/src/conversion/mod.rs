use models::versions::{self, ApiVersion, VersionError};

use snafu::{ResultExt, Snafu};
use tracing::{event, instrument, Level};

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Converts one document to `desired_version` through the canonical model. A document already
/// at that version is returned as it is.
///
/// Input:
#[cfg_attr(doctest, doc = " ````no_test")]
/// ```
/// {
///     "apiVersion": "2017-07-01",
///     "location": "westus2",
///     "properties": {
///         "orchestratorProfile": {"orchestratorType": "DockerCE"},
///         "masterProfile": {"count": 3, "dnsPrefix": "swarm", "vmSize": "Standard_D2_v2"},
///         "agentPoolProfiles": [{"name": "agent", "count": 2, "vmSize": "Standard_D2_v2"}]
///     }
/// }
/// ```
/// Output for `ApiVersion::Vlabs`:
#[cfg_attr(doctest, doc = " ````no_test")]
/// ```
/// {
///     "apiVersion": "vlabs",
///     "location": "westus2",
///     "properties": {
///         "orchestratorProfile": {"orchestratorType": "SwarmMode"},
///         ...
///     }
/// }
/// ```
#[instrument(skip(document), err)]
pub fn convert_document(
    document: serde_json::Value,
    desired_version: ApiVersion,
) -> Result<serde_json::Value> {
    let version = versions::api_version_of(&document).context(SourceVersionSnafu)?;
    if version == desired_version {
        event!(Level::DEBUG, %version, "Document already at desired version");
        return Ok(document);
    }

    let canonical = versions::to_canonical(document).context(ReadDocumentSnafu { version })?;
    versions::to_versioned(&canonical, desired_version).context(WriteDocumentSnafu {
        src_version: version,
        dst_version: desired_version,
    })
}

/// Converts every document to `desired_version`, keeping their order. The first failing document
/// fails the call and its position is reported.
#[instrument(skip(documents), fields(count = documents.len()), err)]
pub fn convert_documents(
    documents: Vec<serde_json::Value>,
    desired_version: ApiVersion,
) -> Result<Vec<serde_json::Value>> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            convert_document(document, desired_version).context(DocumentSnafu { index })
        })
        .collect()
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConvertError {
    #[snafu(display("Unable to determine the version of a document: {}", source))]
    SourceVersion { source: VersionError },

    #[snafu(display("Failed to read {} document: {}", version, source))]
    ReadDocument {
        version: ApiVersion,
        source: VersionError,
    },

    #[snafu(display(
        "Failed to convert from {} to {} version: {}",
        src_version,
        dst_version,
        source
    ))]
    WriteDocument {
        src_version: ApiVersion,
        dst_version: ApiVersion,
        source: VersionError,
    },

    #[snafu(display("Document {} could not be converted: {}", index, source))]
    Document {
        index: usize,
        #[snafu(source(from(ConvertError, Box::new)))]
        source: Box<ConvertError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn docker_ce_cluster() -> serde_json::Value {
        json!({
            "apiVersion": "2017-07-01",
            "location": "westus2",
            "tags": {"team": "infra", "env": "test"},
            "properties": {
                "orchestratorProfile": {"orchestratorType": "DockerCE"},
                "masterProfile": {"count": 3, "dnsPrefix": "swarm", "vmSize": "Standard_D2_v2"},
                "agentPoolProfiles": [{"name": "agent", "count": 2, "vmSize": "Standard_D2_v2"}]
            }
        })
    }

    fn kubernetes_cluster() -> serde_json::Value {
        json!({
            "apiVersion": "vlabs",
            "location": "eastus",
            "properties": {
                "orchestratorProfile": {
                    "orchestratorType": "Kubernetes",
                    "orchestratorRelease": "1.13",
                    "kubernetesConfig": {"networkPlugin": "azure", "enableRbac": true}
                },
                "masterProfile": {"count": 1, "dnsPrefix": "k8s", "vmSize": "Standard_D2_v2"},
                "agentPoolProfiles": [{"name": "linuxpool", "count": 3, "vmSize": "Standard_D2_v2"}],
                "linuxProfile": {
                    "adminUsername": "azureuser",
                    "ssh": {"publicKeys": [{"keyData": "ssh-rsa AAAA"}]}
                }
            }
        })
    }

    #[test]
    fn test_convert_upgrade_to_vlabs() {
        let object = convert_document(docker_ce_cluster(), ApiVersion::Vlabs).unwrap();

        assert_eq!(object["apiVersion"], "vlabs");
        assert_eq!(object["location"], "westus2");
        assert_eq!(
            object["properties"]["orchestratorProfile"]["orchestratorType"],
            "SwarmMode"
        );
        assert_eq!(object["properties"]["masterProfile"]["count"], 3);

        let tags: BTreeMap<String, String> =
            serde_json::from_value(object["tags"].clone()).unwrap();
        assert_eq!(
            tags,
            btreemap! {
                "env".to_string() => "test".to_string(),
                "team".to_string() => "infra".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_to_managed_cluster() {
        let converted = convert_document(kubernetes_cluster(), ApiVersion::V20180331).unwrap();
        let properties = &converted["properties"];

        assert_eq!(converted["apiVersion"], "2018-03-31");
        assert_eq!(properties["kubernetesVersion"], "1.13.11");
        assert_eq!(properties["dnsPrefix"], "k8s");
        assert_eq!(properties["enableRBAC"], true);
        assert_eq!(properties["networkProfile"]["networkPlugin"], "azure");
        assert_eq!(properties["agentPoolProfiles"][0]["name"], "linuxpool");
        assert!(properties.get("masterProfile").is_none());
    }

    #[test]
    fn test_same_version_is_unchanged() {
        let mut document = docker_ce_cluster();
        document["futureField"] = json!({"kept": true});

        let converted = convert_document(document.clone(), ApiVersion::V20170701).unwrap();
        assert_eq!(converted, document);
    }

    #[test]
    fn test_documents_keep_order() {
        let objects = convert_documents(
            vec![kubernetes_cluster(), docker_ce_cluster()],
            ApiVersion::V20170701,
        )
        .unwrap();

        let orchestrators: Vec<_> = objects
            .iter()
            .map(|object| object["properties"]["orchestratorProfile"]["orchestratorType"].clone())
            .collect();
        assert_eq!(orchestrators, vec![json!("Kubernetes"), json!("DockerCE")]);
        assert_eq!(
            objects[0]["properties"]["orchestratorProfile"]["orchestratorVersion"],
            "1.13.11"
        );
        assert!(objects
            .iter()
            .all(|object| object["apiVersion"] == "2017-07-01"));
    }

    #[test]
    fn test_one_bad_document_fails_all() {
        let err = convert_documents(
            vec![
                docker_ce_cluster(),
                json!({"location": "westus2", "properties": {}}),
            ],
            ApiVersion::Vlabs,
        )
        .unwrap_err();

        match err {
            ConvertError::Document { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(
                    *source,
                    ConvertError::SourceVersion {
                        source: VersionError::MissingApiVersion
                    }
                ));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_no_documents() {
        assert!(convert_documents(Vec::new(), ApiVersion::Vlabs)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unrepresentable_cluster_fails_to_read() {
        let err = convert_document(
            json!({
                "apiVersion": "2016-09-30",
                "properties": {"orchestratorProfile": {"orchestratorType": "DockerCE"}}
            }),
            ApiVersion::Vlabs,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::ReadDocument {
                version: ApiVersion::V20160930,
                source: VersionError::UnsupportedValue { .. },
            }
        ));
    }

    #[test]
    fn test_cluster_without_control_plane_fails_to_read() {
        let mut document = docker_ce_cluster();
        document["properties"]
            .as_object_mut()
            .unwrap()
            .remove("masterProfile");

        let err = convert_document(document, ApiVersion::Vlabs).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::ReadDocument {
                version: ApiVersion::V20170701,
                source: VersionError::MissingField {
                    field: "masterProfile",
                    ..
                },
            }
        ));
    }
}
