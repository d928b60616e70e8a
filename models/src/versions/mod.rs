//! The external schema versions of the cluster definition.
//!
//! Each version is a historical JSON contract with its own field names and value spellings. A
//! version module owns the shapes of that contract and converts them to and from the canonical
//! [`ContainerService`](crate::api::ContainerService). Converting to a version is lossy: fields the
//! version does not carry are dropped. Converting from a version leaves the fields it does not
//! carry at their zero value.
//!
//! To add a version, add its module with a `Properties` shape implementing
//! [`VersionedProperties`], add its variant to [`ApiVersion`], and route it in
//! [`to_canonical`] and [`to_versioned`].
pub mod agentpool;
pub mod error;
pub(crate) mod table;
pub mod v20160330;
pub mod v20160930;
pub mod v20170131;
pub mod v20170701;
pub mod vlabs;

use self::error::{
    AmbiguousTopologySnafu, DeserializeSnafu, MissingApiVersionSnafu, MissingFieldSnafu, Result,
    SerializeSnafu, UnknownApiVersionSnafu,
};
pub use self::error::Error as VersionError;
use crate::api::{self, ResourcePurchasePlan};

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::instrument;

/// A supported external schema version, spelled as in a document's `apiVersion`.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum_macros::Display,
)]
pub enum ApiVersion {
    #[serde(rename = "2016-03-30")]
    #[strum(serialize = "2016-03-30")]
    V20160330,
    #[serde(rename = "2016-09-30")]
    #[strum(serialize = "2016-09-30")]
    V20160930,
    #[serde(rename = "2017-01-31")]
    #[strum(serialize = "2017-01-31")]
    V20170131,
    #[serde(rename = "2017-07-01")]
    #[strum(serialize = "2017-07-01")]
    V20170701,
    #[serde(rename = "vlabs")]
    #[strum(serialize = "vlabs")]
    Vlabs,
    #[serde(rename = "2017-08-31")]
    #[strum(serialize = "2017-08-31")]
    V20170831,
    #[serde(rename = "2018-03-31")]
    #[strum(serialize = "2018-03-31")]
    V20180331,
}

serde_plain::derive_fromstr_from_deserialize!(ApiVersion);

impl ApiVersion {
    pub const ALL: [ApiVersion; 7] = [
        ApiVersion::V20160330,
        ApiVersion::V20160930,
        ApiVersion::V20170131,
        ApiVersion::V20170701,
        ApiVersion::Vlabs,
        ApiVersion::V20170831,
        ApiVersion::V20180331,
    ];

    /// Whether the version describes a managed cluster rather than a full container service.
    pub fn is_agent_pool_only(&self) -> bool {
        matches!(self, ApiVersion::V20170831 | ApiVersion::V20180331)
    }
}

/// The properties of one schema version and their mapping to the canonical properties.
pub trait VersionedProperties: Sized {
    const API_VERSION: ApiVersion;

    fn from_canonical(properties: &api::Properties) -> Self;

    fn into_canonical(self) -> Result<api::Properties>;
}

/// A whole document of one schema version.
pub trait VersionedModel: Serialize + DeserializeOwned {
    const API_VERSION: ApiVersion;

    fn from_canonical(container_service: &api::ContainerService) -> Self;

    fn into_canonical(self) -> Result<api::ContainerService>;
}

/// The ARM resource envelope every schema version shares.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource<P> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ResourcePurchasePlan>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub resource_type: String,
    pub properties: Option<P>,
}

impl<P> VersionedModel for Resource<P>
where
    P: VersionedProperties + Serialize + DeserializeOwned,
{
    const API_VERSION: ApiVersion = P::API_VERSION;

    fn from_canonical(container_service: &api::ContainerService) -> Self {
        Resource {
            id: container_service.id.clone(),
            location: container_service.location.clone(),
            name: container_service.name.clone(),
            plan: container_service.plan.clone(),
            tags: container_service.tags.clone(),
            resource_type: container_service.resource_type.clone(),
            properties: Some(P::from_canonical(&container_service.properties)),
        }
    }

    fn into_canonical(self) -> Result<api::ContainerService> {
        let properties = self.properties.context(MissingFieldSnafu {
            version: P::API_VERSION,
            field: "properties",
        })?;
        let properties = properties.into_canonical()?;
        check_topology(P::API_VERSION, &properties)?;
        Ok(api::ContainerService {
            id: self.id,
            location: self.location,
            name: self.name,
            plan: self.plan,
            tags: self.tags,
            resource_type: self.resource_type,
            properties,
        })
    }
}

/// A cluster read from any version has exactly one control plane.
pub(crate) fn check_topology(version: ApiVersion, properties: &api::Properties) -> Result<()> {
    match properties.topology() {
        Ok(_) => Ok(()),
        Err(api::ModelError::TopologyMissing) => MissingFieldSnafu {
            version,
            field: "masterProfile",
        }
        .fail(),
        Err(_) => AmbiguousTopologySnafu { version }.fail(),
    }
}

/// A document as exchanged with callers: the model next to its `apiVersion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionedDocument<T> {
    pub api_version: ApiVersion,
    #[serde(flatten)]
    pub model: T,
}

impl<T: VersionedModel> VersionedDocument<T> {
    pub fn new(model: T) -> Self {
        VersionedDocument {
            api_version: T::API_VERSION,
            model,
        }
    }
}

/// Reads the orchestrator type of a full container service document, which it cannot omit.
pub(crate) fn required_orchestrator(
    version: ApiVersion,
    table: &table::ValueTable<api::OrchestratorType>,
    orchestrator_type: Option<&str>,
) -> Result<api::OrchestratorType> {
    let orchestrator_type = orchestrator_type.context(MissingFieldSnafu {
        version,
        field: "orchestratorProfile",
    })?;
    table.required(version, orchestrator_type)
}

/// The `apiVersion` a document declares.
pub fn api_version_of(document: &serde_json::Value) -> Result<ApiVersion> {
    let version = document
        .get("apiVersion")
        .and_then(serde_json::Value::as_str)
        .context(MissingApiVersionSnafu)?;
    ApiVersion::from_str(version).ok().context(UnknownApiVersionSnafu { version })
}

/// Reads a document of any supported version into the canonical model.
#[instrument(skip(document), err)]
pub fn to_canonical(document: serde_json::Value) -> Result<api::ContainerService> {
    match api_version_of(&document)? {
        ApiVersion::V20160330 => read::<v20160330::ContainerService>(document),
        ApiVersion::V20160930 => read::<v20160930::ContainerService>(document),
        ApiVersion::V20170131 => read::<v20170131::ContainerService>(document),
        ApiVersion::V20170701 => read::<v20170701::ContainerService>(document),
        ApiVersion::Vlabs => read::<vlabs::ContainerService>(document),
        ApiVersion::V20170831 => read::<agentpool::v20170831::ManagedCluster>(document),
        ApiVersion::V20180331 => read::<agentpool::v20180331::ManagedCluster>(document),
    }
}

/// Writes the canonical model as a document of the given version.
#[instrument(skip(container_service), err)]
pub fn to_versioned(
    container_service: &api::ContainerService,
    version: ApiVersion,
) -> Result<serde_json::Value> {
    match version {
        ApiVersion::V20160330 => write::<v20160330::ContainerService>(container_service),
        ApiVersion::V20160930 => write::<v20160930::ContainerService>(container_service),
        ApiVersion::V20170131 => write::<v20170131::ContainerService>(container_service),
        ApiVersion::V20170701 => write::<v20170701::ContainerService>(container_service),
        ApiVersion::Vlabs => write::<vlabs::ContainerService>(container_service),
        ApiVersion::V20170831 => write::<agentpool::v20170831::ManagedCluster>(container_service),
        ApiVersion::V20180331 => write::<agentpool::v20180331::ManagedCluster>(container_service),
    }
}

fn read<T: VersionedModel>(document: serde_json::Value) -> Result<api::ContainerService> {
    let document: VersionedDocument<T> =
        serde_json::from_value(document).context(DeserializeSnafu {
            version: T::API_VERSION,
        })?;
    document.model.into_canonical()
}

fn write<T: VersionedModel>(container_service: &api::ContainerService) -> Result<serde_json::Value> {
    serde_json::to_value(VersionedDocument::new(T::from_canonical(container_service))).context(
        SerializeSnafu {
            version: T::API_VERSION,
        },
    )
}
