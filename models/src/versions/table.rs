//! Per-version spellings of the closed value sets.
//!
//! Each table lists the wire strings a version accepts for one field and the canonical value each
//! maps to. Deprecated spellings are accepted on input only; output always uses the first entry
//! naming a value.
use super::error::{MissingFieldSnafu, Result, UnsupportedValueSnafu};
use super::ApiVersion;
use crate::api::{Distro, NetworkPlugin, NetworkPolicy, OrchestratorType};

use std::fmt::Debug;
use tracing::{event, Level};

pub(crate) struct ValueTable<T: 'static> {
    field: &'static str,
    entries: &'static [(&'static str, T)],
    deprecated: &'static [(&'static str, T)],
}

impl<T: Copy + PartialEq + Debug> ValueTable<T> {
    /// Reads an optional wire value. The empty string is absent.
    pub(crate) fn to_canonical(&self, version: ApiVersion, value: &str) -> Result<Option<T>> {
        if value.is_empty() {
            return Ok(None);
        }
        if let Some(canonical) = lookup(self.entries, value) {
            return Ok(Some(canonical));
        }
        if let Some(canonical) = lookup(self.deprecated, value) {
            event!(
                Level::DEBUG,
                field = self.field,
                value,
                replacement = ?canonical,
                "Mapped deprecated value"
            );
            return Ok(Some(canonical));
        }
        UnsupportedValueSnafu {
            version,
            field: self.field,
            value,
        }
        .fail()
    }

    /// Reads a wire value the document cannot omit.
    pub(crate) fn required(&self, version: ApiVersion, value: &str) -> Result<T> {
        match self.to_canonical(version, value)? {
            Some(canonical) => Ok(canonical),
            None => MissingFieldSnafu {
                version,
                field: self.field,
            }
            .fail(),
        }
    }

    /// Writes a canonical value. A value the version has no spelling for is written as absent.
    pub(crate) fn to_versioned(&self, value: Option<T>) -> String {
        let value = match value {
            Some(value) => value,
            None => return String::new(),
        };
        match self.entries.iter().find(|(_, canonical)| *canonical == value) {
            Some((name, _)) => name.to_string(),
            None => {
                event!(
                    Level::DEBUG,
                    field = self.field,
                    value = ?value,
                    "Dropped value the target version cannot represent"
                );
                String::new()
            }
        }
    }
}

fn lookup<T: Copy>(entries: &[(&str, T)], value: &str) -> Option<T> {
    entries
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, canonical)| *canonical)
}

const ORCHESTRATOR_TYPE: &str = "orchestratorType";

pub(crate) static ORCHESTRATORS_V20160330: ValueTable<OrchestratorType> = ValueTable {
    field: ORCHESTRATOR_TYPE,
    entries: &[
        ("Mesos", OrchestratorType::Mesos),
        ("DCOS", OrchestratorType::Dcos),
        ("Swarm", OrchestratorType::Swarm),
    ],
    deprecated: &[],
};

pub(crate) static ORCHESTRATORS_V20160930: ValueTable<OrchestratorType> = ValueTable {
    field: ORCHESTRATOR_TYPE,
    entries: &[
        ("DCOS", OrchestratorType::Dcos),
        ("Swarm", OrchestratorType::Swarm),
        ("Kubernetes", OrchestratorType::Kubernetes),
    ],
    deprecated: &[],
};

/// 2017-01-31 and 2017-07-01 call Swarm Mode `DockerCE`.
pub(crate) static ORCHESTRATORS_DOCKER_CE: ValueTable<OrchestratorType> = ValueTable {
    field: ORCHESTRATOR_TYPE,
    entries: &[
        ("DCOS", OrchestratorType::Dcos),
        ("Swarm", OrchestratorType::Swarm),
        ("Kubernetes", OrchestratorType::Kubernetes),
        ("DockerCE", OrchestratorType::SwarmMode),
    ],
    deprecated: &[],
};

pub(crate) static ORCHESTRATORS_VLABS: ValueTable<OrchestratorType> = ValueTable {
    field: ORCHESTRATOR_TYPE,
    entries: &[
        ("DCOS", OrchestratorType::Dcos),
        ("Swarm", OrchestratorType::Swarm),
        ("Kubernetes", OrchestratorType::Kubernetes),
        ("SwarmMode", OrchestratorType::SwarmMode),
    ],
    deprecated: &[],
};

pub(crate) static DISTROS_VLABS: ValueTable<Distro> = ValueTable {
    field: "distro",
    entries: &[
        ("ubuntu", Distro::Ubuntu),
        ("ubuntu-18.04", Distro::Ubuntu1804),
        ("rhel", Distro::Rhel),
        ("coreos", Distro::CoreOs),
        ("aks-ubuntu-16.04", Distro::AksUbuntu1604),
        ("aks-ubuntu-18.04", Distro::AksUbuntu1804),
        ("acc-16.04", Distro::Acc1604),
    ],
    deprecated: &[
        ("aks", Distro::AksUbuntu1604),
        ("aks-1804", Distro::AksUbuntu1804),
        ("aks-docker-engine", Distro::AksUbuntu1604),
    ],
};

/// OS image config keys renamed along with the distros they describe. Only these keys may be
/// dropped when their replacement is also present.
pub(crate) const DEPRECATED_OS_IMAGE_KEYS: &[(&str, &str)] = &[
    ("aks", "aks-ubuntu-16.04"),
    ("aks-1804", "aks-ubuntu-18.04"),
    ("aks-docker-engine", "aks-ubuntu-16.04"),
];

pub(crate) static NETWORK_PLUGINS_V20180331: ValueTable<NetworkPlugin> = ValueTable {
    field: "networkPlugin",
    entries: &[
        ("azure", NetworkPlugin::Azure),
        ("kubenet", NetworkPlugin::Kubenet),
    ],
    deprecated: &[],
};

pub(crate) static NETWORK_POLICIES_V20180331: ValueTable<NetworkPolicy> = ValueTable {
    field: "networkPolicy",
    entries: &[
        ("calico", NetworkPolicy::Calico),
        ("azure", NetworkPolicy::Azure),
    ],
    deprecated: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_distros_read_only() {
        for (alias, modern) in [
            ("aks", Distro::AksUbuntu1604),
            ("aks-1804", Distro::AksUbuntu1804),
            ("aks-docker-engine", Distro::AksUbuntu1604),
        ] {
            let canonical = DISTROS_VLABS
                .to_canonical(ApiVersion::Vlabs, alias)
                .unwrap();
            assert_eq!(canonical, Some(modern));
            assert_ne!(DISTROS_VLABS.to_versioned(canonical), alias);
        }
        assert_eq!(
            DISTROS_VLABS.to_versioned(Some(Distro::AksUbuntu1604)),
            "aks-ubuntu-16.04"
        );
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(
            ORCHESTRATORS_VLABS
                .to_canonical(ApiVersion::Vlabs, "")
                .unwrap(),
            None
        );
        assert_eq!(ORCHESTRATORS_VLABS.to_versioned(None), "");
    }

    #[test]
    fn test_required_value() {
        assert!(matches!(
            ORCHESTRATORS_VLABS.required(ApiVersion::Vlabs, ""),
            Err(crate::versions::error::Error::MissingField {
                field: "orchestratorType",
                ..
            })
        ));
        assert_eq!(
            ORCHESTRATORS_DOCKER_CE
                .required(ApiVersion::V20170701, "DockerCE")
                .unwrap(),
            OrchestratorType::SwarmMode
        );
    }

    #[test]
    fn test_unsupported_value() {
        let err = ORCHESTRATORS_V20160330
            .to_canonical(ApiVersion::V20160330, "Kubernetes")
            .unwrap_err();
        assert!(matches!(
            err,
            crate::versions::error::Error::UnsupportedValue { ref value, .. } if value == "Kubernetes"
        ));
        assert!(NETWORK_PLUGINS_V20180331
            .to_canonical(ApiVersion::V20180331, "flannel")
            .is_err());
    }

    #[test]
    fn test_unrepresentable_value_written_as_absent() {
        assert_eq!(
            ORCHESTRATORS_V20160930.to_versioned(Some(OrchestratorType::SwarmMode)),
            ""
        );
        assert_eq!(
            ORCHESTRATORS_DOCKER_CE.to_versioned(Some(OrchestratorType::SwarmMode)),
            "DockerCE"
        );
    }
}
