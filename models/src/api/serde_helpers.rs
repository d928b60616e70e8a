//! Field attribute helpers shared by the canonical and versioned shapes.
//!
//! The historical wire formats omit zero values and write unset enumerations as the empty string,
//! so both spellings of "absent" have to be accepted on input.
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Deserializes an optional closed enumeration, treating `""` and `null` as absent.
///
/// Unknown non-empty values are still an error.
pub(crate) mod optional_enum {
    use super::*;

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => serde_plain::from_str(value).map(Some).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StorageProfile;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Holder {
        #[serde(default, deserialize_with = "optional_enum::deserialize")]
        storage: Option<StorageProfile>,
    }

    #[test]
    fn test_optional_enum_absent_spellings() {
        for doc in [json!({}), json!({"storage": ""}), json!({"storage": null})] {
            let holder: Holder = serde_json::from_value(doc).unwrap();
            assert_eq!(holder.storage, None);
        }

        let holder: Holder = serde_json::from_value(json!({"storage": "ManagedDisks"})).unwrap();
        assert_eq!(holder.storage, Some(StorageProfile::ManagedDisks));

        assert!(serde_json::from_value::<Holder>(json!({"storage": "Floppy"})).is_err());
    }

    #[test]
    fn test_zero_predicates() {
        assert!(is_zero(&0i32));
        assert!(!is_zero(&3u16));
        assert!(is_zero(&0.0f64));
        assert!(is_false(&false));
    }
}
