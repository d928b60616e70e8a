use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::OnceLock;

const CLUSTER_ID_LENGTH: usize = 8;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// The memoized 8-digit identifier of a cluster.
///
/// The cell is written at most once. Callers racing on the first computation block until the
/// winner has stored its value and then all observe that value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterId(OnceLock<String>);

impl ClusterId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        let cell = OnceLock::new();
        let value = value.into();
        if !value.is_empty() {
            let _ = cell.set(value);
        }
        Self(cell)
    }

    pub fn get(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }

    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_set()
    }

    /// Returns the stored identifier, computing and storing it from `seed` on first access.
    pub fn get_or_derive(&self, seed: &str) -> &str {
        self.0.get_or_init(|| derive_cluster_id(seed.as_bytes()))
    }

    /// Stores an identifier unless one is already present. Returns whether `value` was stored.
    pub fn set(&self, value: String) -> bool {
        self.0.set(value).is_ok()
    }
}

/// 64-bit FNV-1a.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Derives a cluster identifier from a seed string. The result is deterministic for a given seed.
pub(crate) fn derive_cluster_id(seed: &[u8]) -> String {
    let mut rng = StdRng::seed_from_u64(fnv1a_64(seed));
    let value: u32 = rng.gen();
    let mut id = format!("{:08}", value);
    id.truncate(CLUSTER_ID_LENGTH);
    id
}

impl Serialize for ClusterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.get().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for ClusterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(Self::new(raw.unwrap_or_default()))
    }
}
