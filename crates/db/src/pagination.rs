//! Key-based pagination over a prefix.

use serde::{Deserialize, Serialize};

use crate::{
    errors::DbResult,
    kv::{KvPair, KvStore},
};

/// A request for one page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Continuation key returned by the previous page, relative to the iterated prefix.
    #[serde(default, with = "hex_opt")]
    pub key: Option<Vec<u8>>,
    /// Maximum number of results. The caller substitutes its default when this is `None`.
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Metadata returned alongside a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Key to pass in the next request, `None` on the last page.
    #[serde(with = "hex_opt")]
    pub next_key: Option<Vec<u8>>,
    /// Total number of entries under the prefix.
    pub total: u64,
}

/// Returns up to `limit` pairs under `prefix`, starting at `page.key`.
pub fn paginate<S: KvStore + ?Sized>(
    store: &S,
    prefix: &[u8],
    page: &PageRequest,
    limit: u64,
) -> DbResult<(Vec<KvPair>, PageResponse)> {
    let entries = store.iter_prefix(prefix)?;
    let total = entries.len() as u64;

    let start = page.key.as_ref().map(|key| [prefix, key.as_slice()].concat());
    let mut remaining = entries
        .into_iter()
        .skip_while(|(k, _)| start.as_ref().is_some_and(|start| k < start));

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let page_entries: Vec<KvPair> = remaining.by_ref().take(limit).collect();
    let next_key = remaining
        .next()
        .map(|(k, _)| k[prefix.len()..].to_vec());

    Ok((page_entries, PageResponse { next_key, total }))
}

mod hex_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
