//! Denomination helpers.

use sha2::{Digest, Sha256};

/// Prefix of every hashed IBC denomination.
pub const IBC_DENOM_PREFIX: &str = "ibc/";

/// Prefix prepended to the native denom to form the stToken denom.
pub const ST_DENOM_PREFIX: &str = "st";

/// Returns the IBC denomination of `base_denom` received over `port/channel`.
///
/// This is `ibc/` followed by the uppercase hex SHA-256 of the trace path
/// `{port}/{channel}/{base_denom}`.
pub fn ibc_denom(port: &str, channel: &str, base_denom: &str) -> String {
    let trace = format!("{port}/{channel}/{base_denom}");
    let hash = Sha256::digest(trace.as_bytes());

    format!("{IBC_DENOM_PREFIX}{}", hex::encode_upper(hash))
}

/// Returns the stToken denomination for a native denomination.
pub fn st_denom(native_denom: &str) -> String {
    format!("{ST_DENOM_PREFIX}{native_denom}")
}
