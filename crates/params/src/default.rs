//! Default values for the module parameters.

/// Identifier of the daily epoch driving rate updates and delegation.
pub const DAY_EPOCH: &str = "day";

/// Identifier of the hourly epoch driving completion marking and claim distribution.
pub const HOUR_EPOCH: &str = "hour";

/// Identifier of the epoch on which collected fees are liquid staked.
pub const MINT_EPOCH: &str = "mint";

/// Number of day epochs between two freezes of the accumulating unbonding record.
pub const UNDELEGATION_FREQUENCY: u64 = 4;

/// Smallest native amount accepted by a liquid stake.
pub const MIN_LIQUID_STAKE_AMOUNT: u128 = 100_000;

/// Smallest stToken amount accepted by a redemption.
pub const MIN_REDEEM_AMOUNT: u128 = 100_000;

/// Page size used when a paginated query does not specify one.
pub const DEFAULT_PAGE_LIMIT: u64 = 50;

/// Largest page size a paginated query may request.
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Human readable prefix of local account addresses.
pub const ADDRESS_PREFIX: &str = "stride";

/// Port used for token transfers.
pub const TRANSFER_PORT: &str = "transfer";

/// Name of this module's account, used to mint and burn stTokens.
pub const MODULE_ACCOUNT: &str = "stzone";

/// Name of the module account that collects protocol fees in stTokens.
pub const FEE_COLLECTOR_MODULE: &str = "fee_collector";

/// Buffer added to the unbonding period when estimating the completion of a record that has not
/// been undelegated yet.
pub const UNBONDING_ESTIMATE_BUFFER_SECONDS: u64 = 4 * 24 * 60 * 60; // 4 days
