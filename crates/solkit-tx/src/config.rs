use solana_sdk::commitment_config::CommitmentConfig;
use std::time::Duration;

/// Configuration for a transaction's send/confirm loop.
#[derive(Debug, Clone)]
pub struct TxParams {
    /// Wall-clock budget since the first send attempt. `None` disables the
    /// timeout; otherwise must be greater than zero to be meaningful.
    pub max_seconds_per_tx: Option<u64>,

    /// Sleep between `send`/`confirm` iterations while the status is pending.
    pub sleep_between_retry: Duration,

    /// Passed through to the raw send call. The blocking send path never
    /// waits for confirmation itself; confirmation is always the explicit
    /// `confirm` poll loop.
    pub skip_confirmation: bool,

    /// Skip preflight simulation on the raw send call.
    pub skip_preflight: bool,

    /// Low-level resend attempts performed by the RPC node itself.
    pub max_retries: usize,

    /// Commitment used when fetching the recent blockhash and the
    /// last-valid block height.
    pub blockhash_commitment: CommitmentConfig,

    /// Commitment used when fetching the transaction for confirmation.
    pub transaction_commitment: CommitmentConfig,
}

impl Default for TxParams {
    fn default() -> Self {
        Self {
            max_seconds_per_tx: Some(30),
            sleep_between_retry: Duration::from_millis(300),
            skip_confirmation: true,
            skip_preflight: true,
            max_retries: 0,
            blockhash_commitment: CommitmentConfig::finalized(),
            transaction_commitment: CommitmentConfig::confirmed(),
        }
    }
}
