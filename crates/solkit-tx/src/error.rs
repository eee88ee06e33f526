use thiserror::Error;

pub type TxResult<T> = Result<T, TxError>;

/// Errors surfaced by the transaction lifecycle.
///
/// Transport failures during `send`/`confirm` polling are deliberately NOT
/// represented here as terminal outcomes — they are logged and retried. The
/// `Rpc` variant only escapes from single-shot operations that must fail
/// fast (building, which fetches a blockhash).
#[derive(Error, Debug)]
pub enum TxError {
    #[error("transaction has not been built yet")]
    NotBuilt,

    #[error("transaction is already populated; it can only be built once")]
    AlreadyBuilt,

    #[error("no signers available to sign the transaction")]
    NoSigners,

    #[error("transaction decode failed: {0}")]
    Decode(#[from] bincode::Error),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("message compile failed: {0}")]
    Compile(#[from] solana_sdk::message::CompileError),

    #[error("signing failed: {0}")]
    Signer(#[from] solana_sdk::signer::SignerError),

    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
}
