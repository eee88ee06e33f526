use solana_sdk::pubkey::Pubkey;
use solkit_batcher::CallbackError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("transaction error: {0}")]
    Tx(#[from] solkit_tx::TxError),

    #[error("input error: {0}")]
    Sdk(#[from] solkit_sdk::SdkError),

    #[error("token cache has not been initialized; call TokenCache::initialize first")]
    CacheUninitialized,

    #[error("token cache is already initialized")]
    CacheAlreadyInitialized,

    #[error("token cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("token cache serialization error: {0}")]
    CacheSerde(#[from] serde_json::Error),

    #[error("invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("account {account} is owned by {actual}, expected {expected}")]
    AccountOwnerMismatch {
        account: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },
}

impl From<ClientError> for CallbackError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rpc(rpc) => CallbackError::Rpc(rpc),
            other => CallbackError::other(other),
        }
    }
}
