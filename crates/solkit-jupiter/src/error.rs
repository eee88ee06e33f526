use solkit_batcher::CallbackError;
use solkit_client::ClientError;
use thiserror::Error;

pub type JupiterResult<T> = Result<T, JupiterError>;

#[derive(Error, Debug)]
pub enum JupiterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("client error: {0}")]
    Client(#[from] ClientError),

    #[error("transaction error: {0}")]
    Tx(#[from] solkit_tx::TxError),

    #[error("malformed quote response: {0}")]
    MalformedQuote(String),
}

impl From<JupiterError> for CallbackError {
    fn from(err: JupiterError) -> Self {
        match err {
            JupiterError::Client(ClientError::Rpc(rpc)) => CallbackError::Rpc(rpc),
            other => CallbackError::other(other),
        }
    }
}
