use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("invalid pubkey input: {0}")]
    InvalidPubkey(String),

    #[error("invalid keypair input: {0}")]
    InvalidKeypair(String),

    #[error("owner {0} is an off-curve address")]
    OwnerOffCurve(Pubkey),

    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("instruction build failed: {0}")]
    Program(#[from] solana_sdk::program_error::ProgramError),

    #[error("division by zero")]
    DivisionByZero,
}
