/*!
# solkit-client

RPC-consuming conveniences for the solkit workspace: an on-disk token
metadata cache, per-mint token operations (balances, associated token
accounts), wallet send helpers chunked to transaction size limits, batched
account fetching, the clock sysvar, and a multi-threaded wallet balance
scan built on [`solkit_batcher`].

The token cache root must be set explicitly once per process via
[`TokenCache::initialize`] before any cache-backed call; nothing here reads
the environment behind the caller's back.
*/

mod accounts;
mod errors;
mod sysvar;
mod token;
mod token_cache;
mod wallet;
mod wallets_balance;

pub use accounts::{fetch_account, fetch_accounts, ACCOUNT_FETCH_CHUNK_SIZE};
pub use errors::{ClientError, ClientResult};
pub use sysvar::SysvarClock;
pub use token::SolkitToken;
pub use token_cache::{TokenCache, TokenCacheEntry, TOKEN_CACHE_VERSION};
pub use wallet::{SolkitWallet, SolkitWalletReadonly};
pub use wallets_balance::WalletsBalance;

// Re-export key Solana types for convenience
pub use solana_client::rpc_client::RpcClient;
pub use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
