/*!
# solkit-sdk

Leaf crate of the solkit workspace: coercion of heterogeneous key/address
inputs into canonical [`Pubkey`](solana_sdk::pubkey::Pubkey) /
[`Keypair`](solana_sdk::signature::Keypair) values, stateless instruction
builders for SPL token plumbing (associated token accounts, checked
transfers, SOL wrap/unwrap, compute budget), well-known program addresses,
and the logging bootstrap shared by the rest of the workspace.

Everything here is synchronous and, with the single exception of
[`get_or_create_ata_ix`] (which checks account existence on chain) and the
keypair-file read, free of I/O.
*/

mod constants;
mod error;
mod instructions;
mod keypair;
mod math;
mod pubkey;

pub mod logging;

pub use constants::*;
pub use error::{SdkError, SdkResult};
pub use instructions::{
    compute_budget_ix, compute_price_ix, create_ata_ix, get_ata, get_or_create_ata_ix,
    transfer_token_checked_ix, unwrap_sol_ix, wrap_sol_ixs, AtaInstruction,
};
pub use keypair::make_keypair;
pub use math::divmod_js_bignumber;
pub use pubkey::make_pubkey;

// Re-export the types every caller ends up needing anyway.
pub use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
