/*!
# solkit-tx

Blocking Solana transaction lifecycle for the solkit workspace: build a
transaction from instructions or imported bytes, manage the signer set, send
to one or many endpoints, and poll for confirmation until a terminal status.

## Quick start

```rust,no_run
use solkit_tx::{SolkitTx, TxParams};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, system_instruction};
use solana_sdk::signer::Signer;
use std::sync::Arc;

# fn example() -> Result<(), solkit_tx::TxError> {
let connection = Arc::new(RpcClient::new("https://api.mainnet-beta.solana.com".to_string()));
let payer = Keypair::new();
let transfer = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);

let mut tx = SolkitTx::new(connection, payer, TxParams::default());
let status = tx
    .from_instructions_legacy(&[transfer], None)?
    .sign(None)?
    .send_and_wait(None)?;
println!("landed: {status:?}");
# Ok(())
# }
```

Sending never escalates transport hiccups: RPC failures during `send` and
`confirm` are logged and treated as "still pending", and only the wall-clock
budget in [`TxParams`] moves a transaction to `Timeout`. A batch of
transactions can be driven to completion with [`wait_for_batch`].
*/

mod batch;
mod config;
mod error;
mod raw;
#[cfg(test)]
mod test_support;
mod tx;

pub use batch::wait_for_batch;
pub use config::TxParams;
pub use error::{TxError, TxResult};
pub use raw::{ImportMode, RawTransaction};
pub use tx::{SolkitTx, TxStatus};

// Re-export key Solana types for convenience
pub use solana_client::rpc_client::RpcClient;
pub use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::{Transaction, VersionedTransaction},
};
