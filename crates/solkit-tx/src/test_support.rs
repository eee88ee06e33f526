//! Shared fixtures for the in-crate tests: offline mock RPC connections and
//! pre-signed transactions.

use serde_json::{json, Value};
use solana_client::{rpc_client::RpcClient, rpc_request::RpcRequest};
use solana_sdk::{
    hash::Hash, signature::Keypair, signer::Signer, system_instruction, transaction::Transaction,
};
use std::sync::Arc;

pub fn signed_legacy_tx(payer: &Keypair) -> Transaction {
    let ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);
    let mut tx = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
    tx.try_sign(&[payer], Hash::new_unique()).unwrap();
    tx
}

/// One-shot mock response for `getLatestBlockhash`.
pub fn blockhash_mock(last_valid_block_height: u64) -> (RpcRequest, Value) {
    (
        RpcRequest::GetLatestBlockhash,
        json!({
            "context": { "slot": 1 },
            "value": {
                "blockhash": Hash::new_unique().to_string(),
                "lastValidBlockHeight": last_valid_block_height,
            }
        }),
    )
}

/// An `RpcClient` that never touches the network; `mocks` are consumed one
/// response per request kind.
pub fn mock_connection(mocks: Vec<(RpcRequest, Value)>) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_mock_with_mocks(
        "succeeds".to_string(),
        mocks.into_iter().collect(),
    ))
}
