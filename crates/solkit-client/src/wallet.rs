use crate::ClientResult;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    native_token::{sol_to_lamports, LAMPORTS_PER_SOL},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_instruction,
};
use solkit_tx::{wait_for_batch, SolkitTx, TxParams, TxStatus};
use std::sync::Arc;
use tracing::warn;

/// An empty transaction serializes to 168 bytes and each SOL transfer adds
/// 49 against the 1232-byte packet limit; 20 transfers per transaction
/// leaves headroom.
const TRANSFERS_PER_TX: usize = 20;

/// Base fee left behind by `send_lamports_all`.
const FEE_LAMPORTS: u64 = 5_000;

/// Balance queries for a wallet we do not hold keys for.
pub struct SolkitWalletReadonly {
    connection: Arc<RpcClient>,
    pub pubkey: Pubkey,
}

impl SolkitWalletReadonly {
    pub fn new(connection: Arc<RpcClient>, pubkey: Pubkey) -> Self {
        Self { connection, pubkey }
    }

    /// Native balance in lamports; transport failures degrade to 0.
    pub fn get_balance_lamports(&self) -> u64 {
        match self.connection.get_balance(&self.pubkey) {
            Ok(balance) => balance,
            Err(e) => {
                warn!(wallet = %self.pubkey, error = %e, "balance query failed; reporting 0");
                0
            }
        }
    }

    pub fn get_balance_sol(&self) -> f64 {
        self.get_balance_lamports() as f64 / LAMPORTS_PER_SOL as f64
    }
}

/// A wallet we hold the keypair for: balance queries plus native-SOL send
/// helpers chunked to transaction size limits.
pub struct SolkitWallet {
    connection: Arc<RpcClient>,
    keypair: Keypair,
    pub pubkey: Pubkey,
}

impl SolkitWallet {
    pub fn new(connection: Arc<RpcClient>, keypair: Keypair) -> Self {
        let pubkey = keypair.pubkey();
        Self {
            connection,
            keypair,
            pubkey,
        }
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn readonly(&self) -> SolkitWalletReadonly {
        SolkitWalletReadonly::new(Arc::clone(&self.connection), self.pubkey)
    }

    pub fn get_balance_lamports(&self) -> u64 {
        self.readonly().get_balance_lamports()
    }

    pub fn get_balance_sol(&self) -> f64 {
        self.readonly().get_balance_sol()
    }

    /// Send `lamports` to every destination, packing transfers
    /// [`TRANSFERS_PER_TX`] per transaction and driving the batch to
    /// terminal statuses. Returns one status per transaction sent.
    pub fn send_lamports_batch(
        &self,
        destinations: &[Pubkey],
        lamports: u64,
        params: &TxParams,
    ) -> ClientResult<Vec<TxStatus>> {
        let instructions: Vec<_> = destinations
            .iter()
            .map(|destination| system_instruction::transfer(&self.pubkey, destination, lamports))
            .collect();

        let mut transactions = Vec::new();
        for chunk in instructions.chunks(TRANSFERS_PER_TX) {
            let mut tx = SolkitTx::new(
                Arc::clone(&self.connection),
                self.keypair.insecure_clone(),
                params.clone(),
            );
            tx.from_instructions_legacy(chunk, None)?.sign(None)?;
            transactions.push(tx);
        }

        Ok(wait_for_batch(&mut transactions, params)?)
    }

    pub fn send_lamports(
        &self,
        destination: &Pubkey,
        lamports: u64,
        params: &TxParams,
    ) -> ClientResult<TxStatus> {
        let statuses = self.send_lamports_batch(&[*destination], lamports, params)?;
        Ok(statuses.into_iter().next().unwrap_or(TxStatus::Success))
    }

    /// Drain the wallet, leaving only the base fee. An effectively empty
    /// wallet counts as success with nothing sent.
    pub fn send_lamports_all(
        &self,
        destination: &Pubkey,
        params: &TxParams,
    ) -> ClientResult<TxStatus> {
        let balance = self.get_balance_lamports();
        if balance <= FEE_LAMPORTS {
            return Ok(TxStatus::Success);
        }
        self.send_lamports(destination, balance - FEE_LAMPORTS, params)
    }

    pub fn send_sol_batch(
        &self,
        destinations: &[Pubkey],
        amount_sol: f64,
        params: &TxParams,
    ) -> ClientResult<Vec<TxStatus>> {
        self.send_lamports_batch(destinations, sol_to_lamports(amount_sol), params)
    }

    pub fn send_sol(
        &self,
        destination: &Pubkey,
        amount_sol: f64,
        params: &TxParams,
    ) -> ClientResult<TxStatus> {
        self.send_lamports(destination, sol_to_lamports(amount_sol), params)
    }
}
