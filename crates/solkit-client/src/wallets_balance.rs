use crate::{ClientResult, SolkitToken};
use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solkit_batcher::{Batcher, CallbackError, ErrorAction};
use solkit_sdk::NATIVE_MINT;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Parallel token balance collection over many wallets.
///
/// One batcher worker per thread claims wallets off the shared queue and
/// records balances into a mutex-guarded map. When the scanned mint is
/// wrapped SOL, native SOL is folded into each wallet's figure.
pub struct WalletsBalance {
    connection: Arc<RpcClient>,
    token: Arc<SolkitToken>,
    wallets: Vec<Pubkey>,
    num_threads: usize,
    results: Arc<Mutex<HashMap<Pubkey, u64>>>,
}

impl WalletsBalance {
    pub fn new(
        connection: Arc<RpcClient>,
        wallets: Vec<Pubkey>,
        token_mint: Pubkey,
        num_threads: usize,
    ) -> ClientResult<Self> {
        let token = Arc::new(SolkitToken::new(Arc::clone(&connection), token_mint)?);
        Ok(Self {
            connection,
            token,
            wallets,
            num_threads,
            results: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Scan every wallet and return the balance map. Blocks until all
    /// workers finish; per-error-class policies behave as in
    /// [`Batcher::start`].
    pub fn start(
        &self,
        poll_interval: Duration,
        rpc_error_action: ErrorAction,
        other_error_action: ErrorAction,
    ) -> HashMap<Pubkey, u64> {
        if let Ok(mut results) = self.results.lock() {
            results.clear();
        }

        let connection = Arc::clone(&self.connection);
        let token = Arc::clone(&self.token);
        let results = Arc::clone(&self.results);
        let mut batcher = Batcher::new(
            self.wallets.clone(),
            self.num_threads,
            move |wallet: Pubkey| -> Result<(), CallbackError> {
                let mut balance = token
                    .get_wallet_balance_lamports(&wallet)
                    .map_err(CallbackError::from)?;

                // Fold plain SOL in when scanning the wrapped-SOL mint.
                if token.token_mint == NATIVE_MINT {
                    balance += connection.get_balance(&wallet)?;
                }

                if let Ok(mut results) = results.lock() {
                    results.insert(wallet, balance);
                }
                Ok(())
            },
        );
        batcher.start(poll_interval, rpc_error_action, other_error_action);

        self.results
            .lock()
            .map(|results| results.clone())
            .unwrap_or_default()
    }

    /// Log the collected balances as a table, with totals.
    pub fn output_pretty(&self, ignore_empty: bool, balance_in_lamports: bool) {
        let divisor = 10f64.powi(self.token.token_info.decimals as i32);
        let results = self
            .results
            .lock()
            .map(|results| results.clone())
            .unwrap_or_default();

        let rule = "-".repeat(2 + 44 + 3 + 32 + 2);
        info!("{rule}");
        info!("| {:<44} | {:<32} |", "WALLET", "BALANCE");
        info!("{rule}");

        let mut total: u64 = 0;
        let mut wallets_full = 0usize;
        let mut wallets_empty = 0usize;
        for (wallet, balance) in &results {
            total += balance;
            if *balance > 0 {
                wallets_full += 1;
            } else {
                wallets_empty += 1;
            }

            if ignore_empty && *balance == 0 {
                continue;
            }
            if balance_in_lamports {
                info!("| {:>44} | {:<32} |", wallet.to_string(), balance);
            } else {
                info!(
                    "| {:>44} | {:<32} |",
                    wallet.to_string(),
                    *balance as f64 / divisor
                );
            }
        }

        info!("{rule}");
        info!("Wallets with balance: {wallets_full}");
        info!("Wallets empty:        {wallets_empty}");
        if balance_in_lamports {
            info!("TOKENS TOTAL (lamports): {total}");
        } else {
            info!("TOKENS TOTAL: {}", total as f64 / divisor);
        }
    }
}
