use crate::{JupiterClient, SwapParams, TokenAmount};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, signer::Signer};
use solkit_batcher::{Batcher, CallbackError, ErrorAction};
use solkit_client::{ClientResult, SolkitToken};
use solkit_tx::{ImportMode, SolkitTx, TxParams, TxStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Mass token sell via Jupiter: every wallet in the list swaps its whole
/// balance of one mint into another, `num_threads` wallets at a time.
///
/// Each wallet is retried until its balance reads zero or a swap lands;
/// wallets with no route are abandoned with a warning rather than spinning.
pub struct TokenSelloff {
    connection: Arc<RpcClient>,
    token_to_sell: Arc<SolkitToken>,
    token_to_buy: Arc<SolkitToken>,
    tx_params: TxParams,
    swap_params: SwapParams,
    endpoints_override: Option<Vec<Arc<RpcClient>>>,
    wallets: Vec<Arc<Keypair>>,
    num_threads: usize,
    jupiter: Arc<JupiterClient>,
}

impl TokenSelloff {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection: Arc<RpcClient>,
        wallets: Vec<Arc<Keypair>>,
        token_to_sell: solana_sdk::pubkey::Pubkey,
        token_to_buy: solana_sdk::pubkey::Pubkey,
        tx_params: TxParams,
        swap_params: SwapParams,
        endpoints_override: Option<Vec<Arc<RpcClient>>>,
        num_threads: usize,
    ) -> ClientResult<Self> {
        let token_to_sell = Arc::new(SolkitToken::new(Arc::clone(&connection), token_to_sell)?);
        let token_to_buy = Arc::new(SolkitToken::new(Arc::clone(&connection), token_to_buy)?);
        Ok(Self {
            connection,
            token_to_sell,
            token_to_buy,
            tx_params,
            swap_params,
            endpoints_override,
            wallets,
            num_threads,
            jupiter: Arc::new(JupiterClient::new()),
        })
    }

    /// Point the quote/swap calls at a non-default API deployment.
    pub fn with_jupiter_client(mut self, jupiter: JupiterClient) -> Self {
        self.jupiter = Arc::new(jupiter);
        self
    }

    /// Drain every wallet, blocking until all workers finish.
    pub fn start(
        &self,
        poll_interval: Duration,
        rpc_error_action: ErrorAction,
        other_error_action: ErrorAction,
    ) {
        let connection = Arc::clone(&self.connection);
        let token_to_sell = Arc::clone(&self.token_to_sell);
        let token_to_buy = Arc::clone(&self.token_to_buy);
        let jupiter = Arc::clone(&self.jupiter);
        let tx_params = self.tx_params.clone();
        let swap_params = self.swap_params.clone();
        let endpoints = self.endpoints_override.clone();

        let mut batcher = Batcher::new(
            self.wallets.clone(),
            self.num_threads,
            move |wallet: Arc<Keypair>| -> Result<(), CallbackError> {
                sell_single(
                    &connection,
                    &token_to_sell,
                    &token_to_buy,
                    &jupiter,
                    &tx_params,
                    &swap_params,
                    endpoints.as_deref(),
                    &wallet,
                )
                .map_err(CallbackError::from)
            },
        );
        batcher.start(poll_interval, rpc_error_action, other_error_action);
    }
}

#[allow(clippy::too_many_arguments)]
fn sell_single(
    connection: &Arc<RpcClient>,
    token_to_sell: &SolkitToken,
    token_to_buy: &SolkitToken,
    jupiter: &JupiterClient,
    tx_params: &TxParams,
    swap_params: &SwapParams,
    endpoints: Option<&[Arc<RpcClient>]>,
    wallet: &Keypair,
) -> Result<(), crate::JupiterError> {
    let wallet_address = wallet.pubkey();
    loop {
        let balance = token_to_sell.get_wallet_balance_lamports(&wallet_address)?;
        let divisor = 10f64.powi(token_to_sell.token_info.decimals as i32);
        if balance == 0 {
            info!(wallet = %wallet_address, "balance: 0, skipping...");
            return Ok(());
        }
        info!(
            wallet = %wallet_address,
            balance = balance as f64 / divisor,
            "trying to sell all..."
        );

        let Some(quote) = jupiter.get_swap_quote(
            connection,
            &token_to_sell.token_mint,
            &token_to_buy.token_mint,
            TokenAmount::Raw(balance),
            None,
            swap_params,
        )?
        else {
            warn!(wallet = %wallet_address, "no quote for this wallet; abandoning");
            return Ok(());
        };

        let Some(tx_base64) = jupiter.get_swap_tx_base64(&wallet_address, &quote, swap_params)?
        else {
            warn!(wallet = %wallet_address, "no swap transaction built; abandoning");
            return Ok(());
        };

        let mut tx = SolkitTx::new(
            Arc::clone(connection),
            wallet.insecure_clone(),
            tx_params.clone(),
        );
        tx.from_base64(&tx_base64, ImportMode::Auto)?;
        let status = tx
            .sign(Some(vec![wallet.insecure_clone()]))?
            .send_and_wait(endpoints)?;

        if status == TxStatus::Success {
            return Ok(());
        }
        // Anything short of success re-checks the balance and tries again
        // with a fresh quote.
    }
}
