use crate::{ClientError, ClientResult, TokenCache, TokenCacheEntry};
use solana_client::{
    client_error::ClientErrorKind,
    rpc_client::RpcClient,
    rpc_request::{RpcError, TokenAccountsFilter},
};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair};
use solkit_sdk::{get_ata, get_or_create_ata_ix};
use solkit_tx::{wait_for_batch, SolkitTx, TxParams};
use std::str::FromStr;
use std::sync::Arc;

/// Creating an ATA costs 138 bytes per instruction against the 1232-byte
/// packet limit, leaving room for 7 creations per transaction.
const ATA_CREATES_PER_TX: usize = 7;

/// Per-mint convenience handle: balances, associated token accounts, and
/// the cached mint metadata behind them.
pub struct SolkitToken {
    connection: Arc<RpcClient>,
    pub token_mint: Pubkey,
    pub token_info: TokenCacheEntry,
}

impl SolkitToken {
    /// Resolves mint metadata through the token cache (network on a miss).
    pub fn new(connection: Arc<RpcClient>, token_mint: Pubkey) -> ClientResult<Self> {
        let token_info = TokenCache::get(&connection, &token_mint)?;
        Ok(Self {
            connection,
            token_mint,
            token_info,
        })
    }

    pub fn account_exists(&self, account_address: &Pubkey) -> ClientResult<bool> {
        let account = self
            .connection
            .get_account_with_commitment(account_address, self.connection.commitment())?
            .value;
        Ok(account.is_some())
    }

    /// Raw token balance of a token account; a missing account reads as 0.
    pub fn get_account_balance_lamports(&self, account_address: &Pubkey) -> ClientResult<u64> {
        let balance = match self.connection.get_token_account_balance(account_address) {
            Ok(balance) => balance,
            // The node answers with an RPC-level error for absent accounts.
            Err(solana_client::client_error::ClientError {
                kind: ClientErrorKind::RpcError(RpcError::RpcResponseError { .. }),
                ..
            }) => return Ok(0),
            Err(e) => return Err(ClientError::Rpc(e)),
        };
        balance
            .amount
            .parse::<u64>()
            .map_err(|e| ClientError::InvalidAccountData(format!("token amount: {e}")))
    }

    /// UI-scaled balance of a token account.
    pub fn get_account_balance(&self, account_address: &Pubkey) -> ClientResult<f64> {
        let lamports = self.get_account_balance_lamports(account_address)?;
        Ok(lamports as f64 / 10f64.powi(self.token_info.decimals as i32))
    }

    pub fn get_wallet_ata(&self, wallet_address: &Pubkey) -> Pubkey {
        get_ata(&self.token_mint, wallet_address)
    }

    /// Ensure one wallet's ATA exists, sending a creation transaction when
    /// needed. Returns the ATA address either way.
    pub fn create_wallet_ata(
        &self,
        wallet_address: &Pubkey,
        payer: &Keypair,
        params: &TxParams,
    ) -> ClientResult<Pubkey> {
        let ata = get_or_create_ata_ix(&self.connection, &self.token_mint, wallet_address, None, true)?;
        let Some(create_ix) = ata.ix else {
            return Ok(ata.pubkey);
        };

        let mut tx = SolkitTx::new(
            Arc::clone(&self.connection),
            payer.insecure_clone(),
            params.clone(),
        );
        tx.from_instructions_legacy(&[create_ix], None)?
            .sign(None)?
            .send_and_wait(None)?;
        Ok(ata.pubkey)
    }

    /// Ensure the ATAs of many wallets exist, packing the needed creation
    /// instructions [`ATA_CREATES_PER_TX`] per transaction and driving the
    /// resulting batch to terminal statuses. Returns every ATA address,
    /// index-aligned with `wallet_addresses`.
    pub fn create_wallet_ata_batch(
        &self,
        wallet_addresses: &[Pubkey],
        payer: &Keypair,
        params: &TxParams,
    ) -> ClientResult<Vec<Pubkey>> {
        let mut needed: Vec<Instruction> = Vec::new();
        let mut ata_addresses = Vec::with_capacity(wallet_addresses.len());
        for wallet in wallet_addresses {
            let ata = get_or_create_ata_ix(&self.connection, &self.token_mint, wallet, None, true)?;
            ata_addresses.push(ata.pubkey);
            if let Some(create_ix) = ata.ix {
                needed.push(create_ix);
            }
        }

        let mut transactions = Vec::new();
        for chunk in needed.chunks(ATA_CREATES_PER_TX) {
            let mut tx = SolkitTx::new(
                Arc::clone(&self.connection),
                payer.insecure_clone(),
                params.clone(),
            );
            tx.from_instructions_legacy(chunk, None)?.sign(None)?;
            transactions.push(tx);
        }
        wait_for_batch(&mut transactions, params)?;

        Ok(ata_addresses)
    }

    /// Addresses of every token account this wallet holds for the mint.
    pub fn get_wallet_account_addresses(
        &self,
        wallet_address: &Pubkey,
    ) -> ClientResult<Vec<Pubkey>> {
        let accounts = self.connection.get_token_accounts_by_owner(
            wallet_address,
            TokenAccountsFilter::Mint(self.token_mint),
        )?;
        accounts
            .iter()
            .map(|keyed| {
                Pubkey::from_str(&keyed.pubkey)
                    .map_err(|e| ClientError::InvalidAccountData(format!("account key: {e}")))
            })
            .collect()
    }

    /// Raw balance of the wallet's associated token account.
    pub fn get_wallet_balance_lamports(&self, wallet_address: &Pubkey) -> ClientResult<u64> {
        let ata = self.get_wallet_ata(wallet_address);
        self.get_account_balance_lamports(&ata)
    }

    /// UI-scaled balance of the wallet's associated token account.
    pub fn get_wallet_balance(&self, wallet_address: &Pubkey) -> ClientResult<f64> {
        let ata = self.get_wallet_ata(wallet_address);
        self.get_account_balance(&ata)
    }
}
