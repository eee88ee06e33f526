use crate::{ImportMode, RawTransaction, TxError, TxParams, TxResult};
use solana_client::{
    rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcTransactionConfig},
};
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    instruction::Instruction,
    message::{v0, Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::{Transaction, VersionedTransaction},
};
use solana_transaction_status::{EncodedTransactionWithStatusMeta, UiTransactionEncoding};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Outcome of a transaction's lifecycle. `Pending` is the only non-terminal
/// state; every other value ends the lifecycle and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// Not (yet) processed.
    Pending,
    /// The wall-clock budget ran out; the transaction MAY still have landed.
    Timeout,
    /// Confirmed on chain with an error.
    Fail,
    /// Confirmed on chain without error.
    Success,
}

impl TxStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TxStatus::Pending)
    }
}

/// A single transaction driven through build → sign → send → confirm.
///
/// The instance is operated by one logical owner; all mutation happens
/// through `&mut self`. `send` and `confirm` are idempotent once the status
/// is terminal, and the cached confirmation record is fetched at most once.
pub struct SolkitTx {
    connection: Arc<RpcClient>,
    payer: Keypair,
    signers: Vec<Keypair>,
    params: TxParams,
    raw_tx: Option<RawTransaction>,
    confirmed_tx: Option<EncodedTransactionWithStatusMeta>,
    confirmed_result: TxStatus,
    sent_at: Option<Instant>,
    txid: Option<Signature>,
    last_valid_block_height: Option<u64>,
}

impl SolkitTx {
    pub fn new(connection: Arc<RpcClient>, payer: Keypair, params: TxParams) -> Self {
        let signers = vec![payer.insecure_clone()];
        Self {
            connection,
            payer,
            signers,
            params,
            raw_tx: None,
            confirmed_tx: None,
            confirmed_result: TxStatus::Pending,
            sent_at: None,
            txid: None,
            last_valid_block_height: None,
        }
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn status(&self) -> TxStatus {
        self.confirmed_result
    }

    pub fn txid(&self) -> Option<Signature> {
        self.txid
    }

    pub fn params(&self) -> &TxParams {
        &self.params
    }

    pub fn set_params(&mut self, params: TxParams) -> &mut Self {
        self.params = params;
        self
    }

    /// The raw transaction, once one of the `from_*` builders has run.
    pub fn raw_transaction(&self) -> Option<&RawTransaction> {
        self.raw_tx.as_ref()
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Compile a legacy transaction from `instructions`, fetching a fresh
    /// blockhash at the configured blockhash commitment. The first signer
    /// (after an optional signer-set replacement) becomes the fee payer.
    ///
    /// An empty instruction list is allowed and produces a minimal
    /// transaction.
    pub fn from_instructions_legacy(
        &mut self,
        instructions: &[Instruction],
        signers: Option<Vec<Keypair>>,
    ) -> TxResult<&mut Self> {
        if self.raw_tx.is_some() {
            return Err(TxError::AlreadyBuilt);
        }
        if let Some(signers) = signers {
            self.signers = signers;
        }

        let (blockhash, _) = self
            .connection
            .get_latest_blockhash_with_commitment(self.params.blockhash_commitment)?;

        let fee_payer = self
            .signers
            .first()
            .map(|k| k.pubkey())
            .unwrap_or_else(|| self.payer.pubkey());
        let message = Message::new_with_blockhash(instructions, Some(&fee_payer), &blockhash);
        self.raw_tx = Some(RawTransaction::Legacy(Transaction::new_unsigned(message)));
        Ok(self)
    }

    /// Compile and sign a versioned (v0) transaction from `instructions`,
    /// optionally compressing account references through address lookup
    /// tables. The payer is fixed here and cannot change on re-sign.
    pub fn from_instructions_versioned(
        &mut self,
        instructions: &[Instruction],
        signers: Option<Vec<Keypair>>,
        lookup_tables: &[AddressLookupTableAccount],
    ) -> TxResult<&mut Self> {
        if self.raw_tx.is_some() {
            return Err(TxError::AlreadyBuilt);
        }
        if let Some(signers) = signers {
            self.signers = signers;
        }

        let (blockhash, _) = self
            .connection
            .get_latest_blockhash_with_commitment(self.params.blockhash_commitment)?;

        let message =
            v0::Message::try_compile(&self.payer.pubkey(), instructions, lookup_tables, blockhash)?;
        let signer_refs = self.effective_signers();
        let tx = VersionedTransaction::try_new(VersionedMessage::V0(message), &signer_refs)?;
        self.raw_tx = Some(RawTransaction::Versioned(tx));
        Ok(self)
    }

    /// Import a previously-serialized transaction of possibly unknown
    /// encoding (e.g. returned by an external swap service).
    pub fn from_bytes(&mut self, bytes: &[u8], mode: ImportMode) -> TxResult<&mut Self> {
        if self.raw_tx.is_some() {
            return Err(TxError::AlreadyBuilt);
        }
        self.raw_tx = Some(RawTransaction::from_bytes(bytes, mode)?);
        Ok(self)
    }

    /// [`from_bytes`](Self::from_bytes) over a base64 payload.
    pub fn from_base64(&mut self, encoded: &str, mode: ImportMode) -> TxResult<&mut Self> {
        if self.raw_tx.is_some() {
            return Err(TxError::AlreadyBuilt);
        }
        self.raw_tx = Some(RawTransaction::from_base64(encoded, mode)?);
        Ok(self)
    }

    /// Serialized transaction bytes.
    pub fn to_bytes(&self) -> TxResult<Vec<u8>> {
        self.raw_tx.as_ref().ok_or(TxError::NotBuilt)?.to_bytes()
    }

    /// Base64 encoding of the serialized transaction.
    pub fn encode(&self) -> TxResult<String> {
        self.raw_tx.as_ref().ok_or(TxError::NotBuilt)?.to_base64()
    }

    // ========================================================================
    // Signing
    // ========================================================================

    /// Apply the given signer set, or the stored one when `None`. Re-signing
    /// is destructive: prior signatures are replaced wholesale.
    ///
    /// For the legacy encoding the fee payer was fixed when the message was
    /// compiled; the signer set must cover the message's required signers.
    /// For the versioned encoding the signer set must match the message's
    /// expected signers exactly or the send will be rejected later.
    pub fn sign(&mut self, signers: Option<Vec<Keypair>>) -> TxResult<&mut Self> {
        if let Some(signers) = signers {
            if signers.is_empty() {
                return Err(TxError::NoSigners);
            }
            self.signers = signers;
        }
        let Some(raw_tx) = self.raw_tx.as_mut() else {
            return Err(TxError::NotBuilt);
        };
        let signer_refs: Vec<&Keypair> = if self.signers.is_empty() {
            vec![&self.payer]
        } else {
            self.signers.iter().collect()
        };

        match raw_tx {
            RawTransaction::Legacy(tx) => {
                let blockhash = tx.message.recent_blockhash;
                tx.try_sign(&signer_refs, blockhash)?;
            }
            RawTransaction::Versioned(tx) => {
                *tx = VersionedTransaction::try_new(tx.message.clone(), &signer_refs)?;
            }
        }
        Ok(self)
    }

    /// The stored signer set, falling back to the payer alone.
    fn effective_signers(&self) -> Vec<&Keypair> {
        if self.signers.is_empty() {
            return vec![&self.payer];
        }
        self.signers.iter().collect()
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Send through the primary connection. No-op once the status is
    /// terminal; transport failures are logged and left for the next poll.
    pub fn send(&mut self) -> TxResult<&mut Self> {
        let connection = Arc::clone(&self.connection);
        self.send_with(&connection)
    }

    /// Fan-out send: run the send procedure once per endpoint. Confirmation
    /// still happens only against the primary connection.
    pub fn send_to(&mut self, endpoints: &[Arc<RpcClient>]) -> TxResult<&mut Self> {
        for connection in endpoints {
            self.send_with(connection)?;
        }
        Ok(self)
    }

    fn send_with(&mut self, connection: &RpcClient) -> TxResult<&mut Self> {
        match self.send_internal(connection) {
            Ok(()) => Ok(self),
            Err(TxError::Rpc(e)) => {
                warn!(error = %e, "transient RPC failure during send; still pending");
                Ok(self)
            }
            Err(e) => Err(e),
        }
    }

    fn send_internal(&mut self, connection: &RpcClient) -> TxResult<()> {
        if self.confirmed_result.is_terminal() {
            return Ok(());
        }
        // Input validation happens before any network call.
        if self.raw_tx.is_none() {
            return Err(TxError::NotBuilt);
        }

        if self.sent_at.is_none() {
            self.sent_at = Some(Instant::now());
        }

        if self.last_valid_block_height.is_none() {
            let (_, last_valid) = connection
                .get_latest_blockhash_with_commitment(self.params.blockhash_commitment)?;
            self.last_valid_block_height = Some(last_valid);
        }

        if let Some(max_seconds) = self.params.max_seconds_per_tx {
            let elapsed = self.sent_at.map(|at| at.elapsed().as_secs()).unwrap_or(0);
            if elapsed >= max_seconds {
                self.confirmed_result = TxStatus::Timeout;
                info!(txid = ?self.txid, "TIMEOUT: https://solscan.io/tx/{}", self.txid_display());
                return Ok(());
            }
        }

        let block_height = connection.get_block_height()?;
        let last_valid = self.last_valid_block_height.unwrap_or(0);
        if block_height < last_valid {
            debug!(
                block_height,
                last_valid,
                remaining = last_valid - block_height,
                "sending raw transaction"
            );
            let config = RpcSendTransactionConfig {
                skip_preflight: self.params.skip_preflight,
                preflight_commitment: Some(self.params.transaction_commitment.commitment),
                encoding: None,
                max_retries: Some(self.params.max_retries),
                min_context_slot: None,
            };
            let signature = match self.raw_tx.as_ref() {
                Some(RawTransaction::Legacy(tx)) => {
                    connection.send_transaction_with_config(tx, config)?
                }
                Some(RawTransaction::Versioned(tx)) => {
                    connection.send_transaction_with_config(tx, config)?
                }
                None => return Err(TxError::NotBuilt),
            };
            match self.txid {
                None => self.txid = Some(signature),
                // A signed payload has a deterministic signature; divergence
                // means an endpoint is misbehaving. Keep the first.
                Some(existing) if existing != signature => warn!(
                    %existing, %signature,
                    "endpoint returned a divergent transaction id; keeping the first"
                ),
                Some(_) => {}
            }
        }

        Ok(())
    }

    // ========================================================================
    // Confirmation
    // ========================================================================

    /// Poll the confirmation status once.
    ///
    /// Returns the cached result when terminal, `Pending` before any send
    /// landed a transaction id, and otherwise derives the status from the
    /// confirmation record — fetched from the network at most once. RPC
    /// failures are logged and reported as `Pending`.
    pub fn confirm(&mut self) -> TxStatus {
        if self.confirmed_result.is_terminal() {
            return self.confirmed_result;
        }
        let Some(txid) = self.txid else {
            return TxStatus::Pending;
        };

        if let Some(confirmed) = &self.confirmed_tx {
            let on_chain_err = confirmed.meta.as_ref().and_then(|meta| meta.err.clone());
            self.confirmed_result = match on_chain_err {
                None => TxStatus::Success,
                Some(_) => TxStatus::Fail,
            };
            info!(status = ?self.confirmed_result, "https://solscan.io/tx/{txid}");
            return self.confirmed_result;
        }

        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(self.params.transaction_commitment),
            max_supported_transaction_version: Some(0),
        };
        match self.connection.get_transaction_with_config(&txid, config) {
            Ok(confirmed) => {
                self.confirmed_tx = Some(confirmed.transaction);
                // Second pass derives the status from the now-cached record.
                self.confirm()
            }
            Err(e) => {
                error!(error = %e, %txid, "confirmation query failed; still pending");
                self.confirmed_result
            }
        }
    }

    /// Loop `send` + `confirm` until a terminal status, sleeping
    /// `sleep_between_retry` between pending polls. The only blocking entry
    /// point; everything else is single-shot.
    pub fn send_and_wait(&mut self, endpoints: Option<&[Arc<RpcClient>]>) -> TxResult<TxStatus> {
        loop {
            match endpoints {
                Some(endpoints) => self.send_to(endpoints)?,
                None => self.send()?,
            };

            let status = self.confirm();
            if status.is_terminal() {
                return Ok(status);
            }

            if !self.params.sleep_between_retry.is_zero() {
                std::thread::sleep(self.params.sleep_between_retry);
            }
        }
    }

    fn txid_display(&self) -> String {
        self.txid
            .map(|sig| sig.to_string())
            .unwrap_or_else(|| "<unsent>".to_string())
    }
}
