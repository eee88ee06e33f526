use crate::{TxError, TxResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use solana_sdk::transaction::{Transaction, VersionedTransaction};

/// Decode strategy for imported transaction bytes.
///
/// The two wire encodings carry no explicit tag; `Auto` distinguishes them
/// by decode success, which is how transactions of unknown provenance (e.g.
/// from a swap-quote service) are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    #[default]
    Auto,
    Legacy,
    Versioned,
}

/// The two Solana transaction encodings as a closed variant.
///
/// Every operation matches exhaustively on this enum; there is no trait
/// object anywhere in the lifecycle.
#[derive(Debug, Clone)]
pub enum RawTransaction {
    Legacy(Transaction),
    Versioned(VersionedTransaction),
}

impl RawTransaction {
    /// Decode previously-serialized transaction bytes.
    ///
    /// `Auto` attempts versioned decoding first and falls back to legacy;
    /// when both fail, the legacy-decode error is the one propagated.
    pub fn from_bytes(bytes: &[u8], mode: ImportMode) -> TxResult<Self> {
        match mode {
            ImportMode::Auto => Self::from_bytes(bytes, ImportMode::Versioned)
                .or_else(|_| Self::from_bytes(bytes, ImportMode::Legacy)),
            ImportMode::Legacy => Ok(Self::Legacy(bincode::deserialize(bytes)?)),
            ImportMode::Versioned => Ok(Self::Versioned(bincode::deserialize(bytes)?)),
        }
    }

    pub fn from_base64(encoded: &str, mode: ImportMode) -> TxResult<Self> {
        let bytes = BASE64.decode(encoded.trim())?;
        Self::from_bytes(&bytes, mode)
    }

    pub fn to_bytes(&self) -> TxResult<Vec<u8>> {
        let bytes = match self {
            Self::Legacy(tx) => bincode::serialize(tx)?,
            Self::Versioned(tx) => bincode::serialize(tx)?,
        };
        Ok(bytes)
    }

    pub fn to_base64(&self) -> TxResult<String> {
        Ok(BASE64.encode(self.to_bytes()?))
    }

    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        signature::Keypair,
        signer::Signer,
        system_instruction,
        transaction::Transaction,
    };

    fn legacy_fixture(payer: &Keypair) -> Transaction {
        let ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);
        let mut tx = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
        tx.try_sign(&[payer], Hash::new_unique()).unwrap();
        tx
    }

    fn versioned_fixture(payer: &Keypair) -> VersionedTransaction {
        let ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);
        let message =
            v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::new_unique()).unwrap();
        VersionedTransaction::try_new(VersionedMessage::V0(message), &[payer]).unwrap()
    }

    #[test]
    fn test_legacy_round_trip() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&legacy_fixture(&payer)).unwrap();

        let raw = RawTransaction::from_bytes(&bytes, ImportMode::Legacy).unwrap();
        assert!(!raw.is_versioned());
        assert_eq!(raw.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_versioned_round_trip() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&versioned_fixture(&payer)).unwrap();

        let raw = RawTransaction::from_bytes(&bytes, ImportMode::Versioned).unwrap();
        assert!(raw.is_versioned());
        assert_eq!(raw.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_auto_accepts_both_encodings() {
        let payer = Keypair::new();

        let versioned_bytes = bincode::serialize(&versioned_fixture(&payer)).unwrap();
        let raw = RawTransaction::from_bytes(&versioned_bytes, ImportMode::Auto).unwrap();
        assert_eq!(raw.to_bytes().unwrap(), versioned_bytes);

        let legacy_bytes = bincode::serialize(&legacy_fixture(&payer)).unwrap();
        let raw = RawTransaction::from_bytes(&legacy_bytes, ImportMode::Auto).unwrap();
        assert_eq!(raw.to_bytes().unwrap(), legacy_bytes);
    }

    #[test]
    fn test_base64_round_trip() {
        let payer = Keypair::new();
        let raw = RawTransaction::Versioned(versioned_fixture(&payer));
        let encoded = raw.to_base64().unwrap();

        let decoded = RawTransaction::from_base64(&encoded, ImportMode::Auto).unwrap();
        assert_eq!(decoded.to_bytes().unwrap(), raw.to_bytes().unwrap());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = RawTransaction::from_bytes(&[0xff; 8], ImportMode::Auto);
        assert!(matches!(result, Err(TxError::Decode(_))));
    }

    #[test]
    fn test_bad_base64_is_rejected() {
        let result = RawTransaction::from_base64("!!!not base64!!!", ImportMode::Auto);
        assert!(matches!(result, Err(TxError::Base64(_))));
    }
}
