use crate::{SdkError, SdkResult};
use solana_sdk::signature::{keypair_from_seed_phrase_and_passphrase, read_keypair_file, Keypair};
use std::path::Path;

/// Coerce a keypair from any of the shapes callers actually hold:
/// a JSON byte-array string (the Solana CLI keypair format), a path to a
/// keypair file in that format, or a BIP-39 seed phrase (derived with an
/// empty passphrase).
///
/// Resolution order: JSON string, then file path, then seed phrase. The
/// file read is the only I/O this crate performs outside of
/// [`get_or_create_ata_ix`](crate::get_or_create_ata_ix).
pub fn make_keypair(input: &str) -> SdkResult<Keypair> {
    let input = input.trim();

    if let Ok(bytes) = serde_json::from_str::<Vec<u8>>(input) {
        return Keypair::try_from(bytes.as_slice())
            .map_err(|e| SdkError::InvalidKeypair(format!("bad keypair bytes: {e}")));
    }

    if Path::new(input).is_file() {
        return read_keypair_file(input)
            .map_err(|e| SdkError::InvalidKeypair(format!("keypair file {input}: {e}")));
    }

    keypair_from_seed_phrase_and_passphrase(input, "")
        .map_err(|e| SdkError::InvalidKeypair(format!("seed phrase: {e}")))
}
