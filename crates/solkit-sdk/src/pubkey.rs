use crate::{SdkError, SdkResult};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Coerce a pubkey given in any of the shapes callers actually hold:
/// a base58 string, or a JSON byte-array string (`"[12, 34, ...]"`, the
/// format the Solana CLI writes).
///
/// For raw `[u8; 32]`/`&[u8]` material use `Pubkey::try_from` directly;
/// this function only deals with the stringly inputs.
pub fn make_pubkey(input: &str) -> SdkResult<Pubkey> {
    let input = input.trim();

    if let Ok(pubkey) = Pubkey::from_str(input) {
        return Ok(pubkey);
    }

    // JSON byte-array fallback.
    if let Ok(bytes) = serde_json::from_str::<Vec<u8>>(input) {
        return Pubkey::try_from(bytes.as_slice())
            .map_err(|_| SdkError::InvalidPubkey(format!("expected 32 bytes, got {}", bytes.len())));
    }

    Err(SdkError::InvalidPubkey(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    #[test]
    fn test_base58_string() {
        let pubkey = make_pubkey(USDC).unwrap();
        assert_eq!(pubkey.to_string(), USDC);
    }

    #[test]
    fn test_json_byte_array_string() {
        let expected = Pubkey::new_unique();
        let json = serde_json::to_string(&expected.to_bytes().to_vec()).unwrap();
        assert_eq!(make_pubkey(&json).unwrap(), expected);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let pubkey = make_pubkey(&format!("  {USDC}\n")).unwrap();
        assert_eq!(pubkey.to_string(), USDC);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            make_pubkey("not a pubkey at all"),
            Err(SdkError::InvalidPubkey(_))
        ));
    }

    #[test]
    fn test_wrong_length_byte_array_is_rejected() {
        assert!(matches!(
            make_pubkey("[1, 2, 3]"),
            Err(SdkError::InvalidPubkey(_))
        ));
    }
}
