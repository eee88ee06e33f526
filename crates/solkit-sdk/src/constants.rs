use solana_sdk::{pubkey, pubkey::Pubkey};

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

pub const SYSVAR_RENT_PUBKEY: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");

pub const SYSVAR_CLOCK_PUBKEY: Pubkey = pubkey!("SysvarC1ock11111111111111111111111111111111");

pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Wrapped native SOL mint owned by the classic token program.
pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// Wrapped native SOL mint owned by the token-2022 program.
pub const NATIVE_MINT_2022: Pubkey = pubkey!("9pan9bMn5HatX4EJdBwg9VgCa7Uz5HL8N1m5D3NdXejP");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_mint_matches_spl_token() {
        assert_eq!(NATIVE_MINT, spl_token::native_mint::id());
    }

    #[test]
    fn test_system_program_matches_sdk() {
        assert_eq!(SYSTEM_PROGRAM_ID, solana_sdk::system_program::id());
    }
}
