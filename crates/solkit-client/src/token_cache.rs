use crate::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::Mint;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Schema version of the on-disk entries. Entries written by an older
/// schema are treated as cache misses and refetched.
pub const TOKEN_CACHE_VERSION: u32 = 1;

static CACHE_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Cached mint metadata, one flat JSON file per token mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCacheEntry {
    pub version: u32,
    #[serde(with = "pubkey_string")]
    pub token_mint: Pubkey,
    #[serde(with = "opt_pubkey_string")]
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    #[serde(with = "opt_pubkey_string")]
    pub freeze_authority: Option<Pubkey>,
    #[serde(with = "pubkey_string")]
    pub program_id: Pubkey,
}

/// Flat-file token metadata cache.
///
/// The root directory is explicit process-wide state: callers set it once
/// with [`TokenCache::initialize`]; every cache operation before that fails
/// with [`ClientError::CacheUninitialized`].
pub struct TokenCache;

impl TokenCache {
    /// Set the cache root for this process, creating the directory if
    /// needed. Callable once; a second call fails.
    pub fn initialize(root: impl Into<PathBuf>) -> ClientResult<()> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        CACHE_ROOT
            .set(root)
            .map_err(|_| ClientError::CacheAlreadyInitialized)
    }

    /// The active cache root.
    pub fn root() -> ClientResult<&'static Path> {
        CACHE_ROOT
            .get()
            .map(PathBuf::as_path)
            .ok_or(ClientError::CacheUninitialized)
    }

    /// Path of the cache file backing `token_mint`.
    pub fn path_for(token_mint: &Pubkey) -> ClientResult<PathBuf> {
        Ok(Self::root()?.join(format!("{token_mint}.json")))
    }

    /// Cached entry for `token_mint`, fetching from the chain (and
    /// persisting) on a miss.
    pub fn get(connection: &RpcClient, token_mint: &Pubkey) -> ClientResult<TokenCacheEntry> {
        match load_entry(&Self::path_for(token_mint)?, token_mint) {
            Some(entry) => Ok(entry),
            None => Self::update(connection, token_mint),
        }
    }

    /// Force a refresh from the chain, overwriting any cached entry.
    pub fn update(connection: &RpcClient, token_mint: &Pubkey) -> ClientResult<TokenCacheEntry> {
        let path = Self::path_for(token_mint)?;
        debug!(mint = %token_mint, "loading token info from the chain");

        let account = connection.get_account(token_mint)?;
        if account.data.len() < Mint::LEN {
            return Err(ClientError::InvalidAccountData(format!(
                "mint account {token_mint} holds {} bytes, expected at least {}",
                account.data.len(),
                Mint::LEN
            )));
        }
        // Token-2022 mints carry extensions past the base layout; the base
        // fields always occupy the first `Mint::LEN` bytes.
        let mint = Mint::unpack_from_slice(&account.data[..Mint::LEN])
            .map_err(|e| ClientError::InvalidAccountData(format!("mint {token_mint}: {e}")))?;

        let entry = TokenCacheEntry {
            version: TOKEN_CACHE_VERSION,
            token_mint: *token_mint,
            mint_authority: mint.mint_authority.into(),
            supply: mint.supply,
            decimals: mint.decimals,
            is_initialized: mint.is_initialized,
            freeze_authority: mint.freeze_authority.into(),
            program_id: account.owner,
        };

        let file = fs::File::create(&path)?;
        serde_json::to_writer(file, &entry)?;
        Ok(entry)
    }
}

/// Read an entry from disk. Any miss condition — absent file, unreadable
/// JSON, stale schema version — comes back as `None`.
fn load_entry(path: &Path, token_mint: &Pubkey) -> Option<TokenCacheEntry> {
    debug!(mint = %token_mint, file = %path.display(), "loading token info from file");
    let contents = fs::read_to_string(path).ok()?;
    let entry: TokenCacheEntry = serde_json::from_str(&contents).ok()?;
    if entry.version < TOKEN_CACHE_VERSION {
        debug!(mint = %token_mint, entry.version, "stale cache entry; refetching");
        return None;
    }
    Some(entry)
}

mod pubkey_string {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Pubkey::from_str(&raw).map_err(de::Error::custom)
    }
}

mod opt_pubkey_string {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(
        pubkey: &Option<Pubkey>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match pubkey {
            Some(pubkey) => serializer.serialize_some(&pubkey.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Pubkey>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| Pubkey::from_str(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(mint: Pubkey) -> TokenCacheEntry {
        TokenCacheEntry {
            version: TOKEN_CACHE_VERSION,
            token_mint: mint,
            mint_authority: Some(Pubkey::new_unique()),
            supply: 1_000_000_000,
            decimals: 6,
            is_initialized: true,
            freeze_authority: None,
            program_id: spl_token::id(),
        }
    }

    fn write_entry(dir: &Path, entry: &TokenCacheEntry) -> PathBuf {
        let path = dir.join(format!("{}.json", entry.token_mint));
        fs::write(&path, serde_json::to_string(entry).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_entry_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mint = Pubkey::new_unique();
        let entry = sample_entry(mint);
        let path = write_entry(dir.path(), &entry);

        let loaded = load_entry(&path, &mint).unwrap();
        assert_eq!(loaded.token_mint, entry.token_mint);
        assert_eq!(loaded.mint_authority, entry.mint_authority);
        assert_eq!(loaded.decimals, 6);
        assert_eq!(loaded.freeze_authority, None);
        assert_eq!(loaded.program_id, spl_token::id());
    }

    #[test]
    fn test_entry_json_is_flat_with_base58_pubkeys() {
        let entry = sample_entry(Pubkey::new_unique());
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&entry).unwrap()).unwrap();

        assert_eq!(
            json["token_mint"].as_str().unwrap(),
            entry.token_mint.to_string()
        );
        assert!(json["mint_authority"].is_string());
        assert!(json["freeze_authority"].is_null());
        assert_eq!(json["decimals"].as_u64().unwrap(), 6);
    }

    #[test]
    fn test_stale_version_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mint = Pubkey::new_unique();
        let mut entry = sample_entry(mint);
        entry.version = 0;
        let path = write_entry(dir.path(), &entry);

        assert!(load_entry(&path, &mint).is_none());
    }

    #[test]
    fn test_unreadable_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mint = Pubkey::new_unique();
        let path = dir.path().join(format!("{mint}.json"));
        fs::write(&path, "definitely not json").unwrap();

        assert!(load_entry(&path, &mint).is_none());
        assert!(load_entry(&dir.path().join("absent.json"), &mint).is_none());
    }

    // The process-global root is touched by this test only, keeping the
    // outcome deterministic under the parallel test runner.
    #[test]
    fn test_initialize_is_explicit_and_single_shot() {
        let mint = Pubkey::new_unique();
        assert!(matches!(
            TokenCache::path_for(&mint),
            Err(ClientError::CacheUninitialized)
        ));

        let dir = tempfile::tempdir().unwrap();
        TokenCache::initialize(dir.path()).unwrap();
        assert_eq!(TokenCache::root().unwrap(), dir.path());
        assert!(TokenCache::path_for(&mint)
            .unwrap()
            .ends_with(format!("{mint}.json")));

        assert!(matches!(
            TokenCache::initialize(dir.path()),
            Err(ClientError::CacheAlreadyInitialized)
        ));
    }
}
