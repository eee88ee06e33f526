use crate::{JupiterError, JupiterResult, SwapParams};
use serde_json::{json, Value};
use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solkit_client::TokenCache;
use tracing::{debug, warn};

pub const QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6";

/// Quote errors that simply mean "no viable route right now"; soft
/// failures, logged and swallowed.
const NO_ROUTE_ERRORS: [&str; 2] = [
    "Could not find any route",
    "The route plan does not consume all the amount, please lower your amount",
];

/// A token amount given either in raw base units or as a UI amount scaled
/// by the mint's decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenAmount {
    Raw(u64),
    Ui(f64),
}

impl TokenAmount {
    pub fn to_raw(self, decimals: u8) -> u64 {
        match self {
            TokenAmount::Raw(raw) => raw,
            TokenAmount::Ui(amount) => (amount * 10f64.powi(decimals as i32)) as u64,
        }
    }
}

/// Blocking client for the Jupiter v6 quote/swap API.
///
/// The base URL is injectable for tests and self-hosted deployments; the
/// quote and swap payloads stay opaque `serde_json::Value`s — this crate
/// transports them, it does not model Jupiter's route plans.
pub struct JupiterClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Default for JupiterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JupiterClient {
    pub fn new() -> Self {
        Self::with_base_url(QUOTE_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Request a swap quote.
    ///
    /// Mint decimals come from the token cache (chain fetch on a miss), and
    /// `in_amount` is scaled accordingly. Returns `Ok(None)` — with a
    /// warning logged — when no route exists, when the API reports any
    /// other quote error, or when the quoted `outAmount` falls short of
    /// `desired_out_amount`. Transport failures are hard errors.
    pub fn get_swap_quote(
        &self,
        connection: &RpcClient,
        token_from: &Pubkey,
        token_to: &Pubkey,
        in_amount: TokenAmount,
        desired_out_amount: Option<TokenAmount>,
        params: &SwapParams,
    ) -> JupiterResult<Option<Value>> {
        let from = TokenCache::get(connection, token_from)?;
        let to = TokenCache::get(connection, token_to)?;

        let amount = in_amount.to_raw(from.decimals);
        // The API parses booleans as strings; plain JSON booleans are not
        // accepted here.
        let query = [
            ("inputMint", from.token_mint.to_string()),
            ("outputMint", to.token_mint.to_string()),
            ("amount", amount.to_string()),
            ("swapMode", params.swap_mode.as_str().to_string()),
            ("slippageBps", params.slippage_bps.to_string()),
            ("onlyDirectRoutes", params.only_direct_routes.to_string()),
            (
                "asLegacyTransaction",
                params.as_legacy_transaction.to_string(),
            ),
        ];

        let quote: Value = self
            .http
            .get(format!("{}/quote", self.base_url))
            .query(&query)
            .send()?
            .json()?;

        if let Some(error) = quote.get("error").and_then(Value::as_str) {
            if NO_ROUTE_ERRORS.contains(&error) {
                warn!(%token_from, %token_to, "swap quote: NO ROUTES; bailing");
            } else {
                warn!(%token_from, %token_to, "swap quote: UNKNOWN ERROR; bailing");
                warn!("{error}");
            }
            return Ok(None);
        }

        let out_raw = quote
            .get("outAmount")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<u64>().ok())
            .ok_or_else(|| JupiterError::MalformedQuote(quote.to_string()))?;
        let out_amount = out_raw as f64 / 10f64.powi(to.decimals as i32);

        if let Some(desired) = desired_out_amount {
            let desired_raw = desired.to_raw(to.decimals);
            if out_raw < desired_raw {
                warn!(
                    %token_to,
                    desired = desired_raw,
                    quoted = out_raw,
                    "quoted outAmount below the desired amount; bailing"
                );
                return Ok(None);
            }
        }

        debug!(%token_from, %token_to, amount, out_amount, "quote received");
        Ok(Some(quote))
    }

    /// Build the swap transaction for a quote; the result is the base64
    /// payload to import via `SolkitTx::from_base64`. A response without a
    /// `swapTransaction` field is a logged soft failure.
    pub fn get_swap_tx_base64(
        &self,
        wallet_address: &Pubkey,
        quote: &Value,
        params: &SwapParams,
    ) -> JupiterResult<Option<String>> {
        let body = json!({
            "quoteResponse": quote,
            "userPublicKey": wallet_address.to_string(),
            "wrapAndUnwrapSol": params.wrap_and_unwrap_sol,
            "autoMultiplier": params.auto_multiplier,
            "dynamicComputeUnitLimit": params.dynamic_compute_unit_limit,
            "prioritizationFeeLamports": params.prioritization_fee_lamports.to_json(),
        });

        let response: Value = self
            .http
            .post(format!("{}/swap", self.base_url))
            .json(&body)
            .send()?
            .json()?;

        match response.get("swapTransaction").and_then(Value::as_str) {
            Some(encoded) => Ok(Some(encoded.to_string())),
            None => {
                warn!("swap response: {response}");
                warn!("no swapTransaction in response; bailing");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use solkit_client::{TokenCacheEntry, TOKEN_CACHE_VERSION};
    use std::sync::OnceLock;
    use tempfile::TempDir;

    fn init_cache() {
        static DIR: OnceLock<TempDir> = OnceLock::new();
        let dir = DIR.get_or_init(|| tempfile::tempdir().unwrap());
        let _ = TokenCache::initialize(dir.path());
    }

    /// Seed the cache so quote calls never touch the (failing) mock RPC.
    fn seed_mint(decimals: u8) -> Pubkey {
        init_cache();
        let mint = Pubkey::new_unique();
        let entry = TokenCacheEntry {
            version: TOKEN_CACHE_VERSION,
            token_mint: mint,
            mint_authority: None,
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: None,
            program_id: spl_token::id(),
        };
        std::fs::write(
            TokenCache::path_for(&mint).unwrap(),
            serde_json::to_string(&entry).unwrap(),
        )
        .unwrap();
        mint
    }

    fn offline_connection() -> RpcClient {
        RpcClient::new_mock("fails".to_string())
    }

    #[test]
    fn test_quote_scales_amount_and_slippage_into_the_request() {
        let from = seed_mint(9);
        let to = seed_mint(9);
        let mut server = mockito::Server::new();

        let mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".into(), "1000000000".into()),
                Matcher::UrlEncoded("slippageBps".into(), "50".into()),
                Matcher::UrlEncoded("swapMode".into(), "ExactIn".into()),
                Matcher::UrlEncoded("onlyDirectRoutes".into(), "false".into()),
            ]))
            .with_body(json!({ "outAmount": "2000000000" }).to_string())
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let quote = client
            .get_swap_quote(
                &offline_connection(),
                &from,
                &to,
                TokenAmount::Raw(1_000_000_000),
                None,
                &SwapParams::default(),
            )
            .unwrap()
            .expect("quote should come back");

        mock.assert();
        assert_eq!(quote["outAmount"].as_str().unwrap(), "2000000000");
    }

    #[test]
    fn test_no_route_error_is_a_soft_failure() {
        let from = seed_mint(6);
        let to = seed_mint(6);
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_body(json!({ "error": "Could not find any route" }).to_string())
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let quote = client
            .get_swap_quote(
                &offline_connection(),
                &from,
                &to,
                TokenAmount::Ui(1.5),
                None,
                &SwapParams::default(),
            )
            .unwrap();
        assert!(quote.is_none());
    }

    #[test]
    fn test_unknown_error_is_also_soft() {
        let from = seed_mint(6);
        let to = seed_mint(6);
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_body(json!({ "error": "Internal server meltdown" }).to_string())
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let quote = client
            .get_swap_quote(
                &offline_connection(),
                &from,
                &to,
                TokenAmount::Raw(1),
                None,
                &SwapParams::default(),
            )
            .unwrap();
        assert!(quote.is_none());
    }

    #[test]
    fn test_desired_out_amount_gates_the_quote() {
        let from = seed_mint(9);
        // outAmount 2000000000 against 9 decimals = 2.0 UI tokens.
        let to = seed_mint(9);
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_body(json!({ "outAmount": "2000000000" }).to_string())
            .expect_at_least(2)
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let connection = offline_connection();

        let rejected = client
            .get_swap_quote(
                &connection,
                &from,
                &to,
                TokenAmount::Raw(1_000_000_000),
                Some(TokenAmount::Ui(3.0)),
                &SwapParams::default(),
            )
            .unwrap();
        assert!(rejected.is_none());

        let accepted = client
            .get_swap_quote(
                &connection,
                &from,
                &to,
                TokenAmount::Raw(1_000_000_000),
                Some(TokenAmount::Ui(1.5)),
                &SwapParams::default(),
            )
            .unwrap();
        assert!(accepted.is_some());
    }

    #[test]
    fn test_swap_tx_extraction() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/swap")
            .with_body(json!({ "swapTransaction": "AAECAwQ=" }).to_string())
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let tx = client
            .get_swap_tx_base64(&Pubkey::new_unique(), &json!({}), &SwapParams::default())
            .unwrap();
        assert_eq!(tx.as_deref(), Some("AAECAwQ="));
    }

    #[test]
    fn test_swap_without_transaction_is_soft() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/swap")
            .with_body(json!({}).to_string())
            .create();

        let client = JupiterClient::with_base_url(server.url());
        let tx = client
            .get_swap_tx_base64(&Pubkey::new_unique(), &json!({}), &SwapParams::default())
            .unwrap();
        assert!(tx.is_none());
    }
}
