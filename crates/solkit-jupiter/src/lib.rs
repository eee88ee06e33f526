/*!
# solkit-jupiter

Blocking client for the Jupiter v6 quote/swap HTTP API. Quotes resolve
token decimals through the [`solkit_client`] token cache; the swap endpoint
returns a base64 transaction that feeds straight into
[`SolkitTx::from_base64`](solkit_tx::SolkitTx::from_base64) with automatic
encoding detection.

Route failures ("no route found" and friends) are soft: the calls return
`Ok(None)` and log, because a missing route over one token pair should not
abort a batch operation over many.
*/

mod client;
mod error;
mod params;
mod selloff;

pub use client::{JupiterClient, TokenAmount, QUOTE_API_URL};
pub use error::{JupiterError, JupiterResult};
pub use params::{PrioritizationFee, SwapMode, SwapParams};
pub use selloff::TokenSelloff;
