use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
}

impl SwapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SwapMode::ExactIn => "ExactIn",
            SwapMode::ExactOut => "ExactOut",
        }
    }
}

/// Priority fee attached to the built swap transaction: Jupiter's automatic
/// estimate or an explicit lamport amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrioritizationFee {
    #[default]
    Auto,
    Lamports(u64),
}

impl PrioritizationFee {
    pub fn to_json(self) -> Value {
        match self {
            PrioritizationFee::Auto => json!("auto"),
            PrioritizationFee::Lamports(lamports) => json!(lamports),
        }
    }
}

/// Quote and swap-build options, passed through to the HTTP API.
#[derive(Debug, Clone)]
pub struct SwapParams {
    // Quote
    pub swap_mode: SwapMode,
    /// 50 = 0.5%
    pub slippage_bps: u16,
    pub only_direct_routes: bool,
    pub as_legacy_transaction: bool,
    // Swap transaction
    /// Multiplier applied to Jupiter's automatic fee estimate.
    pub auto_multiplier: u32,
    pub prioritization_fee_lamports: PrioritizationFee,
    pub wrap_and_unwrap_sol: bool,
    /// Let the API size the compute limit instead of the 1.4M ceiling.
    pub dynamic_compute_unit_limit: bool,
}

impl Default for SwapParams {
    fn default() -> Self {
        Self {
            swap_mode: SwapMode::ExactIn,
            slippage_bps: 50,
            only_direct_routes: false,
            as_legacy_transaction: false,
            auto_multiplier: 1,
            prioritization_fee_lamports: PrioritizationFee::Auto,
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
        }
    }
}
