use crate::models::TokenUsage;

/// Per-token rates in tenths of a micro-cent.
///
/// Keeping the rates integral means the estimate is exact and truncates the
/// same way for every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRates {
    pub input_tenths: u64,
    pub output_tenths: u64,
    pub cache_creation_tenths: u64,
}

// 0.3 micro-cents per input token, 1.5 per output token, cache writes at the input rate
pub const DEFAULT_RATES: TokenRates = TokenRates {
    input_tenths: 3,
    output_tenths: 15,
    cache_creation_tenths: 3,
};

impl TokenRates {
    pub fn estimate_micro_cents(&self, usage: &TokenUsage) -> u64 {
        let tenths = usage
            .input_tokens
            .saturating_mul(self.input_tenths)
            .saturating_add(usage.output_tokens.saturating_mul(self.output_tenths))
            .saturating_add(
                usage
                    .cache_creation_input_tokens
                    .unwrap_or(0)
                    .saturating_mul(self.cache_creation_tenths),
            );
        tenths / 10
    }
}

/// Estimated cost of `usage` in micro-cents at the default rates.
pub fn estimate_cost_micro_cents(usage: &TokenUsage) -> u64 {
    DEFAULT_RATES.estimate_micro_cents(usage)
}
