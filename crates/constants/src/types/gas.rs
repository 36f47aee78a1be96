/// Gas limit selection for settlement transactions.
///
/// An estimate is clamped to `cap` when one is set. When estimation fails the
/// `fallback` value is used instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct GasPolicy {
    /// Upper bound on the gas limit, usually the node's per-transaction cap.
    cap: Option<u64>,
    /// Gas limit used when estimation fails.
    fallback: u64,
}

impl GasPolicy {
    /// Per-transaction gas cap enforced by most RPC nodes (`0x1000000`).
    pub const NODE_GAS_CAP: u64 = 16_777_216;

    /// Fallback gas limit for `execute` when estimation fails.
    pub const SETTLEMENT_FALLBACK: u64 = 10_000_000;

    /// Fallback gas limit for a Permit2 `permit` submission.
    pub const PERMIT_FALLBACK: u64 = 200_000;

    /// Create a new gas policy.
    pub const fn new(cap: Option<u64>, fallback: u64) -> Self {
        Self { cap, fallback }
    }

    /// Policy for settler `execute` calls.
    pub const fn settlement() -> Self {
        Self::new(Some(Self::NODE_GAS_CAP), Self::SETTLEMENT_FALLBACK)
    }

    /// Policy for Permit2 `permit` calls. Estimates are used as-is.
    pub const fn permit() -> Self {
        Self::new(None, Self::PERMIT_FALLBACK)
    }

    /// Get the cap.
    pub const fn cap(&self) -> Option<u64> {
        self.cap
    }

    /// Get the fallback.
    pub const fn fallback(&self) -> u64 {
        self.fallback
    }

    /// Select the gas limit for a transaction given the estimation result.
    pub const fn gas_limit(&self, estimate: Option<u64>) -> u64 {
        match (estimate, self.cap) {
            (Some(gas), Some(cap)) if gas > cap => cap,
            (Some(gas), _) => gas,
            (None, _) => self.fallback,
        }
    }
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self::settlement()
    }
}
