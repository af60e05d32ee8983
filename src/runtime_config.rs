//! # Runtime Configuration Module
//!
//! Coroutine runtime settings loaded from the environment.
//!
//! ### `PRODUCT_SERVICE_STACK_SIZE`
//!
//! Stack size for the coroutines `may_minihttp` runs connections on. Accepts
//! decimal (`16384`) or hexadecimal (`0x4000`). Default: `0x4000` (16 KB).
//!
//! ```bash
//! export PRODUCT_SERVICE_STACK_SIZE=0x8000
//! ```

use std::env;

/// Default coroutine stack size (16 KB)
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal size
fn parse_size(val: &str) -> Option<usize> {
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("PRODUCT_SERVICE_STACK_SIZE")
            .ok()
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        Self { stack_size }
    }

    /// Configure the global `may` runtime
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}
