//! Pinrelay: a single-use order-key relay in front of a JSON pinning service.
//!
//! Re-exports modules needed by the binary and by integration tests in `tests/`.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod pinning;
pub mod registry;

use config::Config;
use pinning::PinningClient;
use registry::KeyRegistry;

/// Shared application state passed to handlers.
pub struct AppState {
    pub registry: KeyRegistry,
    pub pinning: PinningClient,
    pub config: Config,
}
