// ops/src/lib.rs
// Library interface shared by the binary and the integration tests.

pub mod addresses;
pub mod amm;
pub mod artifact;
pub mod bindings;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod state;
pub mod strategy;
pub mod token;
pub mod transaction;
pub mod utils;
pub mod verify;

// Public types re-exported for convenience
pub use amm::{QuoteError, Reserves};
pub use artifact::{ArtifactError, BuildInfo, ContractArtifact};
pub use config::{AddressBook, Config};
pub use deploy::Deployment;
pub use diagnostics::Diagnostics;
pub use state::{AppState, OpsClient};
pub use strategy::{MarketPrice, StrategyParams, StrategyStats};
pub use token::TokenHandle;
pub use transaction::TxError;
pub use utils::TokenAmount;
pub use verify::VerifyOutcome;

// END OF FILE: ops/src/lib.rs
