//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │        SessionState          │  │         ConfigState          │    │
//! │  │                              │  │                              │    │
//! │  │  Arc<Mutex<BillingSession>>  │  │  brand, business profile     │    │
//! │  │  customer + item store       │  │  currency, default GST       │    │
//! │  │  editing / preview view      │  │  output directory            │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • ConfigState: Read-only after loading                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_config_path, ConfigError, ConfigState, DEFAULT_BRAND};
pub use session::{OrderFile, SessionState};
