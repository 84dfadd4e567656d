//! # Typosquat Check Library
//!
//! Detects registered typo-squatting variants of a domain name.
//!
//! The pipeline generates plausible misspellings of each source domain via a
//! chat-completions call, checks which variants actually resolve in DNS, and
//! optionally cross-references WHOIS registrant data to flag variants that
//! share an owner with the original domain.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use typosquat_check_lib::TypoSquatChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = typosquat_check_lib::config_from_env()?;
//!     let checker = TypoSquatChecker::new(config)?;
//!
//!     let findings = checker.run("domains.txt", "findings.txt").await?;
//!     println!("Detection complete. Found {} registered typos.", findings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **LLM generation**: typo candidates from an OpenAI-compatible API
//! - **DNS verification**: registration checks across A, AAAA, MX, CNAME, NS
//! - **WHOIS cross-reference**: optional same-owner detection per finding
//! - **Mockable components**: trait seams for every external service

// Re-export main public API types and functions
// This makes them available as typosquat_check_lib::TypeName
pub use config::{config_from_env, load_env_config, EnvConfig};
pub use dns::{DnsChecker, RegistrationProbe};
pub use error::TypoCheckError;
pub use generator::{parse_variant_lines, OpenAiGenerator, TypoSource};
pub use pipeline::{ScanObserver, TypoSquatChecker};
pub use types::{CheckConfig, Finding, RecordSelector, ALL_RECORD_TYPES};
pub use utils::{read_domains_file, write_findings};
pub use whois::{parse_registrant_fields, RegistrantFields, RegistrantSource, WhoisClient};

// Internal modules
mod config;
mod dns;
mod error;
mod generator;
mod pipeline;
mod types;
mod utils;
mod whois;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, TypoCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
