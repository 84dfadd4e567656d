//! Core data types for typosquat detection.
//!
//! This module defines the main data structures used throughout the library:
//! findings, the DNS record selector, and the pipeline configuration.

use crate::error::TypoCheckError;
use hickory_resolver::proto::rr::RecordType;
use std::time::Duration;

/// The fixed, ordered set of record types probed when the selector is `ALL`.
///
/// A domain counts as registered as soon as any of these yields an answer.
pub const ALL_RECORD_TYPES: [RecordType; 5] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::MX,
    RecordType::CNAME,
    RecordType::NS,
];

/// Which DNS record type(s) to probe when deciding whether a domain
/// is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSelector {
    /// Probe the fixed set in [`ALL_RECORD_TYPES`], stopping at the
    /// first answer
    All,

    /// Probe a single named record type
    Single(RecordType),
}

impl RecordSelector {
    /// Parse a selector string as it appears in configuration.
    ///
    /// The sentinel `"ALL"` (case-insensitive) selects the multi-type probe.
    /// Anything else must name a record type (`"A"`, `"MX"`, `"TXT"`, ...);
    /// unknown names are a configuration error.
    pub fn parse(value: &str) -> Result<Self, TypoCheckError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("ALL") {
            return Ok(Self::All);
        }
        value
            .to_uppercase()
            .parse::<RecordType>()
            .map(Self::Single)
            .map_err(|_| {
                TypoCheckError::config(format!(
                    "Unknown DNS record type '{}'. Use ALL or a record type like A, AAAA, MX",
                    value
                ))
            })
    }
}

impl Default for RecordSelector {
    fn default() -> Self {
        Self::All
    }
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Single(rtype) => write!(f, "{}", rtype),
        }
    }
}

/// A registered typo variant discovered during a run.
///
/// A finding is only created for a candidate that differs from its source
/// domain and that the registration checker reported as registered. Findings
/// are held in order for the duration of the run and written out once at
/// the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// The typo variant (e.g. "examp1e.com")
    pub typo: String,

    /// Whether the variant resolved as registered (always true for
    /// emitted findings)
    pub registered: bool,

    /// Best-effort registrant entity from WHOIS, if the lookup stage ran
    /// and produced one
    pub registrant: Option<String>,

    /// Whether the variant shares a registrant with its source domain.
    /// Only present when the WHOIS stage ran.
    pub same_owner: Option<bool>,
}

impl Finding {
    /// Render the bare output line: the typo domain alone.
    pub fn basic_line(&self) -> String {
        self.typo.clone()
    }

    /// Render the tab-separated output line with WHOIS cross-reference
    /// fields.
    ///
    /// Booleans render as `True`/`False` and a missing registrant as `None`
    /// so existing report consumers keep parsing the same field values.
    pub fn detailed_line(&self) -> String {
        format!(
            "{}\tregistered={}\twhois={}\tsame_owner={}",
            self.typo,
            display_flag(self.registered),
            self.registrant.as_deref().unwrap_or("None"),
            display_flag(self.same_owner.unwrap_or(false)),
        )
    }
}

fn display_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Configuration for a detection run.
///
/// This struct is built once at startup (from environment variables and CLI
/// flags) and passed explicitly to the pipeline, never read as ambient
/// global state.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// API key for the text-generation service
    pub api_key: String,

    /// Model identifier for the completions call
    /// Default: "gpt-4o"
    pub model: String,

    /// Number of typo variants requested per source domain
    /// Default: 10
    pub typo_count: usize,

    /// Which DNS record type(s) decide registration
    /// Default: ALL
    pub record_selector: RecordSelector,

    /// Timeout for each generation call
    /// Default: 60 seconds
    pub generation_timeout: Duration,

    /// Whether to cross-reference registrant entities via WHOIS
    /// Default: true
    pub whois_enabled: bool,

    /// Delay between successive WHOIS lookups, to stay under informal
    /// upstream rate limits
    /// Default: 1.5 seconds
    pub whois_delay: Duration,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// The API key defaults to empty and must be supplied before the
    /// generation stage can run; see [`CheckConfig::validate`].
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            typo_count: 10,
            record_selector: RecordSelector::All,
            generation_timeout: Duration::from_secs(60),
            whois_enabled: true,
            whois_delay: Duration::from_millis(1500),
        }
    }
}

impl CheckConfig {
    /// Set the text-generation API key.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the model identifier for generation calls.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the number of typo variants requested per domain.
    ///
    /// Zero is clamped up to one so the prompt always asks for something.
    pub fn with_typo_count(mut self, count: usize) -> Self {
        self.typo_count = count.max(1);
        self
    }

    /// Set the DNS record selector.
    pub fn with_record_selector(mut self, selector: RecordSelector) -> Self {
        self.record_selector = selector;
        self
    }

    /// Set the generation call timeout.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Enable or disable the WHOIS cross-reference stage.
    pub fn with_whois_enabled(mut self, enabled: bool) -> Self {
        self.whois_enabled = enabled;
        self
    }

    /// Set the delay between successive WHOIS lookups.
    pub fn with_whois_delay(mut self, delay: Duration) -> Self {
        self.whois_delay = delay;
        self
    }

    /// Check that the configuration can actually drive a run.
    pub fn validate(&self) -> Result<(), TypoCheckError> {
        if self.api_key.trim().is_empty() {
            return Err(TypoCheckError::config(
                "No API key configured. Set OPENAI_API_KEY in the environment or a .env file",
            ));
        }
        Ok(())
    }
}
