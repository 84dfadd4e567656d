//! WHOIS registrant lookup.
//!
//! This module provides best-effort extraction of an identifying registrant
//! string for a domain by running the system's `whois` command and scanning
//! its `key: value` output. The lookup never fails: any error, timeout, or
//! unparseable response simply yields an absent entity, because a missing
//! registrant must never abort a detection run.

use crate::error::TypoCheckError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Source of registrant entities for registered domains.
///
/// The pipeline talks to this trait so tests can substitute canned WHOIS
/// data for the system command.
#[async_trait]
pub trait RegistrantSource: Send + Sync {
    /// Best-effort registrant entity for `domain`, or `None` when nothing
    /// usable could be extracted. Never errors.
    async fn lookup_entity(&self, domain: &str) -> Option<String>;
}

/// Registrant lookup backed by the system's `whois` command-line tool.
#[derive(Clone)]
pub struct WhoisClient {
    /// Timeout for WHOIS queries
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new WHOIS client with default settings.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }

    /// Create a new WHOIS client with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute the system whois command and return its raw output.
    async fn execute_whois_command(&self, domain: &str) -> Result<String, TypoCheckError> {
        let output = Command::new("whois")
            .arg(domain)
            .output()
            .await
            .map_err(|e| {
                TypoCheckError::whois(
                    domain,
                    format!(
                        "Failed to execute whois command: {}. Make sure 'whois' is installed.",
                        e
                    ),
                )
            })?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrantSource for WhoisClient {
    async fn lookup_entity(&self, domain: &str) -> Option<String> {
        let result =
            tokio::time::timeout(self.timeout, self.execute_whois_command(domain)).await;

        match result {
            Ok(Ok(raw)) => {
                let entity = parse_registrant_fields(&raw).into_entity();
                match &entity {
                    Some(entity) => debug!("WHOIS entity for {}: {}", domain, entity),
                    None => debug!("No registrant entity found for {}", domain),
                }
                entity
            }
            Ok(Err(e)) => {
                debug!("WHOIS lookup failed for {}: {}", domain, e);
                None
            }
            Err(_) => {
                debug!("WHOIS query for {} timed out after {:?}", domain, self.timeout);
                None
            }
        }
    }
}

/// Candidate registrant fields scanned out of a raw WHOIS response.
#[derive(Debug, Default, PartialEq)]
pub struct RegistrantFields {
    pub organization: Option<String>,
    pub registrant_organization: Option<String>,
    pub name: Option<String>,
    pub registrar: Option<String>,
    pub emails: Vec<String>,
}

impl RegistrantFields {
    /// Collapse the candidates into one identifying string.
    ///
    /// Fallback priority: organization, registrant organization, name,
    /// registrar, then the collected email addresses joined with ", ".
    /// Empty field values were already dropped during parsing, so whatever
    /// is present here is usable.
    pub fn into_entity(self) -> Option<String> {
        self.organization
            .or(self.registrant_organization)
            .or(self.name)
            .or(self.registrar)
            .or_else(|| {
                if self.emails.is_empty() {
                    None
                } else {
                    Some(self.emails.join(", "))
                }
            })
    }
}

/// Scan a raw WHOIS response for registrant-identifying fields.
///
/// WHOIS output is line-oriented `key: value` text whose exact keys vary by
/// registry, so a handful of spellings map onto each candidate field. The
/// first occurrence of a key wins; emails are collected in order, without
/// duplicates.
pub fn parse_registrant_fields(raw: &str) -> RegistrantFields {
    let mut fields = RegistrantFields::default();

    for line in raw.lines() {
        let line = line.trim();
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "organization" | "organisation" | "org" => {
                    if fields.organization.is_none() {
                        fields.organization = Some(value.to_string());
                    }
                }
                "registrant organization" | "registrant organisation" => {
                    if fields.registrant_organization.is_none() {
                        fields.registrant_organization = Some(value.to_string());
                    }
                }
                "registrant name" | "name" => {
                    if fields.name.is_none() {
                        fields.name = Some(value.to_string());
                    }
                }
                "registrar" => {
                    if fields.registrar.is_none() {
                        fields.registrar = Some(value.to_string());
                    }
                }
                "registrant email" | "admin email" | "tech email" | "email" => {
                    let email = value.to_string();
                    if !fields.emails.contains(&email) {
                        fields.emails.push(email);
                    }
                }
                _ => {}
            }
        }
    }

    fields
}
