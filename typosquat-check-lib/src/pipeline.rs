//! Main detection pipeline.
//!
//! This module provides the primary `TypoSquatChecker` struct that drives a
//! run: generate typo candidates per source domain, check which are actually
//! registered, optionally cross-reference registrant entities, and collect
//! findings. Execution is strictly sequential: one domain at a time, one
//! candidate at a time, with the only timing control being the configured
//! delay between WHOIS lookups.

use crate::dns::{DnsChecker, RegistrationProbe};
use crate::error::TypoCheckError;
use crate::generator::{OpenAiGenerator, TypoSource};
use crate::types::{CheckConfig, Finding};
use crate::utils::{read_domains_file, write_findings};
use crate::whois::{RegistrantSource, WhoisClient};
use std::path::Path;
use tracing::{debug, warn};

/// Callbacks fired as a run progresses, so a frontend can render progress
/// without owning the scan loop. All methods default to no-ops.
pub trait ScanObserver: Send {
    /// A source domain is about to be scanned.
    fn domain_started(&mut self, _domain: &str) {}

    /// A candidate was checked against DNS. Candidates equal to their
    /// source domain are skipped silently and never reported here.
    fn candidate_checked(&mut self, _domain: &str, _candidate: &str, _registered: bool) {}

    /// A source domain was skipped because typo generation failed.
    fn domain_skipped(&mut self, _domain: &str, _error: &TypoCheckError) {}
}

impl ScanObserver for () {}

/// Orchestrates typo generation, registration checks, and registrant
/// cross-referencing for a set of source domains.
///
/// # Example
///
/// ```rust,no_run
/// use typosquat_check_lib::{CheckConfig, TypoSquatChecker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = CheckConfig::default().with_api_key("sk-...");
///     let checker = TypoSquatChecker::new(config)?;
///     let findings = checker.run("domains.txt", "findings.txt").await?;
///     println!("Found {} registered typos", findings.len());
///     Ok(())
/// }
/// ```
pub struct TypoSquatChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Typo candidate generator
    generator: Box<dyn TypoSource>,
    /// DNS registration probe
    probe: Box<dyn RegistrationProbe>,
    /// WHOIS registrant source
    registrant: Box<dyn RegistrantSource>,
}

impl TypoSquatChecker {
    /// Create a checker wired to the real services: the configured
    /// completions API, the system resolver, and the system whois command.
    ///
    /// Fails if the configuration cannot drive a run (missing API key).
    pub fn new(config: CheckConfig) -> Result<Self, TypoCheckError> {
        config.validate()?;

        let generator = OpenAiGenerator::new(
            config.api_key.clone(),
            config.model.clone(),
            config.generation_timeout,
        )?;

        Ok(Self {
            generator: Box::new(generator),
            probe: Box::new(DnsChecker::new()),
            registrant: Box::new(WhoisClient::new()),
            config,
        })
    }

    /// Create a checker from explicit components.
    ///
    /// This is the seam used by tests to substitute canned generators,
    /// resolvers, and WHOIS data.
    pub fn with_components(
        config: CheckConfig,
        generator: Box<dyn TypoSource>,
        probe: Box<dyn RegistrationProbe>,
        registrant: Box<dyn RegistrantSource>,
    ) -> Self {
        Self {
            config,
            generator,
            probe,
            registrant,
        }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Scan one source domain and return its findings.
    ///
    /// Generation failures propagate to the caller; registration checks and
    /// registrant lookups follow the normalization rules of their modules.
    pub async fn check_domain(&self, domain: &str) -> Result<Vec<Finding>, TypoCheckError> {
        self.check_domain_with(domain, |_, _| {}).await
    }

    /// Scan one source domain, reporting a verdict per candidate.
    ///
    /// `on_verdict` is called once for every candidate that was actually
    /// checked (candidates equal to the source domain are skipped silently),
    /// with the candidate and whether it resolved as registered.
    pub async fn check_domain_with<F>(
        &self,
        domain: &str,
        mut on_verdict: F,
    ) -> Result<Vec<Finding>, TypoCheckError>
    where
        F: FnMut(&str, bool) + Send,
    {
        let candidates = self
            .generator
            .generate(domain, self.config.typo_count)
            .await?;
        debug!("{} candidates generated for {}", candidates.len(), domain);

        // Resolve the source domain's registrant up front so every finding
        // compares against the same entity
        let origin_entity = if self.config.whois_enabled {
            self.registrant.lookup_entity(domain).await
        } else {
            None
        };

        let mut findings = Vec::new();

        for candidate in candidates {
            // The generator sometimes echoes the original domain back
            if candidate == domain {
                continue;
            }

            let registered = self
                .probe
                .is_registered(&candidate, self.config.record_selector)
                .await?;
            on_verdict(&candidate, registered);

            if !registered {
                continue;
            }

            if self.config.whois_enabled {
                tokio::time::sleep(self.config.whois_delay).await;
                let entity = self.registrant.lookup_entity(&candidate).await;
                let same_owner = match (&origin_entity, &entity) {
                    (Some(origin), Some(typo)) => {
                        origin.to_lowercase() == typo.to_lowercase()
                    }
                    _ => false,
                };
                findings.push(Finding {
                    typo: candidate,
                    registered: true,
                    registrant: entity,
                    same_owner: Some(same_owner),
                });
            } else {
                findings.push(Finding {
                    typo: candidate,
                    registered: true,
                    registrant: None,
                    same_owner: None,
                });
            }
        }

        Ok(findings)
    }

    /// Run the full pipeline: read source domains from `input_path`, scan
    /// them sequentially, and write all findings to `output_path` at the
    /// end of the run.
    ///
    /// A generation failure for one domain is logged and that domain is
    /// skipped; the run continues. Any other failure (an unexpected
    /// resolver error, file I/O) aborts the run. The output file is written
    /// exactly once, after all domains are processed, so an interrupted run
    /// persists nothing.
    pub async fn run<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
    ) -> Result<Vec<Finding>, TypoCheckError> {
        self.run_with(input_path, output_path, &mut ()).await
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    pub async fn run_with<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        observer: &mut dyn ScanObserver,
    ) -> Result<Vec<Finding>, TypoCheckError> {
        let domains = read_domains_file(input_path.as_ref())?;

        let mut findings = Vec::new();
        for domain in &domains {
            observer.domain_started(domain);
            match self
                .check_domain_with(domain, |candidate, registered| {
                    observer.candidate_checked(domain, candidate, registered)
                })
                .await
            {
                Ok(domain_findings) => findings.extend(domain_findings),
                // Only the generation stage gets warn-and-skip; a resolver
                // failure aborts the run
                Err(e) if e.is_generation_failure() => {
                    warn!("Skipping {}: {}", domain, e);
                    observer.domain_skipped(domain, &e);
                }
                Err(e) => return Err(e),
            }
        }

        write_findings(output_path.as_ref(), &findings, self.config.whois_enabled)?;

        Ok(findings)
    }
}
