//! DNS-based registration checking.
//!
//! A domain counts as registered when at least one probed record type yields
//! an answer. The recognized "not registered" outcomes (NXDOMAIN, empty
//! answer, no usable nameservers, resolution timeout) are normalized to
//! `false` rather than surfaced as errors.

use crate::error::TypoCheckError;
use crate::types::{RecordSelector, ALL_RECORD_TYPES};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

/// Decides whether a candidate domain is actually registered.
///
/// The pipeline talks to this trait so tests can substitute a canned
/// resolver for live DNS.
#[async_trait]
pub trait RegistrationProbe: Send + Sync {
    /// Report whether `domain` resolves for the selected record type(s).
    async fn is_registered(
        &self,
        domain: &str,
        selector: RecordSelector,
    ) -> Result<bool, TypoCheckError>;
}

/// Outcome of probing one record type.
#[derive(Debug, Clone)]
enum ProbeOutcome {
    /// At least one record came back
    Answered,
    /// NXDOMAIN, empty answer section, or no usable nameservers
    NoRecords,
    /// Resolution timed out
    TimedOut,
    /// Anything else the resolver reported
    Failed(ResolveError),
}

/// Per-record-type probing seam, split from the selector scan so the scan
/// logic can run against canned outcomes instead of live DNS.
#[async_trait]
trait RecordProber: Send + Sync {
    async fn probe_record(&self, domain: &str, rtype: RecordType) -> ProbeOutcome;
}

/// Registration checker backed by the system-configured recursive resolver.
pub struct DnsChecker {
    resolver: TokioAsyncResolver,
}

impl DnsChecker {
    /// Create a checker using default resolver settings (system defaults,
    /// standard retry behavior).
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for DnsChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordProber for DnsChecker {
    async fn probe_record(&self, domain: &str, rtype: RecordType) -> ProbeOutcome {
        match self.resolver.lookup(domain, rtype).await {
            Ok(lookup) => {
                if lookup.records().is_empty() {
                    ProbeOutcome::NoRecords
                } else {
                    ProbeOutcome::Answered
                }
            }
            Err(e) => classify_resolve_error(e),
        }
    }
}

/// Map a resolver error onto a probe outcome.
fn classify_resolve_error(e: ResolveError) -> ProbeOutcome {
    match e.kind() {
        // Covers both NXDOMAIN and an empty answer section
        ResolveErrorKind::NoRecordsFound { .. } => ProbeOutcome::NoRecords,
        ResolveErrorKind::NoConnections => ProbeOutcome::NoRecords,
        ResolveErrorKind::Timeout => ProbeOutcome::TimedOut,
        _ => ProbeOutcome::Failed(e),
    }
}

/// Apply the selector rules over per-type probe outcomes.
async fn scan<P: RecordProber + ?Sized>(
    prober: &P,
    domain: &str,
    selector: RecordSelector,
) -> Result<bool, TypoCheckError> {
    match selector {
        RecordSelector::All => {
            for rtype in ALL_RECORD_TYPES {
                match prober.probe_record(domain, rtype).await {
                    ProbeOutcome::Answered => {
                        debug!("{} answered for {} record", domain, rtype);
                        return Ok(true);
                    }
                    ProbeOutcome::NoRecords => continue,
                    // A timeout ends the scan as "not registered"
                    // instead of trying the remaining types
                    ProbeOutcome::TimedOut => {
                        debug!("{} lookup timed out on {} record", domain, rtype);
                        return Ok(false);
                    }
                    ProbeOutcome::Failed(e) => {
                        return Err(TypoCheckError::dns(domain, e.to_string()));
                    }
                }
            }
            Ok(false)
        }
        RecordSelector::Single(rtype) => match prober.probe_record(domain, rtype).await {
            ProbeOutcome::Answered => Ok(true),
            // The single-type path never errors: unexpected resolver
            // failures also normalize to "not registered"
            ProbeOutcome::NoRecords | ProbeOutcome::TimedOut => Ok(false),
            ProbeOutcome::Failed(e) => {
                debug!("{} lookup failed on {} record: {}", domain, rtype, e);
                Ok(false)
            }
        },
    }
}

#[async_trait]
impl RegistrationProbe for DnsChecker {
    async fn is_registered(
        &self,
        domain: &str,
        selector: RecordSelector,
    ) -> Result<bool, TypoCheckError> {
        scan(self, domain, selector).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Prober returning a fixed outcome per record type, recording the
    /// query order. Types without an entry yield `NoRecords`.
    struct TableProber {
        outcomes: HashMap<RecordType, ProbeOutcome>,
        queried: Mutex<Vec<RecordType>>,
    }

    impl TableProber {
        fn new(outcomes: Vec<(RecordType, ProbeOutcome)>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                queried: Mutex::new(Vec::new()),
            }
        }

        fn queried(&self) -> Vec<RecordType> {
            self.queried.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordProber for TableProber {
        async fn probe_record(&self, _domain: &str, rtype: RecordType) -> ProbeOutcome {
            self.queried.lock().unwrap().push(rtype);
            self.outcomes
                .get(&rtype)
                .cloned()
                .unwrap_or(ProbeOutcome::NoRecords)
        }
    }

    fn refused() -> ResolveError {
        ResolveError::from("connection refused")
    }

    #[tokio::test]
    async fn test_all_path_stops_at_first_answer() {
        let prober = TableProber::new(vec![
            (RecordType::A, ProbeOutcome::NoRecords),
            (RecordType::AAAA, ProbeOutcome::NoRecords),
            (RecordType::MX, ProbeOutcome::Answered),
        ]);

        let registered = scan(&prober, "example.com", RecordSelector::All)
            .await
            .unwrap();
        assert!(registered);
        assert_eq!(
            prober.queried(),
            vec![RecordType::A, RecordType::AAAA, RecordType::MX]
        );
    }

    #[tokio::test]
    async fn test_all_path_exhausts_every_type_without_answers() {
        let prober = TableProber::new(Vec::new());

        let registered = scan(&prober, "example.com", RecordSelector::All)
            .await
            .unwrap();
        assert!(!registered);
        assert_eq!(prober.queried(), ALL_RECORD_TYPES.to_vec());
    }

    #[tokio::test]
    async fn test_all_path_timeout_ends_scan_unregistered() {
        let prober = TableProber::new(vec![
            (RecordType::A, ProbeOutcome::NoRecords),
            (RecordType::AAAA, ProbeOutcome::TimedOut),
        ]);

        let registered = scan(&prober, "example.com", RecordSelector::All)
            .await
            .unwrap();
        assert!(!registered);
        // The remaining record types are not tried after a timeout
        assert_eq!(prober.queried(), vec![RecordType::A, RecordType::AAAA]);
    }

    #[tokio::test]
    async fn test_all_path_unexpected_failure_propagates() {
        let prober = TableProber::new(vec![(RecordType::A, ProbeOutcome::Failed(refused()))]);

        let err = scan(&prober, "example.com", RecordSelector::All)
            .await
            .unwrap_err();
        assert!(matches!(err, TypoCheckError::DnsError { .. }));
    }

    #[tokio::test]
    async fn test_single_path_answered_is_registered() {
        let prober = TableProber::new(vec![(RecordType::MX, ProbeOutcome::Answered)]);

        let registered = scan(
            &prober,
            "example.com",
            RecordSelector::Single(RecordType::MX),
        )
        .await
        .unwrap();
        assert!(registered);
        assert_eq!(prober.queried(), vec![RecordType::MX]);
    }

    #[tokio::test]
    async fn test_single_path_normalizes_all_failures_to_unregistered() {
        for outcome in [
            ProbeOutcome::NoRecords,
            ProbeOutcome::TimedOut,
            ProbeOutcome::Failed(refused()),
        ] {
            let prober = TableProber::new(vec![(RecordType::A, outcome)]);
            let registered = scan(
                &prober,
                "example.com",
                RecordSelector::Single(RecordType::A),
            )
            .await
            .unwrap();
            assert!(!registered);
        }
    }

    #[test]
    fn test_resolver_error_classification() {
        assert!(matches!(
            classify_resolve_error(ResolveErrorKind::Timeout.into()),
            ProbeOutcome::TimedOut
        ));
        assert!(matches!(
            classify_resolve_error(ResolveErrorKind::NoConnections.into()),
            ProbeOutcome::NoRecords
        ));
        assert!(matches!(
            classify_resolve_error(refused()),
            ProbeOutcome::Failed(_)
        ));
    }
}
