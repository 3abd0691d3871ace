//! Registration lookups: the per-identifier checker and the order-preserving
//! batch verifier on top of it.

use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};
use tracing::debug;

use crate::{
    domain::{BatchResult, PhoneNumber, Verdict},
    messaging::port::DirectoryPort,
};

/// The network's canonical user domain.
pub const DIRECTORY_DOMAIN: &str = "s.whatsapp.net";

/// Check a single identifier against the directory.
///
/// A lookup failure becomes a `Verdict` instead of propagating, so one bad
/// number can never abort its siblings.
pub async fn check(
    identifier: &PhoneNumber,
    directory: &dyn DirectoryPort,
    jid_suffix: bool,
) -> Verdict {
    let query = if jid_suffix && !identifier.0.contains('@') {
        format!("{}@{DIRECTORY_DOMAIN}", identifier.0)
    } else {
        identifier.0.clone()
    };

    match directory.query(&query).await {
        Ok(records) if records.is_empty() => Verdict::NotRegistered,
        Ok(_) => Verdict::Registered,
        Err(e) => Verdict::LookupError(e.to_string()),
    }
}

/// Runs the checker over a whole identifier list.
///
/// Lookups are issued concurrently up to `max_concurrent` (1 means strictly
/// sequential), keyed by input index, and reassembled in input order before
/// the result is returned.
pub struct BatchVerifier {
    directory: Arc<dyn DirectoryPort>,
    jid_suffix: bool,
    max_concurrent: usize,
}

impl BatchVerifier {
    pub fn new(directory: Arc<dyn DirectoryPort>, jid_suffix: bool, max_concurrent: usize) -> Self {
        Self {
            directory,
            jid_suffix,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub async fn verify_all(&self, identifiers: &[PhoneNumber]) -> BatchResult {
        if identifiers.is_empty() {
            return BatchResult::default();
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut lookups: JoinSet<(usize, Verdict)> = JoinSet::new();

        for (idx, identifier) in identifiers.iter().cloned().enumerate() {
            let directory = self.directory.clone();
            let semaphore = semaphore.clone();
            let jid_suffix = self.jid_suffix;
            lookups.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let verdict = check(&identifier, directory.as_ref(), jid_suffix).await;
                (idx, verdict)
            });
        }

        let mut slots: Vec<Option<Verdict>> = vec![None; identifiers.len()];
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((idx, verdict)) => slots[idx] = Some(verdict),
                Err(e) => debug!("lookup task failed to join: {e}"),
            }
        }

        let mut result = BatchResult::default();
        for (identifier, slot) in identifiers.iter().zip(slots) {
            let verdict = slot
                .unwrap_or_else(|| Verdict::LookupError("lookup task was cancelled".to_string()));
            match &verdict {
                Verdict::Registered => result.registered += 1,
                Verdict::NotRegistered => result.not_registered += 1,
                Verdict::LookupError(_) => {}
            }
            result.verdicts.push((identifier.clone(), verdict));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchRecord;
    use crate::errors::Error;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Directory fake: programmed per-identifier outcomes, recorded queries.
    #[derive(Default)]
    struct FakeDirectory {
        registered: Vec<String>,
        failing: Vec<String>,
        /// Extra latency per identifier, to exercise out-of-order completion.
        delays: HashMap<String, Duration>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeDirectory {
        fn with_registered(numbers: &[&str]) -> Self {
            Self {
                registered: numbers.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn queried(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DirectoryPort for FakeDirectory {
        async fn query(&self, identifier: &str) -> crate::Result<Vec<MatchRecord>> {
            self.queries.lock().unwrap().push(identifier.to_string());
            if let Some(delay) = self.delays.get(identifier) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.iter().any(|f| f == identifier) {
                return Err(Error::Gateway("directory unavailable".to_string()));
            }
            if self.registered.iter().any(|r| r == identifier) {
                return Ok(vec![MatchRecord {
                    jid: format!("{identifier}@{DIRECTORY_DOMAIN}"),
                    number: Some(identifier.to_string()),
                }]);
            }
            Ok(vec![])
        }
    }

    fn ids(numbers: &[&str]) -> Vec<PhoneNumber> {
        numbers.iter().map(|s| PhoneNumber(s.to_string())).collect()
    }

    #[tokio::test]
    async fn check_maps_hits_and_misses() {
        let dir = FakeDirectory::with_registered(&["123"]);
        assert_eq!(
            check(&PhoneNumber("123".to_string()), &dir, false).await,
            Verdict::Registered
        );
        assert_eq!(
            check(&PhoneNumber("456".to_string()), &dir, false).await,
            Verdict::NotRegistered
        );
    }

    #[tokio::test]
    async fn check_appends_directory_domain_when_configured() {
        let dir = FakeDirectory::default();
        check(&PhoneNumber("123".to_string()), &dir, true).await;
        assert_eq!(dir.queried(), vec!["123@s.whatsapp.net"]);

        // An identifier that is already a JID is passed through untouched.
        check(&PhoneNumber("456@s.whatsapp.net".to_string()), &dir, true).await;
        assert_eq!(dir.queried()[1], "456@s.whatsapp.net");
    }

    #[tokio::test]
    async fn check_converts_failures_into_lookup_errors() {
        let dir = FakeDirectory {
            failing: vec!["999".to_string()],
            ..FakeDirectory::default()
        };
        let verdict = check(&PhoneNumber("999".to_string()), &dir, false).await;
        let Verdict::LookupError(msg) = verdict else {
            panic!("expected a lookup error, got {verdict:?}");
        };
        assert!(msg.contains("directory unavailable"));
    }

    #[tokio::test]
    async fn verify_all_preserves_input_order_under_concurrency() {
        let mut dir = FakeDirectory::with_registered(&["a", "c"]);
        // Make the first lookup finish last.
        dir.delays
            .insert("a".to_string(), Duration::from_millis(30));

        let verifier = BatchVerifier::new(Arc::new(dir), false, 4);
        let result = verifier.verify_all(&ids(&["a", "b", "c"])).await;

        let order: Vec<&str> = result.verdicts.iter().map(|(n, _)| n.0.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(result.verdicts[0].1, Verdict::Registered);
        assert_eq!(result.verdicts[1].1, Verdict::NotRegistered);
        assert_eq!(result.verdicts[2].1, Verdict::Registered);
    }

    #[tokio::test]
    async fn verify_all_isolates_failures_and_keeps_counters_clean() {
        let dir = FakeDirectory {
            registered: vec!["1".to_string()],
            failing: vec!["2".to_string()],
            ..FakeDirectory::default()
        };
        let verifier = BatchVerifier::new(Arc::new(dir), false, 1);
        let result = verifier.verify_all(&ids(&["1", "2", "3"])).await;

        assert_eq!(result.verdicts.len(), 3);
        assert_eq!(result.registered, 1);
        assert_eq!(result.not_registered, 1);
        assert!(matches!(result.verdicts[1].1, Verdict::LookupError(_)));
        // The failing lookup did not stop the one after it.
        assert_eq!(result.verdicts[2].1, Verdict::NotRegistered);
    }

    #[tokio::test]
    async fn verify_all_counts_duplicates_separately() {
        let dir = FakeDirectory::with_registered(&["7"]);
        let verifier = BatchVerifier::new(Arc::new(dir), false, 2);
        let result = verifier.verify_all(&ids(&["7", "7"])).await;
        assert_eq!(result.registered, 2);
        assert_eq!(result.not_registered, 0);
    }

    #[tokio::test]
    async fn verify_all_on_empty_input_is_a_valid_empty_result() {
        let verifier = BatchVerifier::new(Arc::new(FakeDirectory::default()), false, 4);
        let result = verifier.verify_all(&[]).await;
        assert!(result.verdicts.is_empty());
        assert_eq!(result.registered, 0);
        assert_eq!(result.not_registered, 0);
    }
}
