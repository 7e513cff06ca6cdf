//! Size-bounded batching of mutation operations under a rate-limited backend.

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::store::{DocumentStore, MutationOperation};

/// Batching and retry parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum operations per `batch_update` call
    pub batch_size: usize,

    /// Pause between consecutive batches
    pub inter_batch_delay: Duration,

    /// Pause before the single retry after a rate-limit signal
    pub rate_limit_cooldown: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 30,
            inter_batch_delay: Duration::from_millis(1500),
            rate_limit_cooldown: Duration::from_secs(60),
        }
    }
}

impl BatchConfig {
    /// Configuration without any delays, for callers that bring their own
    /// pacing (and for tests).
    pub fn immediate() -> Self {
        Self {
            inter_batch_delay: Duration::ZERO,
            rate_limit_cooldown: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Set the batch size (minimum 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}

/// Issues mutation batches sequentially: fixed-size chunks, a fixed delay
/// between chunks, and exactly one retry after a cooldown when the backend
/// signals a rate limit. A second rate-limit failure, and any other error,
/// propagates to the caller.
#[derive(Debug, Clone, Default)]
pub struct BatchScheduler {
    config: BatchConfig,
}

impl BatchScheduler {
    /// Create a scheduler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with the given configuration.
    pub fn with_config(config: BatchConfig) -> Self {
        Self { config }
    }

    /// The scheduler's configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Apply `operations` to the document in sequential batches.
    pub fn submit<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
        operations: &[MutationOperation],
    ) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }

        let batch_size = self.config.batch_size.max(1);
        let batch_count = operations.len().div_ceil(batch_size);

        for (i, batch) in operations.chunks(batch_size).enumerate() {
            log::debug!(
                "submitting batch {}/{} ({} operations)",
                i + 1,
                batch_count,
                batch.len()
            );
            self.apply_batch(store, document_id, batch)?;

            if i + 1 < batch_count && !self.config.inter_batch_delay.is_zero() {
                thread::sleep(self.config.inter_batch_delay);
            }
        }
        Ok(())
    }

    fn apply_batch<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
        batch: &[MutationOperation],
    ) -> Result<()> {
        match store.batch_update(document_id, batch) {
            Ok(()) => Ok(()),
            Err(Error::RateLimited) => {
                log::warn!(
                    "rate limited; cooling down {:?} before retrying batch",
                    self.config.rate_limit_cooldown
                );
                if !self.config.rate_limit_cooldown.is_zero() {
                    thread::sleep(self.config.rate_limit_cooldown);
                }
                store.batch_update(document_id, batch)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Span, StructuralDocument};
    use crate::store::InsertLocation;

    /// Store double that fails a configurable number of times.
    struct FlakyStore {
        failures_left: usize,
        error: fn() -> Error,
        calls: Vec<usize>,
    }

    impl FlakyStore {
        fn rate_limited(failures: usize) -> Self {
            Self {
                failures_left: failures,
                error: || Error::RateLimited,
                calls: Vec::new(),
            }
        }

        fn transport(failures: usize) -> Self {
            Self {
                failures_left: failures,
                error: || Error::Transport("backend down".into()),
                calls: Vec::new(),
            }
        }
    }

    impl DocumentStore for FlakyStore {
        fn get(&self, _id: &str) -> Result<StructuralDocument> {
            Ok(StructuralDocument::new())
        }

        fn batch_update(&mut self, _id: &str, ops: &[MutationOperation]) -> Result<()> {
            self.calls.push(ops.len());
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err((self.error)());
            }
            Ok(())
        }

        fn create(&mut self, _title: &str) -> Result<String> {
            Ok("doc".into())
        }

        fn delete(&mut self, _id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn ops(n: usize) -> Vec<MutationOperation> {
        (0..n)
            .map(|i| MutationOperation::DeleteRange {
                range: Span::new(i, i + 1),
            })
            .collect()
    }

    fn scheduler(batch_size: usize) -> BatchScheduler {
        BatchScheduler::with_config(BatchConfig::immediate().with_batch_size(batch_size))
    }

    #[test]
    fn test_chunking() {
        let mut store = FlakyStore::rate_limited(0);
        scheduler(10).submit(&mut store, "d", &ops(25)).unwrap();
        assert_eq!(store.calls, vec![10, 10, 5]);
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut store = FlakyStore::rate_limited(0);
        scheduler(10).submit(&mut store, "d", &[]).unwrap();
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_rate_limit_retried_once() {
        let mut store = FlakyStore::rate_limited(1);
        scheduler(10).submit(&mut store, "d", &ops(5)).unwrap();
        // Same batch issued twice: the failure and the retry.
        assert_eq!(store.calls, vec![5, 5]);
    }

    #[test]
    fn test_second_rate_limit_propagates() {
        let mut store = FlakyStore::rate_limited(2);
        let err = scheduler(10).submit(&mut store, "d", &ops(5)).unwrap_err();
        assert!(matches!(err, Error::RateLimited));
        assert_eq!(store.calls.len(), 2);
    }

    #[test]
    fn test_other_errors_not_retried() {
        let mut store = FlakyStore::transport(1);
        let err = scheduler(10).submit(&mut store, "d", &ops(5)).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(store.calls.len(), 1);
    }

    #[test]
    fn test_single_op_insert_text() {
        let mut store = FlakyStore::rate_limited(0);
        let op = MutationOperation::InsertText {
            at: InsertLocation::EndOfBody,
            text: "hello".into(),
        };
        scheduler(30).submit(&mut store, "d", &[op]).unwrap();
        assert_eq!(store.calls, vec![1]);
    }
}
