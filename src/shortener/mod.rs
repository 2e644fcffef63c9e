//! Short code generation and allocation.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ShortenerConfig;
use crate::storage::{CreateOutcome, StorageClient, StorageError};

/// Alphabet codes are drawn from.
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum ShortenError {
    /// Every drawn code was already taken. With a 62^6 code space this only
    /// happens under extreme occupancy or a misbehaving store.
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Source of candidate codes. A seam so tests can script the drawn sequence;
/// production uses [`RandomCodes`].
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Uniform draws from the alphanumeric alphabet.
pub struct RandomCodes;

impl CodeGenerator for RandomCodes {
    fn generate(&self, length: usize) -> String {
        std::iter::repeat_with(|| ALPHANUMERIC[rand::random_range(0..ALPHANUMERIC.len())] as char)
            .take(length)
            .collect()
    }
}

/// A successfully allocated short link.
#[derive(Debug, Clone)]
pub struct AllocatedLink {
    pub code: String,
    pub short_url: String,
    /// Conditional creates performed, including the one that landed.
    pub attempts: u32,
}

/// Allocates codes and persists redirect records.
pub struct Shortener {
    storage: Arc<StorageClient>,
    config: ShortenerConfig,
    codes: Box<dyn CodeGenerator>,
}

impl Shortener {
    pub fn new(storage: Arc<StorageClient>, config: ShortenerConfig) -> Self {
        Self::with_generator(storage, config, Box::new(RandomCodes))
    }

    pub fn with_generator(
        storage: Arc<StorageClient>,
        config: ShortenerConfig,
        codes: Box<dyn CodeGenerator>,
    ) -> Self {
        Self {
            storage,
            config,
            codes,
        }
    }

    /// Allocate a free code and persist a redirect record for `target`.
    ///
    /// Each attempt draws an independent code and issues one conditional
    /// create; a conflict discards the candidate and redraws. The loop is
    /// bounded by `max_attempts`, after which [`ShortenError::Exhausted`] is
    /// returned. `target` is stored verbatim.
    pub async fn shorten(&self, target: &str) -> Result<AllocatedLink, ShortenError> {
        for attempt in 1..=self.config.max_attempts {
            let code = self.codes.generate(self.config.code_length);

            match self.storage.create_redirect(&code, target).await? {
                CreateOutcome::Created => {
                    return Ok(AllocatedLink {
                        short_url: self.config.short_url(&code),
                        code,
                        attempts: attempt,
                    });
                }
                CreateOutcome::AlreadyExists => {
                    tracing::debug!(code, attempt, "Short code taken, drawing a new one");
                }
            }
        }

        Err(ShortenError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Deterministic draw sequence; panics if the allocator draws more codes
    /// than scripted, which bounds the attempt count from above.
    struct ScriptedCodes {
        codes: Mutex<VecDeque<&'static str>>,
    }

    impl ScriptedCodes {
        fn new(codes: &[&'static str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().copied().collect()),
            }
        }
    }

    impl CodeGenerator for ScriptedCodes {
        fn generate(&self, _length: usize) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop_front()
                .expect("script ran out of codes")
                .to_string()
        }
    }

    fn test_config() -> ShortenerConfig {
        ShortenerConfig {
            public_base_url: "https://your-domain".to_string(),
            code_length: 6,
            max_attempts: 8,
        }
    }

    #[test]
    fn random_codes_have_requested_length_and_alphabet() {
        let generator = RandomCodes;
        for length in [1, 6, 12] {
            let code = generator.generate(length);
            assert_eq!(code.len(), length);
            assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_random_codes_differ() {
        // 62^6 combinations; a repeat here means the generator is broken
        let generator = RandomCodes;
        assert_ne!(generator.generate(6), generator.generate(6));
    }

    #[tokio::test]
    async fn shorten_allocates_on_first_free_code() {
        let storage = Arc::new(StorageClient::in_memory());
        let shortener = Shortener::with_generator(
            storage.clone(),
            test_config(),
            Box::new(ScriptedCodes::new(&["aaaaaa"])),
        );

        let link = shortener.shorten("https://example.com/page").await.unwrap();
        assert_eq!(link.code, "aaaaaa");
        assert_eq!(link.short_url, "https://your-domain/aaaaaa");
        assert_eq!(link.attempts, 1);

        let record = storage.fetch_redirect("aaaaaa").await.unwrap().unwrap();
        assert_eq!(record.target, "https://example.com/page");
    }

    #[tokio::test]
    async fn shorten_redraws_past_taken_codes() {
        let storage = Arc::new(StorageClient::in_memory());
        storage
            .create_redirect("aaaaaa", "https://old.example/1")
            .await
            .unwrap();
        storage
            .create_redirect("bbbbbb", "https://old.example/2")
            .await
            .unwrap();

        let shortener = Shortener::with_generator(
            storage.clone(),
            test_config(),
            Box::new(ScriptedCodes::new(&["aaaaaa", "bbbbbb", "cccccc"])),
        );

        let link = shortener.shorten("https://example.com").await.unwrap();
        assert_eq!(link.code, "cccccc");
        assert_eq!(link.attempts, 3);

        // Earlier records are untouched
        let first = storage.fetch_redirect("aaaaaa").await.unwrap().unwrap();
        assert_eq!(first.target, "https://old.example/1");
        let third = storage.fetch_redirect("cccccc").await.unwrap().unwrap();
        assert_eq!(third.target, "https://example.com");
    }

    #[tokio::test]
    async fn shorten_gives_up_after_max_attempts() {
        let storage = Arc::new(StorageClient::in_memory());
        storage
            .create_redirect("aaaaaa", "https://old.example")
            .await
            .unwrap();

        let mut config = test_config();
        config.max_attempts = 3;

        let shortener = Shortener::with_generator(
            storage,
            config,
            Box::new(ScriptedCodes::new(&["aaaaaa", "aaaaaa", "aaaaaa"])),
        );

        let err = shortener.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Exhausted { attempts: 3 }));
    }
}
