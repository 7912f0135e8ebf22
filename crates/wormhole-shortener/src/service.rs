use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use wormhole_core::{Repository, ShortCode, Shortener, ShortenerError};
use wormhole_generator::Generator;

/// How many generated codes are tried before giving up on a create.
pub const MAX_GENERATE_ATTEMPTS: usize = 8;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` and decides which
/// short code a new URL is stored under:
/// - By default every create draws a fresh code from the generator and
///   claims it with [`Repository::insert_if_absent`], retrying on collision.
/// - With a fixed code configured (see [`ShortenerService::with_fixed_code`])
///   every create writes that one code, overwriting the previous URL.
///   This is a legacy mode kept for scripted tests and demos.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    fixed_code: Option<ShortCode>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            fixed_code: self.fixed_code.clone(),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` generating a code per create.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            fixed_code: None,
        }
    }

    /// Switches the service to the legacy fixed-code mode.
    pub fn with_fixed_code(mut self, code: ShortCode) -> Self {
        self.fixed_code = Some(code);
        self
    }

    /// Returns the fixed code, if the service runs in fixed-code mode.
    pub fn fixed_code(&self) -> Option<&ShortCode> {
        self.fixed_code.as_ref()
    }

    async fn claim_generated_code(
        &self,
        original_url: String,
    ) -> Result<ShortCode, ShortenerError> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code: ShortCode = self.generator.generate().into();
            if self
                .repository
                .insert_if_absent(&code, original_url.clone())
                .await?
            {
                return Ok(code);
            }
            warn!(code = %code, attempt, "generated short code already taken");
        }

        Err(ShortenerError::CodeSpaceExhausted {
            attempts: MAX_GENERATE_ATTEMPTS,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: String) -> Result<ShortCode, ShortenerError> {
        let code = match &self.fixed_code {
            Some(code) => {
                self.repository.insert(code, original_url).await?;
                code.clone()
            }
            None => self.claim_generated_code(original_url).await?,
        };

        debug!(code = %code, "stored short code");
        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>, ShortenerError> {
        let original_url = self.repository.get(code).await?;
        match &original_url {
            Some(url) => debug!(code = %code, url = %url, "resolved short code"),
            None => trace!(code = %code, "short code not found"),
        }
        Ok(original_url)
    }
}
