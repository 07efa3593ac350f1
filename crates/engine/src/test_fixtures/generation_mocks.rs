//! Mock question generators for testing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::generation_mocks::ScriptedGenerator;
//!
//! #[tokio::test]
//! async fn test_turn_flow() {
//!     let generator = Arc::new(ScriptedGenerator::always_ok("Test question?"));
//!     // ... wire into TurnOrchestrator
//!     assert_eq!(generator.call_count(), 1);
//! }
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::infrastructure::ports::{GenerationError, GenerationPort};

/// Generator that replays a script of results and records every prompt.
///
/// When the script runs out, the last scripted result repeats.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    last: Mutex<Option<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicUsize,
    available: bool,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            available: true,
        }
    }

    pub fn always_ok(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn always_err(error: GenerationError) -> Self {
        let mut generator = Self::new(vec![Err(error)]);
        generator.available = false;
        generator
    }

    /// Get the number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationPort for ScriptedGenerator {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(instruction.to_string());

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(GenerationError::malformed("script exhausted"))),
        }
    }

    async fn check_availability(&self) -> bool {
        self.available
    }
}

/// Scripted generator that sleeps before answering, so a request stays in
/// flight long enough for overlapping events to land.
pub struct DelayedGenerator {
    delay: Duration,
    inner: ScriptedGenerator,
}

impl DelayedGenerator {
    pub fn new(delay: Duration, script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            delay,
            inner: ScriptedGenerator::new(script),
        }
    }

    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }
}

#[async_trait]
impl GenerationPort for DelayedGenerator {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        self.inner.generate(instruction).await
    }

    async fn check_availability(&self) -> bool {
        self.inner.check_availability().await
    }
}

/// Generator whose calls never resolve, for abandoned-request tests.
#[derive(Default)]
pub struct PendingGenerator {
    call_count: AtomicUsize,
}

impl PendingGenerator {
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationPort for PendingGenerator {
    async fn generate(&self, _instruction: &str) -> Result<String, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn check_availability(&self) -> bool {
        false
    }
}
