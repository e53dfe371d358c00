//! BoxGenerativeModel -- object-safe dynamic dispatch wrapper for GenerativeModel.
//!
//! 1. Define an object-safe `GenerativeModelDyn` trait with boxed futures
//! 2. Blanket-impl `GenerativeModelDyn` for all `T: GenerativeModel`
//! 3. `BoxGenerativeModel` wraps `Box<dyn GenerativeModelDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use relaychat_types::chat::Turn;
use relaychat_types::llm::{Generation, LlmError};

use super::provider::GenerativeModel;

/// Object-safe version of [`GenerativeModel`] with boxed futures.
pub trait GenerativeModelDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        contents: &'a [Turn],
    ) -> Pin<Box<dyn Future<Output = Result<Generation, LlmError>> + Send + 'a>>;
}

impl<T: GenerativeModel> GenerativeModelDyn for T {
    fn name(&self) -> &str {
        GenerativeModel::name(self)
    }

    fn model(&self) -> &str {
        GenerativeModel::model(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        contents: &'a [Turn],
    ) -> Pin<Box<dyn Future<Output = Result<Generation, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(contents))
    }
}

/// Type-erased generative model for runtime backend selection.
///
/// Lets the application state hold a real provider in production and a
/// scripted double in tests without changing its type.
pub struct BoxGenerativeModel {
    inner: Box<dyn GenerativeModelDyn + Send + Sync>,
}

impl BoxGenerativeModel {
    /// Wrap a concrete `GenerativeModel` in a type-erased box.
    pub fn new<T: GenerativeModel + 'static>(model: T) -> Self {
        Self {
            inner: Box::new(model),
        }
    }
}

impl GenerativeModel for BoxGenerativeModel {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn generate(&self, contents: &[Turn]) -> Result<Generation, LlmError> {
        self.inner.generate_boxed(contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl GenerativeModel for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, contents: &[Turn]) -> Result<Generation, LlmError> {
            let last = contents.last().ok_or(LlmError::EmptyResponse)?;
            Ok(Generation::text(last.text.clone(), "echo-1"))
        }
    }

    #[tokio::test]
    async fn test_boxed_model_delegates() {
        let boxed = BoxGenerativeModel::new(Echo);
        assert_eq!(GenerativeModel::name(&boxed), "echo");
        assert_eq!(GenerativeModel::model(&boxed), "echo-1");

        let generation = boxed.generate(&[Turn::user("ping")]).await.unwrap();
        assert_eq!(generation.text, "ping");

        let err = boxed.generate(&[]).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
