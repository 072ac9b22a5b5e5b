use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use mockall::mock;
use serde_json::Value;
use lunglens::enums::ai_provider_error::AiProviderError;
use lunglens::structs::analysis_request::AnalysisRequest;
use lunglens::structs::data_uri::DataUri;
use lunglens::traits::classifier::Classifier;

mock! {
    pub Model {}

    #[async_trait]
    impl Classifier for Model {
        fn name(&self) -> &str;
        async fn generate(&self, prompt: &str, image: &DataUri) -> Result<Option<Value>, AiProviderError>;
    }
}

/// Replays a fixed answer and remembers what it was asked.
pub struct FakeClassifier {
    answer: Result<Option<Value>, AiProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeClassifier {
    pub fn answering(value: Value) -> Self {
        Self::with(Ok(Some(value)))
    }

    pub fn silent() -> Self {
        Self::with(Ok(None))
    }

    pub fn failing(error: AiProviderError) -> Self {
        Self::with(Err(error))
    }

    fn with(answer: Result<Option<Value>, AiProviderError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, prompt: &str, _image: &DataUri) -> Result<Option<Value>, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt lock") = Some(prompt.to_string());
        self.answer.clone()
    }
}

/// A model that never answers within a test's lifetime.
pub struct StalledClassifier;

#[async_trait]
impl Classifier for StalledClassifier {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn generate(&self, _prompt: &str, _image: &DataUri) -> Result<Option<Value>, AiProviderError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(None)
    }
}

pub fn shared(fake: FakeClassifier) -> (Arc<FakeClassifier>, Arc<dyn Classifier>) {
    let fake = Arc::new(fake);
    let classifier: Arc<dyn Classifier> = fake.clone();
    (fake, classifier)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

pub fn png_data_uri() -> DataUri {
    DataUri::from_bytes("image/png", &png_bytes(4, 3))
}

pub fn png_request() -> AnalysisRequest {
    AnalysisRequest::from_data_uri(&png_data_uri())
}
