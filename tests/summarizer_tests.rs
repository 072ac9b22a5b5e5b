use serde_json::{json, Value};
use lunglens::errors::LungLensError;
use lunglens::services::image_summarizer::ImageSummarizer;
use crate::common::{png_request, shared, FakeClassifier};

#[tokio::test]
async fn summary_is_returned() {
    let (fake, classifier) = shared(FakeClassifier::answering(json!({"summary": "A grayscale chest CT slice."})));
    let summary = ImageSummarizer::new(classifier).summarize(&png_request()).await.expect("summary");

    assert_eq!(summary.summary, "A grayscale chest CT slice.");
    assert!(fake.last_prompt().expect("prompt").contains("summarizer"));
}

#[tokio::test]
async fn malformed_summary_is_a_parse_error() {
    let (_, classifier) = shared(FakeClassifier::answering(json!({"caption": "wrong key"})));
    let error = ImageSummarizer::new(classifier).summarize(&png_request()).await.expect_err("malformed");

    assert!(matches!(error, LungLensError::ParseError { .. }));
}

#[tokio::test]
async fn missing_summary_is_no_output() {
    let (_, classifier) = shared(FakeClassifier::silent());
    let error = ImageSummarizer::new(classifier).summarize(&png_request()).await.expect_err("no output");

    assert!(matches!(error, LungLensError::NoOutput { .. }));
}

#[tokio::test]
async fn null_summary_is_no_output() {
    let (_, classifier) = shared(FakeClassifier::answering(Value::Null));
    let error = ImageSummarizer::new(classifier).summarize(&png_request()).await.expect_err("null answer");

    assert!(matches!(error, LungLensError::NoOutput { .. }));
}
