use std::sync::Arc;
use proptest::prelude::*;
use serde_json::{json, Value};
use lunglens::config::constants::{DEGRADED_EXPLANATION, ERROR_EXPLANATION};
use lunglens::enums::ai_provider_error::AiProviderError;
use lunglens::enums::analysis_outcome::AnalysisOutcome;
use lunglens::enums::prediction::Prediction;
use lunglens::enums::request_state::RequestState;
use lunglens::errors::LungLensError;
use lunglens::services::ct_scan_analyzer::CtScanAnalyzer;
use lunglens::structs::analysis_request::AnalysisRequest;
use lunglens::structs::analysis_result::AnalysisResult;
use crate::common::{png_request, shared, FakeClassifier, MockModel};

fn analyzer_answering(value: Value) -> CtScanAnalyzer {
    let (_, classifier) = shared(FakeClassifier::answering(value));
    CtScanAnalyzer::new(classifier)
}

fn assert_degraded_to(outcome: &AnalysisOutcome, prediction: Prediction) {
    assert!(outcome.is_degraded(), "expected a degraded outcome, got {:?}", outcome);
    assert_eq!(outcome.result(), &AnalysisResult::degraded(prediction));
    assert_eq!(outcome.result().explanation.as_deref(), Some(DEGRADED_EXPLANATION));
    assert!(outcome.result().confidence_score.is_none());
    assert!(outcome.result().probabilities.is_none());
}

#[tokio::test]
async fn well_formed_output_is_returned_unchanged() {
    let raw = json!({
        "prediction": "Malignant",
        "confidenceScore": 0.92,
        "probabilities": {"normal": 0.03, "malignant": 0.92, "benign": 0.05}
    });

    let outcome = analyzer_answering(raw.clone()).classify(&png_request()).await.expect("outcome");

    let AnalysisOutcome::Validated(result) = outcome else {
        panic!("expected a validated outcome");
    };
    assert_eq!(serde_json::to_value(&result).expect("serialize"), raw);
}

#[tokio::test]
async fn every_label_round_trips() {
    for prediction in Prediction::ALL {
        let raw = json!({"prediction": prediction.as_str(), "explanation": "Clear lung fields."});
        let outcome = analyzer_answering(raw).classify(&png_request()).await.expect("outcome");

        assert_eq!(outcome.request_state(), RequestState::Succeeded);
        assert_eq!(outcome.result().prediction, prediction);
        assert_eq!(outcome.result().explanation.as_deref(), Some("Clear lung fields."));
    }
}

#[tokio::test]
async fn unknown_label_degrades_to_normal() {
    let outcome = analyzer_answering(json!({"prediction": "Unknown"}))
        .classify(&png_request())
        .await
        .expect("outcome");

    assert_degraded_to(&outcome, Prediction::Normal);
    assert_eq!(outcome.request_state(), RequestState::Degraded);
}

#[tokio::test]
async fn missing_label_degrades_to_normal() {
    let outcome = analyzer_answering(json!({"explanation": "Looks fine", "confidenceScore": 0.5}))
        .classify(&png_request())
        .await
        .expect("outcome");

    assert_degraded_to(&outcome, Prediction::Normal);
}

#[tokio::test]
async fn bad_score_keeps_a_valid_label() {
    let outcome = analyzer_answering(json!({"prediction": "Benign", "confidenceScore": 1.3}))
        .classify(&png_request())
        .await
        .expect("outcome");

    assert_degraded_to(&outcome, Prediction::Benign);
}

#[tokio::test]
async fn incomplete_probabilities_degrade() {
    let outcome = analyzer_answering(json!({
        "prediction": "Malignant",
        "probabilities": {"normal": 0.1, "malignant": 0.9}
    }))
    .classify(&png_request())
    .await
    .expect("outcome");

    assert_degraded_to(&outcome, Prediction::Malignant);
}

#[tokio::test]
async fn unparseable_text_degrades() {
    let outcome = analyzer_answering(Value::String("I cannot classify this image.".to_string()))
        .classify(&png_request())
        .await
        .expect("outcome");

    assert_degraded_to(&outcome, Prediction::Normal);
}

#[tokio::test]
async fn probabilities_are_not_renormalized() {
    let raw = json!({
        "prediction": "Normal",
        "probabilities": {"normal": 0.6, "malignant": 0.6, "benign": 0.6}
    });
    let outcome = analyzer_answering(raw).classify(&png_request()).await.expect("outcome");

    let probabilities = outcome.result().probabilities.clone().expect("probabilities");
    assert!(!outcome.is_degraded());
    assert!((probabilities.sum() - 1.8).abs() < 1e-9);
}

#[tokio::test]
async fn no_output_is_a_hard_failure() {
    let (fake, classifier) = shared(FakeClassifier::silent());
    let error = CtScanAnalyzer::new(classifier)
        .classify(&png_request())
        .await
        .expect_err("no output");

    assert!(matches!(error, LungLensError::NoOutput { .. }));
    assert!(error.user_message().contains("AI failed to provide an output."));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn null_answer_is_no_output() {
    let (fake, classifier) = shared(FakeClassifier::answering(Value::Null));
    let error = CtScanAnalyzer::new(classifier)
        .classify(&png_request())
        .await
        .expect_err("null answer");

    assert!(matches!(error, LungLensError::NoOutput { .. }));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn empty_payload_never_reaches_the_model() {
    let (fake, classifier) = shared(FakeClassifier::answering(json!({"prediction": "Normal"})));
    let analyzer = CtScanAnalyzer::new(classifier);

    for payload in ["", "not a data uri", "data:image/png;base64,"] {
        let error = analyzer.classify(&AnalysisRequest::new(payload)).await.expect_err("invalid payload");
        assert!(matches!(error, LungLensError::ValidationError { .. }));
    }
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn the_ct_scan_prompt_is_sent() {
    let (fake, classifier) = shared(FakeClassifier::answering(json!({"prediction": "Normal"})));
    CtScanAnalyzer::new(classifier).classify(&png_request()).await.expect("outcome");

    let prompt = fake.last_prompt().expect("prompt");
    assert!(prompt.contains("Normal, Malignant, or Benign"));
    assert!(prompt.contains("confidenceScore"));
}

#[tokio::test]
async fn provider_failures_show_the_error_result() {
    let (_, classifier) = shared(FakeClassifier::failing(AiProviderError::NetworkError("connection reset".to_string())));
    let analyzer = CtScanAnalyzer::new(classifier);

    let error = analyzer.classify(&png_request()).await.expect_err("provider failure");
    assert!(matches!(error, LungLensError::ProviderError { .. }));

    let (result, state) = analyzer.analyze_for_display(&png_request()).await;
    assert_eq!(state, RequestState::Failed);
    assert_eq!(result.prediction, Prediction::Normal);
    assert_eq!(result.explanation.as_deref(), Some(ERROR_EXPLANATION));
    assert!(result.is_error());
}

#[tokio::test]
async fn mocked_classifier_is_called_once_with_the_image() {
    let mut model = MockModel::new();
    model.expect_name().return_const("mock".to_string());
    model
        .expect_generate()
        .withf(|_, image| image.mime_type() == "image/png")
        .times(1)
        .returning(|_, _| Ok(Some(json!({"prediction": "Benign", "confidenceScore": 0.75}))));

    let analyzer = CtScanAnalyzer::new(Arc::new(model));
    let (result, state) = analyzer.analyze_for_display(&png_request()).await;

    assert_eq!(state, RequestState::Succeeded);
    assert_eq!(result.prediction, Prediction::Benign);
    assert_eq!(result.confidence_score, Some(0.75));
    assert!(!result.is_error());
}

proptest! {
    #[test]
    fn out_of_range_scores_always_degrade(score in prop_oneof![-1000.0f64..-1e-6, 1.000_001f64..1000.0]) {
        let outcome = CtScanAnalyzer::apply_contract(&json!({"prediction": "Malignant", "confidenceScore": score}));
        prop_assert!(outcome.is_degraded());
        prop_assert_eq!(outcome.result().prediction, Prediction::Malignant);
        prop_assert!(outcome.result().confidence_score.is_none());
    }

    #[test]
    fn out_of_range_probability_degrades(
        index in 0usize..3,
        bad in prop_oneof![-10.0f64..-1e-6, 1.000_001f64..10.0],
    ) {
        let mut probabilities = json!({"normal": 0.1, "malignant": 0.2, "benign": 0.7});
        let key = ["normal", "malignant", "benign"][index];
        probabilities[key] = json!(bad);

        let outcome = CtScanAnalyzer::apply_contract(&json!({
            "prediction": "Benign",
            "confidenceScore": 0.7,
            "probabilities": probabilities
        }));
        prop_assert!(outcome.is_degraded());
        prop_assert_eq!(outcome.result().prediction, Prediction::Benign);
        prop_assert!(outcome.result().confidence_score.is_none());
        prop_assert!(outcome.result().probabilities.is_none());
    }

    #[test]
    fn in_range_probabilities_validate(normal in 0.0f64..=1.0, malignant in 0.0f64..=1.0, benign in 0.0f64..=1.0) {
        let raw = json!({
            "prediction": "Normal",
            "probabilities": {"normal": normal, "malignant": malignant, "benign": benign}
        });
        let outcome = CtScanAnalyzer::apply_contract(&raw);
        prop_assert!(!outcome.is_degraded());
    }

    #[test]
    fn other_labels_fall_back_to_normal(label in "[a-zA-Z]{1,12}") {
        prop_assume!(Prediction::from_label(&label).is_none());
        let outcome = CtScanAnalyzer::apply_contract(&json!({"prediction": label}));
        prop_assert_eq!(outcome.result(), &AnalysisResult::degraded(Prediction::Normal));
    }

    #[test]
    fn blocking_runtime_matches_apply_contract(score in 0.0f64..=1.0) {
        let analyzer = analyzer_answering(json!({"prediction": "Benign", "confidenceScore": score}));
        let outcome = tokio_test::block_on(analyzer.classify(&png_request())).expect("outcome");
        prop_assert_eq!(outcome.result().confidence_score, Some(score));
    }
}
