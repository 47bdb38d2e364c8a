use mockito::Matcher;
use sentiment::cli::client::{ClientConfig, InferenceClient, Predictor};
use sentiment::error::InferenceError;
use sentiment::history::{Label, PredictionRecord};
use serde_json::json;

fn client(base_url: &str) -> InferenceClient {
  InferenceClient::with_config(ClientConfig { base_url: base_url.to_string(), strict: false })
}

#[tokio::test]
async fn test_successful_prediction_builds_record() {
  let mut proxy = mockito::Server::new_async().await;
  let mock = proxy
    .mock("POST", "/api/predict")
    .match_body(Matcher::Json(json!({ "text": "Stocks rally" })))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(
      json!({
        "text": "Stocks rally",
        "label": "positive",
        "confidence": 0.92,
        "neutral_conf": 0.05,
        "negative_conf": 0.03,
        "positive_conf": 0.92
      })
      .to_string(),
    )
    .expect(1)
    .create_async()
    .await;

  let record = client(&proxy.url()).predict("Stocks rally").await.unwrap();

  assert_eq!(record, PredictionRecord::new("Stocks rally", "positive", 0.92, 0.05, 0.03, 0.92));
  assert_eq!(record.label, Label::Positive);
  assert!(record.is_consistent());
  mock.assert_async().await;
}

#[tokio::test]
async fn test_text_is_sent_as_typed() {
  let mut proxy = mockito::Server::new_async().await;
  let mock = proxy
    .mock("POST", "/api/predict")
    .match_body(Matcher::Json(json!({ "text": "  Stocks rally\t" })))
    .with_status(200)
    .with_body(
      json!({
        "text": "  Stocks rally\t",
        "label": "positive",
        "confidence": 0.92,
        "neutral_conf": 0.05,
        "negative_conf": 0.03,
        "positive_conf": 0.92
      })
      .to_string(),
    )
    .expect(1)
    .create_async()
    .await;

  let record = client(&proxy.url()).predict("  Stocks rally\t").await.unwrap();

  assert_eq!(record.text, "  Stocks rally\t");
  mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_propagates_proxy_message() {
  let mut proxy = mockito::Server::new_async().await;
  let mock = proxy
    .mock("POST", "/api/predict")
    .with_status(500)
    .with_header("content-type", "application/json")
    .with_body(r#"{"error":"Request failed with status code 500"}"#)
    .expect(1)
    .create_async()
    .await;

  let error = client(&proxy.url()).predict("Stocks rally").await.unwrap_err();

  assert_eq!(error, InferenceError::upstream("Request failed with status code 500"));
  // One attempt, no retry
  mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_without_message_uses_generic_text() {
  let mut proxy = mockito::Server::new_async().await;
  let _mock = proxy.mock("POST", "/api/predict").with_status(502).create_async().await;

  let error = client(&proxy.url()).predict("Stocks rally").await.unwrap_err();
  assert_eq!(error.message(), "Request failed");
}

#[tokio::test]
async fn test_malformed_payload_is_an_upstream_error() {
  let mut proxy = mockito::Server::new_async().await;
  let _mock = proxy
    .mock("POST", "/api/predict")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"label":"positive"}"#)
    .create_async()
    .await;

  let error = client(&proxy.url()).predict("Stocks rally").await.unwrap_err();
  assert!(matches!(error, InferenceError::Upstream { .. }));
  assert!(error.message().starts_with("Malformed prediction response"));
}

#[tokio::test]
async fn test_unreachable_proxy_is_a_transport_error() {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let error = client(&format!("http://{addr}")).predict("Stocks rally").await.unwrap_err();
  assert!(matches!(error, InferenceError::Transport { .. }));
  assert!(error.message().starts_with("Request failed"));
}

#[tokio::test]
async fn test_strict_mode_downgrades_overridden_labels() {
  let mut proxy = mockito::Server::new_async().await;
  let _mock = proxy
    .mock("POST", "/api/predict")
    .with_status(200)
    .with_body(
      json!({
        "text": "Fraud probe widens",
        "label": "negative",
        "confidence": 0.55,
        "neutral_conf": 0.1,
        "negative_conf": 0.35,
        "positive_conf": 0.55
      })
      .to_string(),
    )
    .expect(2)
    .create_async()
    .await;

  let lenient = client(&proxy.url());
  assert!(lenient.predict("Fraud probe widens").await.is_ok());

  let strict = InferenceClient::with_config(ClientConfig { base_url: proxy.url(), strict: true });
  let error = strict.predict("Fraud probe widens").await.unwrap_err();
  assert!(error.message().starts_with("Inconsistent prediction"));
}
