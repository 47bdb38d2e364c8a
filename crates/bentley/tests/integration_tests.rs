use bentley::*;

#[test]
fn test_basic_logging_functions() {
  // Logging functions write to stderr and must never panic
  info("Loaded 3 predictions from history");
  warn("History slot could not be written");
  error("Request failed");
  debug("Debug output is hidden unless verbose");
  success("Prediction stored");
  announce("FinBERT Sentiment Analysis");
}

#[test]
fn test_macros_accept_format_arguments() {
  let count = 2;
  bentley::info!("Loaded {count} predictions");
  bentley::warn!("Slot {} unreadable: {}", "sentiment_history", "permission denied");
  bentley::success!("Stored prediction #{}", count + 1);
}

#[test]
fn test_multiline_messages() {
  let multiline_msg = "First line\nSecond line\nThird line";
  info(multiline_msg);
  warn(multiline_msg);
  error(multiline_msg);
  success(multiline_msg);
}
