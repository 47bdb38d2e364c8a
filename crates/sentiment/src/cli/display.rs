//! Terminal rendering for the history table and charts

use colored::*;

use crate::cli::coordinator::{TableRow, ViewModel};
use crate::history::projection::{
  label_color, ChartColor, MaxProbabilityProjection, MultiSeriesProjection, AXIS_MAX, AXIS_MIN,
};
use crate::history::PredictionRecord;

pub const HEADING: &str = "FinBERT Sentiment Analysis";
pub const PROMPT: &str = "Enter financial text (English):";
pub const BUSY: &str = "Analyzing...";
pub const REQUIRED_FIELD: &str = "Please fill out this field.";

const TEXT_COLUMN_WIDTH: usize = 48;
const LABEL_COLUMN_WIDTH: usize = 10;
const CHART_WIDTH: usize = 36;
const TREND_BAR_WIDTH: usize = 10;

fn paint(text: &str, color: ChartColor) -> ColoredString {
  text.truecolor(color.red, color.green, color.blue)
}

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    for word in paragraph.split_whitespace() {
      if current_line.is_empty() {
        current_line = word.to_string();
      } else if current_line.chars().count() + 1 + word.chars().count() <= width {
        current_line.push(' ');
        current_line.push_str(word);
      } else {
        lines.push(current_line);
        current_line = word.to_string();
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

/// Number of cells a value occupies on the `[AXIS_MIN, AXIS_MAX]` axis
fn scaled(value: f64, width: usize) -> usize {
  let ratio = ((value - AXIS_MIN) / (AXIS_MAX - AXIS_MIN)).clamp(0.0, 1.0);
  (ratio * width as f64).round() as usize
}

/// History table: text, coloured label, raw confidence
pub fn render_table(rows: &[TableRow]) -> String {
  let mut out = String::new();
  out.push_str(&format!("{}\n", "Prediction History".bold()));

  if rows.is_empty() {
    out.push_str(&format!("{}\n", "No predictions yet.".dimmed()));
    return out;
  }

  out.push_str(&format!(
    "{:<text$}  {:<label$}  {}\n",
    "Text".bold(),
    "Label".bold(),
    "Confidence".bold(),
    text = TEXT_COLUMN_WIDTH,
    label = LABEL_COLUMN_WIDTH,
  ));

  for row in rows {
    let lines = wrap_text(&row.text, TEXT_COLUMN_WIDTH);
    let first = lines.first().cloned().unwrap_or_default();
    let label = format!("{:<width$}", row.label.as_str(), width = LABEL_COLUMN_WIDTH);

    out.push_str(&format!(
      "{:<width$}  {}  {}\n",
      first,
      paint(&label, row.color),
      row.confidence,
      width = TEXT_COLUMN_WIDTH
    ));
    for line in lines.iter().skip(1) {
      out.push_str(&format!("{line}\n"));
    }
  }

  out
}

/// One row per record: a bar up to the point, the coloured point, and the tooltip
pub fn render_max_probability(projection: &MaxProbabilityProjection) -> String {
  let mut out = String::new();
  out.push_str(&format!("{}\n", projection.name.bold()));

  if projection.is_empty() {
    return out;
  }

  let label_width = projection.labels.iter().map(|l| l.len()).max().unwrap_or(2);

  for (index, label) in projection.labels.iter().enumerate() {
    let value = projection.values[index];
    let color = projection.point_colors[index];
    let filled = scaled(value, CHART_WIDTH);

    out.push_str(&format!(
      "{:>lw$} │{}{}{} {}\n",
      label,
      "─".repeat(filled).dimmed(),
      paint("●", color),
      " ".repeat(CHART_WIDTH - filled),
      paint(&projection.tooltips[index], color),
      lw = label_width,
    ));
  }

  out.push_str(&format!(
    "{:>lw$} └{}\n{:>lw$}  {:<half$}{:>half$}\n",
    "",
    "─".repeat(CHART_WIDTH + 1),
    "",
    AXIS_MIN,
    AXIS_MAX,
    lw = label_width,
    half = (CHART_WIDTH + 1) / 2,
  ));

  out
}

/// One row per record with a short bar for each class probability
pub fn render_trend(projection: &MultiSeriesProjection) -> String {
  let mut out = String::new();
  out.push_str(&format!("{}\n", "Prediction History (Line Chart)".bold()));

  if projection.is_empty() {
    return out;
  }

  let legend: Vec<String> = projection
    .series
    .iter()
    .map(|series| paint(&format!("■ {}", series.name), series.border_color).to_string())
    .collect();
  out.push_str(&format!("{}\n", legend.join("  ")));

  let label_width = projection.labels.iter().map(|l| l.len()).max().unwrap_or(2);

  for (index, label) in projection.labels.iter().enumerate() {
    let cells: Vec<String> = projection
      .series
      .iter()
      .map(|series| {
        let value = series.values[index];
        let filled = ((value.clamp(0.0, 1.0)) * TREND_BAR_WIDTH as f64).round() as usize;
        format!(
          "{}{} {:.4}",
          paint(&"█".repeat(filled), series.border_color),
          " ".repeat(TREND_BAR_WIDTH - filled),
          value
        )
      })
      .collect();

    out.push_str(&format!("{:>lw$} {}\n", label, cells.join("  "), lw = label_width));
  }

  out
}

/// The latest prediction of this session
pub fn render_result(record: &PredictionRecord) -> String {
  let color = label_color(&record.label);
  format!(
    "{} {} (confidence {})\n  neutral {:.4} · negative {:.4} · positive {:.4}\n",
    "Result:".bold(),
    paint(record.label.as_str(), color).bold(),
    record.confidence,
    record.neutral_conf,
    record.negative_conf,
    record.positive_conf,
  )
}

pub fn render_error(message: &str) -> String {
  format!("{}\n", message.red())
}

/// Full screen: error or latest result, table, then both charts
pub fn render_view(view: &ViewModel<'_>) -> String {
  let mut out = String::new();

  if view.busy {
    out.push_str(&format!("{}\n\n", BUSY.dimmed()));
  }
  if let Some(error) = view.error {
    out.push_str(&render_error(error));
    out.push('\n');
  }
  if let Some(record) = view.result {
    out.push_str(&render_result(record));
    out.push('\n');
  }

  out.push_str(&render_table(&view.rows));

  if !view.history.is_empty() {
    out.push('\n');
    out.push_str(&render_max_probability(&view.max_probability));
    out.push('\n');
    out.push_str(&render_trend(&view.trend));
  }

  out
}
