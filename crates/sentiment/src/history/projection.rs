//! Chart projections over a history snapshot
//!
//! Both projections are pure: the same history always yields the same
//! series. Every series is aligned 1:1 with the positional labels `#1..#n`.

use std::fmt;

use crate::history::{History, Label};

/// Lower bound of the max-probability value axis
pub const AXIS_MIN: f64 = 0.0;
/// Upper bound of the max-probability value axis, leaving room past 1.0
pub const AXIS_MAX: f64 = 1.2;

/// Name of the single max-probability dataset
pub const MAX_PROBABILITY_SERIES: &str = "Predicted Max Probability";

/// An RGBA colour as used by chart renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColor {
  pub red: u8,
  pub green: u8,
  pub blue: u8,
  pub alpha: f32,
}

impl ChartColor {
  pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
    Self { red, green, blue, alpha }
  }

  /// The same colour with a different alpha
  pub const fn with_alpha(self, alpha: f32) -> Self {
    Self { alpha, ..self }
  }

  /// CSS notation, e.g. `rgba(54, 162, 235, 1)`
  pub fn css(&self) -> String {
    format!("rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
  }
}

impl fmt::Display for ChartColor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.css())
  }
}

pub const NEUTRAL_COLOR: ChartColor = ChartColor::rgba(54, 162, 235, 1.0);
pub const NEGATIVE_COLOR: ChartColor = ChartColor::rgba(255, 99, 132, 1.0);
pub const POSITIVE_COLOR: ChartColor = ChartColor::rgba(75, 192, 192, 1.0);
/// `#333`, used for labels outside the three known classes
pub const DEFAULT_COLOR: ChartColor = ChartColor::rgba(51, 51, 51, 1.0);

const BACKGROUND_ALPHA: f32 = 0.2;

/// Colour for a predicted label; unknown labels get [`DEFAULT_COLOR`]
pub fn label_color(label: &Label) -> ChartColor {
  match label {
    Label::Neutral => NEUTRAL_COLOR,
    Label::Negative => NEGATIVE_COLOR,
    Label::Positive => POSITIVE_COLOR,
    Label::Other(_) => DEFAULT_COLOR,
  }
}

/// Positional labels `#1..#n`
pub fn point_labels(count: usize) -> Vec<String> {
  (1..=count).map(|index| format!("#{index}")).collect()
}

/// Tooltip text for a max-probability point, e.g. `positive (92.00%)`
///
/// The percentage is rounded to two places with ties going up.
pub fn tooltip(label: &Label, max_probability: f64) -> String {
  let percent = (max_probability * 10_000.0).round() / 100.0;
  format!("{label} ({percent:.2}%)")
}

/// One named numeric series
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
  pub name: String,
  pub values: Vec<f64>,
  pub border_color: ChartColor,
  pub background_color: ChartColor,
}

/// Neutral/negative/positive probabilities across the whole history
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSeriesProjection {
  pub labels: Vec<String>,
  pub series: Vec<Series>,
}

impl MultiSeriesProjection {
  pub fn len(&self) -> usize {
    self.labels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }

  /// Series by name (`Neutral`, `Negative`, `Positive`)
  pub fn series(&self, name: &str) -> Option<&Series> {
    self.series.iter().find(|series| series.name == name)
  }
}

/// Highest class probability per record, coloured by predicted label
#[derive(Debug, Clone, PartialEq)]
pub struct MaxProbabilityProjection {
  pub name: String,
  pub labels: Vec<String>,
  pub values: Vec<f64>,
  pub point_colors: Vec<ChartColor>,
  pub tooltips: Vec<String>,
}

impl MaxProbabilityProjection {
  pub fn len(&self) -> usize {
    self.labels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }
}

fn series_name(label: &Label) -> &'static str {
  match label {
    Label::Neutral => "Neutral",
    Label::Negative => "Negative",
    Label::Positive => "Positive",
    Label::Other(_) => "Other",
  }
}

/// Project the three class probabilities into aligned series
pub fn multi_series(history: &History) -> MultiSeriesProjection {
  let series = Label::CLASSES
    .iter()
    .enumerate()
    .map(|(class, label)| {
      let color = label_color(label);
      Series {
        name: series_name(label).to_string(),
        values: history.iter().map(|record| record.class_scores()[class].1).collect(),
        border_color: color,
        background_color: color.with_alpha(BACKGROUND_ALPHA),
      }
    })
    .collect();

  MultiSeriesProjection { labels: point_labels(history.len()), series }
}

/// Project each record to its highest class probability
pub fn max_probability(history: &History) -> MaxProbabilityProjection {
  let values: Vec<f64> = history.iter().map(|record| record.max_probability()).collect();

  MaxProbabilityProjection {
    name: MAX_PROBABILITY_SERIES.to_string(),
    labels: point_labels(history.len()),
    point_colors: history.iter().map(|record| label_color(&record.label)).collect(),
    tooltips: history
      .iter()
      .zip(&values)
      .map(|(record, value)| tooltip(&record.label, *value))
      .collect(),
    values,
  }
}
