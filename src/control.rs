//! A slider and a text field bound to the same value.
//!
//! Moving the slider rewrites the text; typing into the field moves the slider
//! as soon as the text parses. While the text does not parse the slider keeps
//! its last position and [`BoundControl::value`] reports `None`.

use serde::{Deserialize, Serialize};

/// Longest text a field accepts from typing.
pub const MAX_TEXT_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldRange {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Snaps to the nearest step counted from `min`, then clamps.
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(value);
        }
        let steps = ((value - self.min) / self.step).round();
        // trim float noise like 8.600000000000001
        let snapped = ((self.min + steps * self.step) * 1e6).round() / 1e6;
        self.clamp(snapped)
    }
}

#[derive(Debug, Clone)]
pub struct BoundControl {
    label: &'static str,
    range: FieldRange,
    slider: f64,
    text: String,
}

impl BoundControl {
    pub fn new(label: &'static str, range: FieldRange, initial: f64) -> Self {
        let slider = range.clamp(initial);
        Self {
            label,
            range,
            slider,
            text: format_value(initial),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn range(&self) -> FieldRange {
        self.range
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slider(&self) -> f64 {
        self.slider
    }

    /// The value both controls agree on, or `None` while the field is mid-edit.
    pub fn value(&self) -> Option<f64> {
        self.text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn set_from_slider(&mut self, value: f64) {
        self.slider = self.range.snap(value);
        self.text = format_value(self.slider);
    }

    pub fn step_up(&mut self, multiplier: u32) {
        let base = self.value().unwrap_or(self.slider);
        self.set_from_slider(base + self.range.step * f64::from(multiplier));
    }

    pub fn step_down(&mut self, multiplier: u32) {
        let base = self.value().unwrap_or(self.slider);
        self.set_from_slider(base - self.range.step * f64::from(multiplier));
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.sync_slider();
    }

    /// Accepts digits and a single decimal point, up to [`MAX_TEXT_LEN`].
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = self.text.len() < MAX_TEXT_LEN
            && (c.is_ascii_digit() || (c == '.' && !self.text.contains('.')));
        if accepted {
            self.text.push(c);
            self.sync_slider();
        }
        accepted
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
        self.sync_slider();
    }

    /// Position of the slider thumb in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        let span = self.range.max - self.range.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.slider - self.range.min) / span).clamp(0.0, 1.0)
    }

    fn sync_slider(&mut self) {
        if let Some(value) = self.value() {
            // a native range input clamps out-of-range values
            self.slider = self.range.clamp(value);
        }
    }
}

fn format_value(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
