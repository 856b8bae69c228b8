//! Text metrics used to center the gauge label.

/// Font metrics supplied by the host's text engine.
///
/// `ascent` is negative (distance above the baseline) and `descent` positive.
pub trait TextMeasure: Send + Sync {
    fn measure_text(&self, text: &str, size: f32) -> f32;
    fn ascent(&self, size: f32) -> f32;
    fn descent(&self, size: f32) -> f32;
}

/// Fixed-advance approximation for hosts without a text engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMetrics {
    /// Glyph advance as a fraction of the text size.
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for ApproxTextMetrics {
    fn default() -> Self {
        Self {
            advance: 0.55,
            ascent: 0.93,
            descent: 0.24,
        }
    }
}

impl TextMeasure for ApproxTextMetrics {
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }

    fn ascent(&self, size: f32) -> f32 {
        -self.ascent * size
    }

    fn descent(&self, size: f32) -> f32 {
        self.descent * size
    }
}
