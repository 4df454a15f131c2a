//! Leaf content providers.
//!
//! A leaf box has no structural children. Its content size comes from a
//! [`ContentProvider`], which the solver asks for an [`IntrinsicSize`]
//! whenever the leaf has been marked content-dirty. The leaf then takes part
//! in accumulation exactly like a composite box.

use std::fmt;

use crate::geometry::Size;

/// What a leaf reports about its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntrinsicSize {
    /// Content-box size.
    pub size: Size,
    /// Distance from the content top to the first baseline.
    pub baseline: u32,
    /// Height of one line of this content.
    pub line_height: u32,
}

/// Source of a leaf's intrinsic size.
///
/// `measure` is only called while the leaf is content-dirty, so providers
/// may do real work here (shaping, decoding).
pub trait ContentProvider: fmt::Debug {
    /// Measure the current content.
    fn measure(&mut self) -> IntrinsicSize;
}

/// Content of a known size, such as an icon or a decoded image.
///
/// The baseline sits at the bottom edge, like a replaced element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedContent {
    size: Size,
}

impl FixedContent {
    /// Content of exactly `width` x `height` pixels.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

impl ContentProvider for FixedContent {
    fn measure(&mut self) -> IntrinsicSize {
        IntrinsicSize {
            size: self.size,
            baseline: self.size.height,
            line_height: self.size.height,
        }
    }
}

/// Font metrics interface for text measurement during layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
pub trait FontMetrics: fmt::Debug {
    /// Total advance width of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "The initial value of 'line-height' is 'normal'. We recommend a used
    /// value for 'normal' between 1.0 and 1.2."
    fn line_height(&self, font_size: f32) -> f32;

    /// Height of the glyphs above the baseline.
    fn ascent(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance of Latin glyphs in a proportional font is about 0.6x
/// the font size, and the ascent about 0.8x. Line height uses 1.2x, the
/// upper end of the recommended range for `line-height: normal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }

    fn ascent(&self, font_size: f32) -> f32 {
        const ASCENT_RATIO: f32 = 0.8;
        font_size * ASCENT_RATIO
    }
}

/// A single line of text.
///
/// Line breaking is out of scope; the text is measured as one line.
#[derive(Debug, Clone)]
pub struct TextContent<M = ApproximateFontMetrics> {
    text: String,
    font_size: f32,
    metrics: M,
}

impl TextContent {
    /// Text measured with [`ApproximateFontMetrics`].
    #[must_use]
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self::with_metrics(text, font_size, ApproximateFontMetrics)
    }
}

impl<M: FontMetrics> TextContent<M> {
    /// Text measured with custom metrics.
    #[must_use]
    pub fn with_metrics(text: impl Into<String>, font_size: f32, metrics: M) -> Self {
        Self {
            text: text.into(),
            font_size,
            metrics,
        }
    }

    /// The text being measured.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The owning leaf must be marked content-dirty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl<M: FontMetrics> ContentProvider for TextContent<M> {
    fn measure(&mut self) -> IntrinsicSize {
        let width = self.metrics.text_width(&self.text, self.font_size);
        let line_height = self.metrics.line_height(self.font_size);
        // [§ 10.8.1] "half the leading is added above A and the other half
        // below D"
        let half_leading = (line_height - self.font_size) / 2.0;
        let baseline = half_leading + self.metrics.ascent(self.font_size);
        IntrinsicSize {
            size: Size::new(whole(width), whole(line_height)),
            baseline: whole(baseline),
            line_height: whole(line_height),
        }
    }
}

// Nearest whole pixel.
fn whole(value: f32) -> u32 {
    value.max(0.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_content_baseline_at_bottom() {
        let measured = FixedContent::new(16, 24).measure();
        assert_eq!(measured.size, Size::new(16, 24));
        assert_eq!(measured.baseline, 24);
    }

    #[test]
    fn test_text_content_approximate_metrics() {
        let mut text = TextContent::new("hello", 10.0);
        let measured = text.measure();
        assert_eq!(measured.size, Size::new(30, 12));
        assert_eq!(measured.line_height, 12);
        // half-leading 1 + ascent 8
        assert_eq!(measured.baseline, 9);
    }

    #[test]
    fn test_empty_text_has_line_height() {
        let measured = TextContent::new("", 20.0).measure();
        assert_eq!(measured.size, Size::new(0, 24));
    }
}
