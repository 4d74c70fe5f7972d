//! Terminal display width helpers.
//!
//! Gives terminal hosts an ANSI-aware way to measure text items before they
//! are handed to the packer.

use crate::geometry::Size;

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Measure a text label in cells: widest line plus horizontal padding on both
/// sides, one row per line. Empty text measures as zero width so it stays out
/// of the flow.
pub fn measure_label(text: &str, padding: u16) -> Size {
    let widest = text.lines().map(display_width).max().unwrap_or(0);
    if widest == 0 {
        return Size::ZERO;
    }
    let rows = text.lines().count().max(1);
    Size::new(
        (widest + 2 * padding as usize) as f32,
        rows as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_take_no_width() {
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("标签"), 4);
    }

    #[test]
    fn label_includes_padding() {
        assert_eq!(measure_label("Swift", 1), Size::new(7.0, 1.0));
        assert_eq!(measure_label("two\nlines!", 0), Size::new(6.0, 2.0));
    }

    #[test]
    fn empty_label_is_unmeasured() {
        assert!(!measure_label("", 2).is_measured());
    }
}
