//! Terminal cell widths for grapheme clusters.
//!
//! All width decisions flow through [`egc_width`]. Tabs are not handled here;
//! the renderer expands them before measuring.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width in terminal cells of a single extended grapheme cluster.
///
/// Clusters that contain an emoji presentation selector or a ZWJ sequence are
/// widened to 2 so the cursor never drifts left of the glyph.
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    let base = UnicodeWidthStr::width(egc);
    let widen = egc.contains('\u{FE0F}') || egc.contains('\u{200D}');
    let width = if widen { base.max(2) } else { base };
    width.clamp(1, 2) as u16
}

/// Sum of cluster widths for a whole string.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(|g| egc_width(g) as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn wide_cjk() {
        assert_eq!(egc_width("界"), 2);
        assert_eq!(display_width("a界"), 3);
    }

    #[test]
    fn emoji_basic() {
        assert_eq!(egc_width("😀"), 2);
    }

    #[test]
    fn combining_acute() {
        assert_eq!(egc_width("e\u{0301}"), 1);
    }

    #[test]
    fn zwj_family_is_one_wide_cluster() {
        assert_eq!(display_width("👨\u{200D}👩\u{200D}👧"), 2);
    }
}
