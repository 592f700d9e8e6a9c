//! Inline styles and per-block style ranges.
//!
//! Styles are stored as half-open character ranges. Ranges of the same style are kept
//! normalized (sorted, never overlapping, never touching), while ranges of different styles may
//! overlap freely.

use std::collections::BTreeSet;
use std::fmt;

/// An inline style name.
///
/// The well-known names match the rich-text raw format (`BOLD`, `COLOR_RED`, ...). Any other
/// name is carried through unchanged as [`InlineStyle::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStyle {
    /// `BOLD`
    Bold,
    /// `ITALIC`
    Italic,
    /// `UNDERLINE`
    Underline,
    /// `STRIKETHROUGH`
    Strikethrough,
    /// `CODE`
    Code,
    /// `COLOR_RED`
    ColorRed,
    /// Any other style name.
    Custom(String),
}

impl InlineStyle {
    /// The style's name as used by the style map and the raw format.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::Code => "CODE",
            Self::ColorRed => "COLOR_RED",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for InlineStyle {
    fn from(name: &str) -> Self {
        match name {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "UNDERLINE" => Self::Underline,
            "STRIKETHROUGH" => Self::Strikethrough,
            "CODE" => Self::Code,
            "COLOR_RED" => Self::ColorRed,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One styled range `[start, end)` in character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRange {
    /// The applied style.
    pub style: InlineStyle,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl StyleRange {
    /// Create a new range with `[start, end)` offsets.
    pub fn new(style: InlineStyle, start: usize, end: usize) -> Self {
        Self { style, start, end }
    }

    /// Check if the range contains a specific offset.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if two ranges overlap.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The normalized set of style ranges belonging to one block.
///
/// All operations return a new value; a `StyleRanges` is never modified after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRanges {
    /// Sorted by `(style, start)`; same-style ranges are disjoint and non-adjacent.
    ranges: Vec<StyleRange>,
}

impl StyleRanges {
    /// An empty range set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalized set from arbitrary ranges. Empty ranges are dropped.
    pub fn from_ranges(ranges: impl IntoIterator<Item = StyleRange>) -> Self {
        Self {
            ranges: normalize(ranges.into_iter().collect()),
        }
    }

    /// All ranges, sorted by style then start offset.
    pub fn ranges(&self) -> &[StyleRange] {
        &self.ranges
    }

    /// Number of stored ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` when no style is applied anywhere.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Styles applied to the character at `offset`.
    pub fn styles_at(&self, offset: usize) -> BTreeSet<InlineStyle> {
        self.ranges
            .iter()
            .filter(|r| r.contains(offset))
            .map(|r| r.style.clone())
            .collect()
    }

    /// Returns `true` if every character of `[start, end)` carries `style`.
    ///
    /// An empty range is never considered covered.
    pub fn covers(&self, style: &InlineStyle, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        // Same-style ranges are merged, so one range must span the whole interval.
        self.ranges
            .iter()
            .any(|r| &r.style == style && r.start <= start && end <= r.end)
    }

    /// Apply `style` over `[start, end)`.
    pub fn apply(&self, style: &InlineStyle, start: usize, end: usize) -> Self {
        if start >= end {
            return self.clone();
        }
        let mut ranges = self.ranges.clone();
        ranges.push(StyleRange::new(style.clone(), start, end));
        Self {
            ranges: normalize(ranges),
        }
    }

    /// Remove `style` from `[start, end)`, splitting ranges that extend past either side.
    pub fn remove(&self, style: &InlineStyle, start: usize, end: usize) -> Self {
        if start >= end {
            return self.clone();
        }
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        for range in &self.ranges {
            if &range.style != style || !range.overlaps(start, end) {
                ranges.push(range.clone());
                continue;
            }
            if range.start < start {
                ranges.push(StyleRange::new(range.style.clone(), range.start, start));
            }
            if end < range.end {
                ranges.push(StyleRange::new(range.style.clone(), end, range.end));
            }
        }
        Self {
            ranges: normalize(ranges),
        }
    }

    /// Toggle `style` over `[start, end)`: remove it when the whole range already carries it,
    /// apply it otherwise.
    pub fn toggle(&self, style: &InlineStyle, start: usize, end: usize) -> Self {
        if self.covers(style, start, end) {
            self.remove(style, start, end)
        } else {
            self.apply(style, start, end)
        }
    }

    /// Adjust offsets for the deletion of `[start, end)` from the block text.
    pub fn remove_text(&self, start: usize, end: usize) -> Self {
        if start >= end {
            return self.clone();
        }
        let removed = end - start;
        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        Self::from_ranges(
            self.ranges
                .iter()
                .map(|r| StyleRange::new(r.style.clone(), map(r.start), map(r.end))),
        )
    }

    /// Adjust offsets for `len` characters inserted at `at`, styling them with `styles`.
    pub fn insert_text(&self, at: usize, len: usize, styles: &BTreeSet<InlineStyle>) -> Self {
        if len == 0 {
            return self.clone();
        }
        // A range strictly containing the insertion point grows over the new text; one ending
        // exactly at it does not.
        let map_start = |x: usize| if x < at { x } else { x + len };
        let map_end = |x: usize| if x <= at { x } else { x + len };
        let shifted = self
            .ranges
            .iter()
            .map(|r| StyleRange::new(r.style.clone(), map_start(r.start), map_end(r.end)));
        let inherited = styles
            .iter()
            .map(|style| StyleRange::new(style.clone(), at, at + len));
        let mut next = Self::from_ranges(shifted.chain(inherited));
        for range in &self.ranges {
            if range.start < at && at < range.end && !styles.contains(&range.style) {
                next = next.remove(&range.style, at, at + len);
            }
        }
        next
    }

    /// Split at `at`: ranges left of the split point, and ranges right of it re-based to 0.
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let left = self
            .ranges
            .iter()
            .filter(|r| r.start < at)
            .map(|r| StyleRange::new(r.style.clone(), r.start, r.end.min(at)));
        let right = self
            .ranges
            .iter()
            .filter(|r| r.end > at)
            .map(|r| StyleRange::new(r.style.clone(), r.start.max(at) - at, r.end - at));
        (Self::from_ranges(left), Self::from_ranges(right))
    }

    /// Append `other`, whose offsets start at `offset` in the combined text.
    pub fn concat(&self, other: &StyleRanges, offset: usize) -> Self {
        let shifted = other
            .ranges
            .iter()
            .map(|r| StyleRange::new(r.style.clone(), r.start + offset, r.end + offset));
        Self::from_ranges(self.ranges.iter().cloned().chain(shifted))
    }

    /// Keep only ranges inside `[0, len)`, clipping those that extend past it.
    pub fn truncate(&self, len: usize) -> Self {
        Self::from_ranges(
            self.ranges
                .iter()
                .filter(|r| r.start < len)
                .map(|r| StyleRange::new(r.style.clone(), r.start, r.end.min(len))),
        )
    }
}

fn normalize(mut ranges: Vec<StyleRange>) -> Vec<StyleRange> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by(|a, b| {
        a.style
            .cmp(&b.style)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.end.cmp(&b.end))
    });

    let mut merged: Vec<StyleRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut()
            && last.style == range.style
            && range.start <= last.end
        {
            last.end = last.end.max(range.end);
            continue;
        }
        merged.push(range);
    }
    merged
}
