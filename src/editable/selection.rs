//! Selection type for the markdown editing core.
//!
//! Offsets are character offsets into the field value, not bytes.

/// A text selection as a half-open character range `[start, end)`.
///
/// Invariant: `start <= end`. Constructors normalize reversed input so
/// every transform can rely on the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the ends if given in reverse
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a collapsed selection (cursor with no selected text)
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Check if selection is collapsed (start == end)
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends to `[0, max]`
    pub fn clamp(self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }

    /// Shift both ends by `delta` characters, saturating at zero
    pub fn shifted(self, delta: isize) -> Self {
        let shift = |offset: usize| offset.saturating_add_signed(delta);
        Self {
            start: shift(self.start),
            end: shift(self.end),
        }
    }

    /// Check if an offset lies within this selection (end inclusive, so a
    /// collapsed cursor contains its own offset)
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}
