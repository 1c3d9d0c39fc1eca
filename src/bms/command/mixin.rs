//! Mixin types for structures.
//!
//! - `SourceRangeMixin` is a generic wrapper that attaches position information (byte span) to a value.
//! - `SourceRangeMixinExt` is a trait that provides extension methods to create `SourceRangeMixin` instances conveniently.

use std::ops::Range;

/// A generic wrapper that attaches position information (byte span) to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value
    content: T,
    /// Start index in the source string (0-based, inclusive)
    start: usize,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Instances a new `SourceRangeMixin`
    pub const fn new(content: T, start: usize, end: usize) -> Self {
        Self {
            content,
            start,
            end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Leans the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the start index of the source span.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the end index of the source span.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the source span as a tuple of (start, end).
    pub const fn as_span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Returns the source span as a byte range.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the length of the source span.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the source span's length is 0.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps the content of the wrapper.
    pub fn map<U, F>(self, f: F) -> SourceRangeMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceRangeMixin::new(f(self.content), self.start, self.end)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at indices [{}, {})",
            self.content, self.start, self.end
        )
    }
}

impl<T> From<(T, Range<usize>)> for SourceRangeMixin<T> {
    fn from((content, range): (T, Range<usize>)) -> Self {
        Self::new(content, range.start, range.end)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods for wrapping any value into a [`SourceRangeMixin`].
pub trait SourceRangeMixinExt {
    /// Instances a new `SourceRangeMixin` with the same span as a wrapper.
    fn into_wrapper<W>(self, wrapper: &SourceRangeMixin<W>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, wrapper.start, wrapper.end)
    }

    /// Instances a new `SourceRangeMixin` with a given byte range.
    fn into_wrapper_range(self, range: Range<usize>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, range.start, range.end)
    }
}

impl<T> SourceRangeMixinExt for T {}
