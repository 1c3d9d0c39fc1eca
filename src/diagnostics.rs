//! Fancy diagnostics support using `ariadne`.
//!
//! This module converts errors carrying [`SourceRangeMixin`](crate::bms::command::mixin::SourceRangeMixin)
//! (such as [`LexErrorWithRange`](crate::bms::lex::LexErrorWithRange) and the aggregated [`BmsError`])
//! to `ariadne::Report`. The byte spans are handed over as is, and ariadne calculates rows and
//! columns for display.
//!
//! # Usage Example
//!
//! ```rust
//! use bms_grammar::{
//!     bms::{default_config, parse_bms},
//!     diagnostics::emit_bms_error,
//! };
//!
//! let bms_source = "#TITLE Test\n#ARTIST Composer\n#INVALID command\n";
//! if let Err(error) = parse_bms(bms_source, &default_config()) {
//!     emit_bms_error("test.bms", bms_source, &error);
//! }
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::bms::BmsError;

/// Simple source container that holds the filename and source text.
///
/// ```rust
/// use bms_grammar::diagnostics::SimpleSource;
///
/// let source_text = "#TITLE test\n#ARTIST composer\n";
/// let source = SimpleSource::new("test.bms", source_text);
///
/// assert_eq!(source.text(), source_text);
/// assert_eq!(source.name(), "test.bms");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
///
/// ```rust
/// use ariadne::Source;
/// use bms_grammar::{
///     bms::{default_config, parse_bms},
///     diagnostics::{SimpleSource, ToAriadne},
/// };
///
/// let source_text = "#TITLE test\n#PLAYER 9\n";
/// let error = parse_bms(source_text, &default_config()).unwrap_err();
///
/// let source = SimpleSource::new("test.bms", source_text);
/// let report = error.to_report(&source);
/// let _ = report.eprint(("test.bms".to_string(), Source::from(source_text)));
/// ```
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// `src` provides the filename, ariadne handles row/column calculation.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` with a single label.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

/// Renders a [`BmsError`] to the standard error.
///
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete BMS source text
/// * `error` - The error to display
pub fn emit_bms_error(name: &str, source: &str, error: &BmsError) {
    let simple = SimpleSource::new(name, source);
    let report = error.to_report(&simple);
    let _ = report.eprint((name.to_string(), Source::from(source)));
}

/// Collect `ariadne::Report` instances for a list of [`BmsError`] without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test output clean.
#[must_use]
pub fn collect_bms_reports<'a>(
    name: &'a str,
    source: &'a str,
    errors: impl IntoIterator<Item = &'a BmsError>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    errors.into_iter().map(|e| e.to_report(&simple)).collect()
}
