//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! The calculator itself only ever shows a single error token on its display; the kinds here carry
//! the detail behind that token, so that a front-end (such as the REPL) can explain what went
//! wrong.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the kind as [`Any`], so that callers can inspect which kind of error occurred.
    fn as_any(&self) -> &dyn Any;

    /// A one-line description of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'static, (&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as a `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'static, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

/// Builds a report with a single message and one label per span.
///
/// Most error kinds only need a message, a label and an optional help line; this helper keeps
/// their [`ErrorKind::build_report`] implementations to one expression.
pub fn simple_report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    label: impl ToString,
    help: Option<String>,
) -> Report<'static, (&'a str, Range<usize>)> {
    let offset = spans.first().map(|span| span.start).unwrap_or(0);
    let label = label.to_string();
    let mut builder = Report::build(ariadne::ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(spans.iter().cloned().map(|span| {
            let mut label_builder = ariadne::Label::new((src_id, span)).with_color(EXPR);
            if !label.is_empty() {
                label_builder = label_builder.with_message(&label);
            }
            label_builder
        }));

    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}
