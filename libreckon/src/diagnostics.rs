//! Presentation form of libreckon errors.
//!
//! Parse-time and evaluation-time errors are values (see [`ParseError`] and
//! [`EvaluationError`]); a [`Diagnostic`] is what a consumer renders for a human. Every error has
//! a stable code with a long-form explanation, retrievable via
//! [`Diagnostic::all_codes_with_explanations`].
//!
//! [`ParseError`]: crate::ParseError
//! [`EvaluationError`]: crate::EvaluationError

use crate::common::Span;
use crate::expression::errors::EvaluationErrors;
use crate::parser::errors::ParseErrors;

use std::collections::HashMap;

/// The kind of a libreckon diagnostic.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DiagnosticKind {
    /// An error diagnostic. Emitted for anything that stops parsing or evaluation.
    Error,
    /// A note diagnostic is a generic annotation with no specific connotation like `error`. It is
    /// useful as an associated diagnostic, for example in expanding on a primary error.
    Note,
    /// A help diagnostic instructs the user how their expression can be changed to work.
    Help,
}

/// A secondary diagnostic associated with a primary `Diagnostic`.
#[derive(Clone, Debug)]
pub struct AssociatedDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub msg: String,
}

/// A diagnostic for an expression source.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Span of the source the diagnostic points at. May be the whole expression when the
    /// error cannot be attributed to a narrower region.
    pub span: Span,
    pub title: String,
    pub code: Option<&'static str>,
    pub msg: Option<String>,
    pub associated_diagnostics: Vec<AssociatedDiagnostic>,
    pub unspanned_associated_diagnostics: Vec<AssociatedDiagnostic>,
}

impl Diagnostic {
    /// Creates an error diagnostic at a span.
    pub(crate) fn span_err<S, M, N>(span: S, title: M, code: &'static str, err: N) -> Diagnostic
    where
        S: Into<Span>,
        M: Into<String>,
        N: Into<Option<String>>,
    {
        Diagnostic {
            kind: DiagnosticKind::Error,
            span: span.into(),
            title: title.into(),
            code: Some(code),
            msg: err.into(),
            associated_diagnostics: Vec::with_capacity(2),
            unspanned_associated_diagnostics: Vec::with_capacity(2),
        }
    }

    /// Adds a note to the diagnostic.
    pub(crate) fn with_note<M>(mut self, note: M) -> Diagnostic
    where
        M: Into<String>,
    {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Note,
                span: self.span,
                msg: note.into(),
            });
        self
    }

    /// Adds a help message to the diagnostic.
    pub(crate) fn with_help<M>(mut self, note: M) -> Diagnostic
    where
        M: Into<String>,
    {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Help,
                span: self.span,
                msg: note.into(),
            });
        self
    }

    /// Returns all diagnostic codes known to libreckon, mapped to their explanations.
    pub fn all_codes_with_explanations() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.extend(ParseErrors::codes_with_explanations());
        map.extend(EvaluationErrors::codes_with_explanations());
        map
    }
}

/// A single diagnostic code with its explanation.
pub(crate) trait DiagnosticRecord {
    const CODE: &'static str;
    const EXPLANATION: &'static str;
}

/// A family of diagnostic records.
pub(crate) trait DiagnosticRegistry {
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)>;
}

/// Defines a family of diagnostic records from doc-commented `CODE: Name` pairs.
///
/// Each name becomes a unit struct implementing [`DiagnosticRecord`], whose explanation is the
/// doc comment above it, and `$registry` collects them all.
macro_rules! define_errors {
    ($registry:ident; $($(#[doc = $doc:expr])+ $code:ident: $error:ident)*) => {
        $(
            $(#[doc = $doc])+
            pub(crate) struct $error;

            impl crate::diagnostics::DiagnosticRecord for $error {
                const CODE: &'static str = stringify!($code);
                const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
            }
        )*

        pub(crate) struct $registry;

        impl crate::diagnostics::DiagnosticRegistry for $registry {
            #[allow(clippy::vec_init_then_push)]
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                use crate::diagnostics::DiagnosticRecord;

                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }
    };
}
