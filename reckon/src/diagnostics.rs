//! Renders [libreckon diagnostics](libreckon::Diagnostic) for a terminal.

use libreckon::{AssociatedDiagnostic, Diagnostic, DiagnosticKind};

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

/// Pads the source so that diagnostics pointing one past the end still have a character to
/// underline.
pub fn sanitize_source_for_diagnostics(source: &str) -> String {
    let mut source = source.replace('\n', " ");
    source.push(' ');
    source
}

pub fn emit_diagnostics(source: &str, diagnostics: &[Diagnostic], color: bool) -> String {
    let mut emitted = Vec::with_capacity(diagnostics.len());

    for diagnostic in diagnostics {
        let main_annotation_type = convert_diagnostic_kind(diagnostic.kind);
        let label = diagnostic.msg.clone().unwrap_or_default();
        let mut annotations = Vec::with_capacity(diagnostic.associated_diagnostics.len() + 1);
        annotations.push(SourceAnnotation {
            label: &label,
            annotation_type: main_annotation_type,
            range: diagnostic.span.into(),
        });
        for associated in diagnostic.associated_diagnostics.iter() {
            annotations.push(SourceAnnotation {
                label: &associated.msg,
                annotation_type: convert_diagnostic_kind(associated.kind),
                range: associated.span.into(),
            });
        }
        let footer = diagnostic
            .unspanned_associated_diagnostics
            .iter()
            .map(convert_associated_diagnostic)
            .collect();

        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(&diagnostic.title),
                id: diagnostic.code,
                annotation_type: main_annotation_type,
            }),
            footer,
            slices: vec![Slice {
                source,
                line_start: 1,
                origin: None,
                fold: false,
                annotations,
            }],
            opt: FormatOptions {
                color,
                ..Default::default()
            },
        };
        emitted.push(DisplayList::from(snippet).to_string());
    }
    emitted.join("\n\n")
}

fn convert_associated_diagnostic(diagnostic: &AssociatedDiagnostic) -> Annotation {
    Annotation {
        label: Some(&diagnostic.msg),
        id: None,
        annotation_type: convert_diagnostic_kind(diagnostic.kind),
    }
}

fn convert_diagnostic_kind(kind: DiagnosticKind) -> AnnotationType {
    match kind {
        DiagnosticKind::Error => AnnotationType::Error,
        DiagnosticKind::Note => AnnotationType::Note,
        DiagnosticKind::Help => AnnotationType::Help,
    }
}
