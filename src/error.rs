//! Error types for loading directory documents and map configuration

use std::ops::Range;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = Range<usize>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid directory JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid map configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LoadError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Byte range of the error in the source text, when known
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Json(e) => {
                let start = line_column_offset(source, e.line(), e.column());
                Some(start..(start + 1).min(source.len()))
            }
            LoadError::Toml(e) => e.span(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source).map(|bytes| char_span(source, bytes)) else {
            return self.to_string();
        };

        let message = match self {
            LoadError::Json(e) => format!("invalid directory JSON ({:?} error)", e.classify()),
            LoadError::Toml(_) => "invalid map configuration".to_string(),
            LoadError::Io { .. } => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Convert a byte range into the char range ariadne positions by
///
/// Ends inside a multibyte char snap back to its start; the result is never empty
/// unless the source is.
fn char_span(source: &str, bytes: Span) -> Span {
    let to_chars = |offset: usize| {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        source[..offset].chars().count()
    };

    let total = source.chars().count();
    let start = to_chars(bytes.start).min(total.saturating_sub(1));
    let end = to_chars(bytes.end).max(start + 1).min(total);
    start..end
}

/// Convert serde_json's 1-based line/column into a byte offset
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
