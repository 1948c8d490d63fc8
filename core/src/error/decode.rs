use serde_json::error::Category;
use thiserror::Error;

/// Failure to turn stream bytes into playbook results.
///
/// `document` is the zero-based index of the document within the stream and
/// `offset` the byte position where that document starts.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("document {document} (byte {offset}) is not valid json at line {line} column {column}: {source}")]
    Syntax {
        document: usize,
        offset: usize,
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    #[error("document {document} (byte {offset}) does not match the playbook results layout at line {line} column {column}: {source}")]
    Schema {
        document: usize,
        offset: usize,
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    #[error("document {document} (byte {offset}) ended before the json value was complete")]
    Truncated { document: usize, offset: usize },

    #[error("unexpected non-json content at byte {offset}: {preview}")]
    UnexpectedContent { offset: usize, preview: String },

    #[error("stream io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink already failed on an earlier document")]
    Aborted,
}

impl DecodeError {
    pub fn from_json(document: usize, offset: usize, err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        match err.classify() {
            Category::Io => DecodeError::Io(err.into()),
            Category::Eof => DecodeError::Truncated { document, offset },
            Category::Syntax => DecodeError::Syntax {
                document,
                offset,
                line,
                column,
                source: err,
            },
            Category::Data => DecodeError::Schema {
                document,
                offset,
                line,
                column,
                source: err,
            },
        }
    }

    pub fn document(&self) -> Option<usize> {
        match self {
            DecodeError::Syntax { document, .. }
            | DecodeError::Schema { document, .. }
            | DecodeError::Truncated { document, .. } => Some(*document),
            DecodeError::UnexpectedContent { .. } | DecodeError::Io(_) | DecodeError::Aborted => {
                None
            }
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::Syntax { offset, .. }
            | DecodeError::Schema { offset, .. }
            | DecodeError::Truncated { offset, .. }
            | DecodeError::UnexpectedContent { offset, .. } => Some(*offset),
            DecodeError::Io(_) | DecodeError::Aborted => None,
        }
    }
}
