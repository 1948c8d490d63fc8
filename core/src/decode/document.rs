use serde::Deserialize;

use crate::error::DecodeError;
use crate::model::{Object, PlaybookResults};

/// Decode exactly one json-callback document.
///
/// Trailing bytes other than whitespace are an error; use the stream functions in
/// [`crate::merge`] for concatenated output. Unknown keys are kept, missing
/// sections default to empty. The root must be a JSON object.
pub fn parse_document(bytes: &[u8]) -> Result<PlaybookResults, DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    Object::<PlaybookResults>::deserialize(&mut de)
        .and_then(|doc| de.end().map(|()| doc.into_inner()))
        .map_err(|e| DecodeError::from_json(0, 0, e))
}

/// Decode the document at the start of `buf`, which may be followed by more data.
///
/// Returns the document and the number of bytes it used, or `None` when `buf`
/// ends before the document does. Errors carry the `document` index and the
/// stream `offset` of `buf[0]`.
pub(crate) fn decode_next(
    buf: &[u8],
    document: usize,
    offset: usize,
) -> Result<Option<(PlaybookResults, usize)>, DecodeError> {
    let mut iter =
        serde_json::Deserializer::from_slice(buf).into_iter::<Object<PlaybookResults>>();
    match iter.next() {
        Some(Ok(doc)) => Ok(Some((doc.into_inner(), iter.byte_offset()))),
        Some(Err(e)) if e.is_eof() => Ok(None),
        Some(Err(e)) => Err(DecodeError::from_json(document, offset, e)),
        None => Ok(None),
    }
}
