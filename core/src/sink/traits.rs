use crate::error::DecodeError;
use crate::model::PlaybookResults;

/// Receives command output as it is produced and can be asked for the aggregate.
///
/// Chunks may split documents (and UTF-8 sequences) anywhere. After `receive` or
/// `finish` returns an error the sink stays failed and every later call returns
/// [`DecodeError::Aborted`].
pub trait ResultsSink: Send {
    fn name(&self) -> &str;

    fn receive(&mut self, chunk: &[u8]) -> Result<(), DecodeError>;

    /// Everything folded so far. Documents still being received are not included.
    fn results(&self) -> &PlaybookResults;

    /// Number of complete documents folded so far.
    fn documents(&self) -> usize;

    /// Signal end of output and take the aggregate. Leftover partial data is an error.
    fn finish(&mut self) -> Result<PlaybookResults, DecodeError>;
}
