use std::io::{ErrorKind, Read};

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::MergeConfig;
use crate::error::DecodeError;
use crate::model::PlaybookResults;
use crate::sink::{JsonResultsSink, ResultsSink};

/// Decode every document in `reader` and merge them with default settings.
///
/// An empty (or whitespace-only) stream yields empty results. The first document
/// that fails to decode aborts the whole merge.
pub fn parse_results_stream<R: Read>(reader: R) -> Result<PlaybookResults, DecodeError> {
    parse_results_stream_with(reader, &MergeConfig::default())
}

#[tracing::instrument(
    name = "merge.stream",
    level = "debug",
    skip_all,
    fields(fold = ?cfg.stats_fold)
)]
pub fn parse_results_stream_with<R: Read>(
    mut reader: R,
    cfg: &MergeConfig,
) -> Result<PlaybookResults, DecodeError> {
    let mut sink = JsonResultsSink::with_config(cfg);
    let mut buf = vec![0u8; cfg.read_chunk_bytes.max(1)];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        sink.receive(&buf[..n])?;
    }

    sink.finish()
}

pub async fn parse_results_stream_async<R>(reader: R) -> Result<PlaybookResults, DecodeError>
where
    R: AsyncRead + Unpin,
{
    parse_results_stream_async_with(reader, &MergeConfig::default()).await
}

#[tracing::instrument(
    name = "merge.stream_async",
    level = "debug",
    skip_all,
    fields(fold = ?cfg.stats_fold)
)]
pub async fn parse_results_stream_async_with<R>(
    mut reader: R,
    cfg: &MergeConfig,
) -> Result<PlaybookResults, DecodeError>
where
    R: AsyncRead + Unpin,
{
    let mut sink = JsonResultsSink::with_config(cfg);
    let mut buf = vec![0u8; cfg.read_chunk_bytes.max(1)];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        sink.receive(&buf[..n])?;
    }

    sink.finish()
}
