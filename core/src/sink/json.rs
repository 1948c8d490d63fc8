use std::io;

use crate::config::{MergeConfig, StatsFold};
use crate::decode::{decode_next, NoiseFilter};
use crate::error::DecodeError;
use crate::merge::fold_into;
use crate::model::PlaybookResults;

use super::traits::ResultsSink;

fn preview(s: &str) -> String {
    const MAX: usize = 160;
    if s.len() <= MAX {
        return s.to_string();
    }
    let end = s
        .char_indices()
        .take_while(|(i, _)| *i < MAX)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let mut out = s[..end].to_string();
    out.push('…');
    out
}

/// Incremental decoder for concatenated json-callback documents.
///
/// Bytes are buffered only until the document they belong to is complete; each
/// finished document is decoded and folded immediately, so memory stays bounded
/// by the largest single document. Only `{` opens a document. Any other line
/// between documents must match a skip pattern.
#[derive(Debug)]
pub struct JsonResultsSink {
    fold: StatsFold,
    noise: NoiseFilter,
    buf: Vec<u8>,
    /// Buffer length that triggers the next decode attempt on an open document.
    retry_at: usize,
    /// Stream offset of `buf[0]`.
    consumed: usize,
    documents: usize,
    skipped_lines: usize,
    results: PlaybookResults,
    failed: bool,
}

impl Default for JsonResultsSink {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonResultsSink {
    pub fn new() -> Self {
        Self::with_config(&MergeConfig::default())
    }

    pub fn with_config(cfg: &MergeConfig) -> Self {
        Self {
            fold: cfg.stats_fold,
            noise: NoiseFilter::from_patterns(&cfg.skip_patterns),
            buf: Vec::with_capacity(8 * 1024),
            retry_at: 0,
            consumed: 0,
            documents: 0,
            skipped_lines: 0,
            results: PlaybookResults::default(),
            failed: false,
        }
    }

    /// Lines dropped by the skip patterns so far.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn advance(&mut self, n: usize) {
        self.buf.drain(..n);
        self.consumed += n;
        self.retry_at = 0;
    }

    /// Each attempt re-decodes the open document from its first byte. Attempts
    /// wait for the buffer to double unless the received bytes end on a `}`.
    fn should_attempt(&self, eof: bool) -> bool {
        let ends_on_brace = self
            .buf
            .iter()
            .rev()
            .find(|b| !b.is_ascii_whitespace())
            == Some(&b'}');
        eof || ends_on_brace || self.buf.len() >= self.retry_at
    }

    fn strip_ws(&mut self) {
        let skip = self
            .buf
            .iter()
            .position(|&b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
            .unwrap_or(self.buf.len());
        if skip > 0 {
            self.advance(skip);
        }
    }

    fn line_end(&self, eof: bool) -> Option<usize> {
        match self.buf.iter().position(|&b| b == b'\n') {
            Some(i) => Some(i + 1),
            None if eof => Some(self.buf.len()),
            None => None,
        }
    }

    fn drain(&mut self, eof: bool) -> Result<(), DecodeError> {
        loop {
            self.strip_ws();
            let Some(&first) = self.buf.first() else {
                return Ok(());
            };

            // Anything that does not open an object is noise or an error, which can
            // only be decided once the whole line is here.
            if first != b'{' {
                let Some(end) = self.line_end(eof) else {
                    return Ok(());
                };
                let line = String::from_utf8_lossy(&self.buf[..end])
                    .trim_end()
                    .to_string();
                if !self.noise.is_noise(&line) {
                    return Err(DecodeError::UnexpectedContent {
                        offset: self.consumed,
                        preview: preview(&line),
                    });
                }
                tracing::warn!(
                    offset = self.consumed,
                    line = %preview(&line),
                    "skipping non-json line between documents"
                );
                self.skipped_lines += 1;
                self.advance(end);
                continue;
            }

            if !self.should_attempt(eof) {
                return Ok(());
            }

            let offset = self.consumed;
            match decode_next(&self.buf, self.documents, offset)? {
                Some((doc, end)) => {
                    tracing::debug!(
                        target: "playbook_report.merge",
                        document = self.documents,
                        offset,
                        bytes = end,
                        plays = doc.plays.len(),
                        hosts = doc.stats.len(),
                        "decoded document"
                    );
                    fold_into(&mut self.results, doc, self.fold);
                    self.documents += 1;
                    self.advance(end);
                }
                None if eof => {
                    return Err(DecodeError::Truncated {
                        document: self.documents,
                        offset,
                    })
                }
                None => {
                    self.retry_at = self.buf.len().saturating_mul(2);
                    return Ok(());
                }
            }
        }
    }
}

impl ResultsSink for JsonResultsSink {
    fn name(&self) -> &str {
        "json"
    }

    fn receive(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        if self.failed {
            return Err(DecodeError::Aborted);
        }
        self.buf.extend_from_slice(chunk);
        let res = self.drain(false);
        if res.is_err() {
            self.failed = true;
        }
        res
    }

    fn results(&self) -> &PlaybookResults {
        &self.results
    }

    fn documents(&self) -> usize {
        self.documents
    }

    /// On success the sink is reset and can take another stream.
    fn finish(&mut self) -> Result<PlaybookResults, DecodeError> {
        if self.failed {
            return Err(DecodeError::Aborted);
        }
        if let Err(e) = self.drain(true) {
            self.failed = true;
            return Err(e);
        }

        tracing::debug!(
            target: "playbook_report.merge",
            documents = self.documents,
            skipped_lines = self.skipped_lines,
            bytes = self.consumed,
            plays = self.results.plays.len(),
            hosts = self.results.stats.len(),
            "stream merged"
        );

        self.consumed = 0;
        self.documents = 0;
        self.skipped_lines = 0;
        self.retry_at = 0;
        Ok(std::mem::take(&mut self.results))
    }
}

impl io::Write for JsonResultsSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.receive(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC_A: &str = r#"{"plays": [{"play": {"name": "a"}, "tasks": []}], "stats": {"h": {"ok": 1}}}"#;
    const DOC_B: &str = r#"{
    "plays": [{"play": {"name": "b"}, "tasks": []}],
    "stats": {"h": {"ok": 2, "changed": 1}}
}"#;

    #[test]
    fn byte_at_a_time_matches_whole_stream() {
        let stream = format!("{DOC_A}\n{DOC_B}\n");

        let mut whole = JsonResultsSink::new();
        whole.receive(stream.as_bytes()).unwrap();
        let whole = whole.finish().unwrap();

        let mut sink = JsonResultsSink::new();
        for b in stream.as_bytes() {
            sink.receive(std::slice::from_ref(b)).unwrap();
        }
        assert_eq!(sink.documents(), 2);
        let bytewise = sink.finish().unwrap();

        assert_eq!(whole, bytewise);
        assert_eq!(bytewise.plays.len(), 2);
        assert_eq!(bytewise.stats["h"].ok, 2);
        assert_eq!(bytewise.stats["h"].changed, 1);
    }

    #[test]
    fn results_are_visible_before_finish() {
        let mut sink = JsonResultsSink::new();
        sink.receive(DOC_A.as_bytes()).unwrap();
        sink.receive(b"\n{\"plays\": [").unwrap();
        assert_eq!(sink.documents(), 1);
        assert_eq!(sink.results().plays.len(), 1);
    }

    #[test]
    fn noise_line_is_skipped() {
        let stream = format!(
            "{DOC_A}\nPlaybook run took 0 days, 0 hours, 0 minutes, 2 seconds\n{DOC_B}"
        );
        let mut sink = JsonResultsSink::new();
        sink.receive(stream.as_bytes()).unwrap();
        assert_eq!(sink.skipped_lines(), 1);
        let r = sink.finish().unwrap();
        assert_eq!(r.plays.len(), 2);
    }

    #[test]
    fn other_text_is_unexpected_content() {
        let mut sink = JsonResultsSink::new();
        sink.receive(DOC_A.as_bytes()).unwrap();
        let err = sink.receive(b"\nPLAY RECAP ****\n").unwrap_err();
        match err {
            DecodeError::UnexpectedContent { offset, preview } => {
                assert_eq!(offset, DOC_A.len() + 1);
                assert_eq!(preview, "PLAY RECAP ****");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(sink.finish(), Err(DecodeError::Aborted)));
    }

    #[test]
    fn bracketed_warning_is_unexpected_content() {
        let mut sink = JsonResultsSink::new();
        let err = sink
            .receive(format!("{DOC_A}\n[WARNING]: no hosts matched\n{DOC_B}").as_bytes())
            .unwrap_err();
        match err {
            DecodeError::UnexpectedContent { offset, preview } => {
                assert_eq!(offset, DOC_A.len() + 1);
                assert_eq!(preview, "[WARNING]: no hosts matched");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(sink.documents(), 1);
    }

    #[test]
    fn top_level_array_is_not_a_document() {
        let mut sink = JsonResultsSink::new();
        sink.receive(b"{\"plays\": []}\n[]\n").unwrap_err();
        assert_eq!(sink.documents(), 1);
        assert!(matches!(sink.finish(), Err(DecodeError::Aborted)));
    }

    #[test]
    fn large_document_in_small_chunks() {
        let tasks: Vec<String> = (0..200)
            .map(|i| format!(r#"{{"task": {{"name": "t{i}"}}, "hosts": {{"h": {{"msg": "m{i}"}}}}}}"#))
            .collect();
        let doc = format!(
            r#"{{"plays": [{{"tasks": [{}]}}], "stats": {{"h": {{"ok": 200}}}}}}"#,
            tasks.join(",")
        );
        let stream = format!("{doc}\n{DOC_A}\n");

        let mut sink = JsonResultsSink::new();
        for chunk in stream.as_bytes().chunks(5) {
            sink.receive(chunk).unwrap();
        }
        let r = sink.finish().unwrap();
        assert_eq!(r.plays.len(), 2);
        assert_eq!(r.plays[0].tasks.len(), 200);
        assert_eq!(r.plays[0].tasks[199].name(), "t199");
        assert_eq!(r.stats["h"].ok, 1);
    }

    #[test]
    fn partial_document_at_end_is_truncated() {
        let mut sink = JsonResultsSink::new();
        sink.receive(format!("{DOC_A}\n{{\"plays\": [").as_bytes())
            .unwrap();
        match sink.finish() {
            Err(DecodeError::Truncated { document, offset }) => {
                assert_eq!(document, 1);
                assert_eq!(offset, DOC_A.len() + 1);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn trailing_text_without_newline_is_checked_at_finish() {
        let mut sink = JsonResultsSink::new();
        sink.receive(format!("{DOC_A}\ntrailing").as_bytes()).unwrap();
        assert!(matches!(
            sink.finish(),
            Err(DecodeError::UnexpectedContent { .. })
        ));
    }

    #[test]
    fn io_write_reports_invalid_data() {
        let mut sink = JsonResultsSink::new();
        writeln!(sink, "{DOC_A}").unwrap();
        let err = sink.write_all(b"{\"plays\": }\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn finish_resets_for_reuse() {
        let mut sink = JsonResultsSink::new();
        sink.receive(DOC_A.as_bytes()).unwrap();
        assert_eq!(sink.finish().unwrap().plays.len(), 1);
        assert_eq!(sink.documents(), 0);
        assert!(sink.finish().unwrap().is_empty());
    }
}
