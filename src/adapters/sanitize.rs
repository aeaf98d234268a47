//! Log sanitization for patient-identifying text.
//!
//! Log lines here should only ever carry field names, ranges, and
//! validation messages, never identifiers. This module is the fallback
//! for the cases where identifying text still reaches a logging call
//! (e.g. an operator pastes a record id into a form field and it ends up
//! in a validation error).

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        let table: [(&str, &str); 4] = [
            // Record / document identifiers
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            // Medical record numbers
            (r"\bMRN[:\s]?\d{6,10}\b", "[REDACTED-MRN]"),
            // National id numbers (xxx-xx-xxxx)
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-ID]"),
            // Email addresses
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
        ];

        table
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("valid sanitize regex"),
                replacement,
            })
            .collect()
    })
}

/// Replace identifying patterns in a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let mut result = std::borrow::Cow::Borrowed(input);
    for rule in rules() {
        if rule.regex.is_match(&result) {
            result = std::borrow::Cow::Owned(
                rule.regex.replace_all(&result, rule.replacement).into_owned(),
            );
        }
    }
    result.into_owned()
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log
/// lines before they reach the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Clone> Clone for SanitizingMakeWriter<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Line-buffering writer: sanitization runs on whole lines so patterns
/// spanning a write boundary are still caught.
pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_uuid() {
        let out = sanitize("record 550e8400-e29b-41d4-a716-446655440000 rejected");
        assert!(out.contains("[REDACTED-UUID]"));
        assert!(!out.contains("550e8400"));
    }

    #[test]
    fn test_sanitize_mrn_and_id() {
        assert!(sanitize("MRN:12345678 found").contains("[REDACTED-MRN]"));
        assert!(sanitize("id 123-45-6789").contains("[REDACTED-ID]"));
    }

    #[test]
    fn test_sanitize_email() {
        let out = sanitize("contacto: paciente@clinica.es");
        assert!(out.contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "Age 121 out of range [1, 120]";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_writer_sanitizes_across_split_writes() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut sink);
            writer.write_all(b"MRN:123").unwrap();
            writer.write_all(b"45678 seen\n").unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(sink).unwrap();
        assert!(out.contains("[REDACTED-MRN]"));
    }
}
