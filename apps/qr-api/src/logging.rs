//! # Log Output and Redaction
//!
//! Installs the `tracing` subscriber and, when anonymization is on, wraps its
//! writer so every formatted line is scrubbed before it leaves the process.
//!
//! ## Output Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  info!("Invalid IBAN format: <DE89...>")                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fmt layer ──► RedactingMakeWriter ──► Redactor ──► stdout             │
//! │  (formats)     (decorator)             (regexes)                        │
//! │                                                                         │
//! │  [INFO] ... Invalid IBAN format: <censored>                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Call sites mark user data by wrapping it in `<...>`; the redactor also
//! catches common secrets that slip through unmarked.

use std::borrow::Cow;
use std::io::{self, Write};

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Replacement for every redacted span.
pub const CENSORED: &str = "<censored>";

const SENSITIVE_PATTERNS: &[&str] = &[
    // Anything explicitly marked as sensitive
    r"<[^>]*>",
    // E-mail addresses
    r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
    // Card numbers
    r"(?:[0-9][ -]*?){13,19}",
    r"(?i)password\s*[:=]\s*[\w!@#$%^&*()]+",
    r"(?i)ssn\s*[:=]\s*[0-9]{3}-[0-9]{2}-[0-9]{4}",
    r"(?i)iban\s*[:=]\s*[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}",
];

/// Replaces sensitive substrings with [`CENSORED`].
#[derive(Debug, Clone)]
pub struct Redactor {
    patterns: Vec<Regex>,
}

impl Redactor {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = SENSITIVE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<_, _>>()?;
        Ok(Redactor { patterns })
    }

    /// Applies every pattern in order.
    pub fn redact<'t>(&self, message: &'t str) -> Cow<'t, str> {
        let mut out = Cow::Borrowed(message);
        for pattern in &self.patterns {
            if let Cow::Owned(replaced) = pattern.replace_all(&out, CENSORED) {
                out = Cow::Owned(replaced);
            }
        }
        out
    }
}

/// [`MakeWriter`] decorator that redacts everything written through it.
///
/// With no redactor configured, bytes pass through untouched.
#[derive(Debug)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    redactor: Option<Redactor>,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M, redactor: Option<Redactor>) -> Self {
        RedactingMakeWriter { inner, redactor }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<'a, M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            redactor: self.redactor.as_ref(),
        }
    }
}

/// Writer handed out per event by [`RedactingMakeWriter`].
///
/// The fmt layer writes a whole formatted event per call, so each `write`
/// is redacted on its own.
pub struct RedactingWriter<'a, W> {
    inner: W,
    redactor: Option<&'a Redactor>,
}

impl<W: Write> Write for RedactingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.redactor {
            Some(redactor) => {
                let text = String::from_utf8_lossy(buf);
                self.inner.write_all(redactor.redact(&text).as_bytes())?;
                Ok(buf.len())
            }
            None => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Initializes the global tracing subscriber.
///
/// ## Log Levels
/// - `LOG_LEVEL` selects the maximum level (see [`LogLevel`])
/// - `RUST_LOG`, when set, overrides it with full filter directives
pub fn init_tracing(level: LogLevel, anonymize: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.as_filter().into()));

    let redactor = if anonymize { Some(Redactor::new()?) } else { None };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(RedactingMakeWriter::new(io::stdout, redactor))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
