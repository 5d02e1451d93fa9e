use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use anyhow::{Context, Result};
use thiserror::Error;

pub mod heuristic;
pub mod strict;

pub use heuristic::HeuristicReader;
pub use strict::StrictReader;

pub type GenericBufReader = BufReader<Box<dyn Read>>;

/// A sequencing read as seen by the matcher: the header line and the nucleotide sequence.
/// Quality scores are never retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadRecord {
    pub header: String,
    pub seq: String,
}

pub type RecordIter = Box<dyn Iterator<Item = Result<ReadRecord, ReadError>>>;

/// How lines of the input are grouped into records.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFraming {
    /// Strict 4-line FASTQ records. Malformed input stops the run with the offending line.
    Strict,

    /// Classify lines by their shape: a short line containing `+` ends a record, a line longer
    /// than 200 characters is a sequence and anything else is a header. Never rejects input.
    Heuristic,
}

/// Opens `path` and returns a lazy iterator over its records, using the given framing.
///
/// # Errors
///
/// Returns an error if the file cannot be opened. Parse errors are yielded by the iterator.
pub fn open_records(path: &str, framing: RecordFraming) -> Result<RecordIter> {
    let file = File::open(path).with_context(|| format!("Unable to open file {path}"))?;
    let reader: GenericBufReader = BufReader::new(Box::new(file));

    Ok(match framing {
        RecordFraming::Strict => Box::new(StrictReader::new(reader)),
        RecordFraming::Heuristic => Box::new(HeuristicReader::new(reader)),
    })
}

/// Reads a source one line at a time, keeping the most recent line (with its terminator) and its
/// 1-based line number. Lines are kept as bytes, so input that is not valid UTF-8 is never an
/// error here.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Advances to the next line. Returns `false` once the end of input is reached.
    pub fn advance(&mut self) -> std::io::Result<bool> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf)? {
            0 => Ok(false),
            _ => {
                self.line += 1;
                Ok(true)
            }
        }
    }

    /// The current line, including any trailing newline.
    pub fn raw(&self) -> &[u8] {
        &self.buf
    }

    /// The current line without its line terminator. Invalid UTF-8 is replaced with U+FFFD.
    pub fn content(&self) -> Cow<'_, str> {
        let end = self
            .buf
            .iter()
            .rposition(|&b| b != b'\n' && b != b'\r')
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.buf[..end])
    }

    pub fn line_number(&self) -> usize {
        self.line
    }
}

/// The part of a record the strict reader expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingState {
    AwaitHeader,
    AwaitSequence,
    AwaitSeparator,
    AwaitQuality,
}

impl fmt::Display for FramingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FramingState::AwaitHeader => "header",
            FramingState::AwaitSequence => "sequence",
            FramingState::AwaitSeparator => "separator",
            FramingState::AwaitQuality => "quality",
        })
    }
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not read input")]
    Io(#[from] std::io::Error),

    #[error(
        "malformed record at line {line}: expected a header starting with `@`, found
    `{found}`"
    )]
    MissingHeader { line: usize, found: String },

    #[error(
        "malformed record at line {line}: expected a separator starting with `+`, found
    `{found}`"
    )]
    MissingSeparator { line: usize, found: String },

    #[error(
        "malformed record at line {line}: quality has {found} characters but the sequence has {expected}"
    )]
    QualityLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("input ended after line {line} while expecting a {state} line")]
    Truncated { line: usize, state: FramingState },
}
