use std::io::BufRead;

use super::{FramingState, LineReader, ReadError, ReadRecord};

/// Parses strict 4-line FASTQ records:
///
/// ```text
/// @header
/// SEQUENCE
/// +
/// QUALITY
/// ```
///
/// Blank lines between records are skipped. Anything else out of place, or input ending part way
/// through a record, is reported once as a [`ReadError`] after which the iterator is exhausted.
pub struct StrictReader<R> {
    lines: LineReader<R>,
    state: FramingState,
    header: String,
    seq: String,
    done: bool,
}

impl<R: BufRead> StrictReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            state: FramingState::AwaitHeader,
            header: String::new(),
            seq: String::new(),
            done: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<ReadRecord>, ReadError> {
        loop {
            if !self.lines.advance()? {
                return match self.state {
                    FramingState::AwaitHeader => Ok(None),
                    state => Err(ReadError::Truncated {
                        line: self.lines.line_number(),
                        state,
                    }),
                };
            }

            let line = self.lines.content();
            let number = self.lines.line_number();

            match self.state {
                FramingState::AwaitHeader => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if !line.starts_with('@') {
                        return Err(ReadError::MissingHeader {
                            line: number,
                            found: line.to_string(),
                        });
                    }
                    self.header.clear();
                    self.header.push_str(line.trim());
                    self.state = FramingState::AwaitSequence;
                }
                FramingState::AwaitSequence => {
                    self.seq.clear();
                    self.seq.push_str(line.trim());
                    self.state = FramingState::AwaitSeparator;
                }
                FramingState::AwaitSeparator => {
                    if !line.starts_with('+') {
                        return Err(ReadError::MissingSeparator {
                            line: number,
                            found: line.to_string(),
                        });
                    }
                    self.state = FramingState::AwaitQuality;
                }
                FramingState::AwaitQuality => {
                    let found = line.trim().len();
                    if found != self.seq.len() {
                        return Err(ReadError::QualityLength {
                            line: number,
                            expected: self.seq.len(),
                            found,
                        });
                    }
                    self.state = FramingState::AwaitHeader;

                    return Ok(Some(ReadRecord {
                        header: std::mem::take(&mut self.header),
                        seq: std::mem::take(&mut self.seq),
                    }));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for StrictReader<R> {
    type Item = Result<ReadRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
