use std::io::BufRead;

use super::{LineReader, ReadError, ReadRecord};

/// Lines shorter than this many bytes (terminator included) that contain `+` end a record.
pub const SEPARATOR_MAX_LEN: usize = 10;

/// Lines longer than this many bytes (terminator included) are sequences.
pub const SEQUENCE_MIN_LEN: usize = 200;

/// Groups lines into records by their shape rather than their position.
///
/// The working header and sequence persist between records and are overwritten by each line of
/// the matching shape, so a quality line longer than [`SEQUENCE_MIN_LEN`] is harmlessly replaced
/// by the next record's sequence before its separator arrives. A trailing record with no
/// separator is dropped.
pub struct HeuristicReader<R> {
    lines: LineReader<R>,
    header: String,
    seq: String,
    done: bool,
}

impl<R: BufRead> HeuristicReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            header: String::new(),
            seq: String::new(),
            done: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<ReadRecord>, ReadError> {
        while self.lines.advance()? {
            let raw = self.lines.raw();
            let len = raw.len();

            if len < SEPARATOR_MAX_LEN && memchr::memchr(b'+', raw).is_some() {
                return Ok(Some(ReadRecord {
                    header: self.header.clone(),
                    seq: self.seq.clone(),
                }));
            } else if len > SEQUENCE_MIN_LEN {
                self.seq.clear();
                self.seq.push_str(self.lines.content().trim());
            } else {
                self.header.clear();
                self.header.push_str(self.lines.content().trim());
            }
        }

        Ok(None)
    }
}

impl<R: BufRead> Iterator for HeuristicReader<R> {
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
