//! Streams the two source tables into a [`PinyinTrie`].
//!
//! Every line is parsed on its own. A bad line, including one that is not
//! UTF-8, is skipped; a read failure stops the rest of that stream but keeps
//! whatever was inserted before it.

use crate::core::parser::{parse_record, KeyRadix};
use crate::core::trie::PinyinTrie;
use crate::error::{PinyinError, Result};
use std::io::BufRead;
use tracing::{debug, info, warn};

/// Outcome of loading one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
    /// Set when the stream failed part way through.
    pub io_error: Option<String>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.io_error.is_none()
    }
}

const BOM: char = '\u{FEFF}';

#[derive(Clone, Copy, Debug)]
enum Table {
    Single,
    Phrase,
}

/// Fills a trie from the single-character and phrase tables.
pub struct DictionaryLoader<'a> {
    trie: &'a mut PinyinTrie,
    radix: KeyRadix,
}

impl<'a> DictionaryLoader<'a> {
    pub fn new(trie: &'a mut PinyinTrie) -> Self {
        Self { trie, radix: KeyRadix::default() }
    }

    /// Sets how bare numeric keys are read in the tables loaded afterwards.
    pub fn with_key_radix(mut self, radix: KeyRadix) -> Self {
        self.radix = radix;
        self
    }

    /// Loads `code=[R1,R2,...]` lines. Only single code point keys are accepted.
    pub fn load_single<R: BufRead>(&mut self, reader: R) -> LoadReport {
        self.load(reader, Table::Single)
    }

    /// Loads `cp1,cp2,...=[R1,R2,...]` lines. Reading count must equal key length.
    pub fn load_phrases<R: BufRead>(&mut self, reader: R) -> LoadReport {
        self.load(reader, Table::Phrase)
    }

    fn load<R: BufRead>(&mut self, mut reader: R, table: Table) -> LoadReport {
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_no += 1,
                Err(e) => {
                    warn!(?table, line = line_no + 1, error = %e, "stream failed, stopping this table");
                    report.io_error = Some(e.to_string());
                    break;
                }
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    debug!(?table, line = line_no, error = %e, "skipping non UTF-8 record");
                    report.skipped += 1;
                    continue;
                }
            };

            let trimmed = line.trim_start_matches(BOM).trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match self.insert_line(trimmed, table) {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    debug!(?table, line = line_no, error = %e, "skipping record");
                    report.skipped += 1;
                }
            }
        }

        info!(
            ?table,
            inserted = report.inserted,
            skipped = report.skipped,
            "table loaded"
        );
        report
    }

    fn insert_line(&mut self, line: &str, table: Table) -> Result<()> {
        let record = parse_record(line, self.radix)?;
        match table {
            Table::Single => {
                if record.key.len() != 1 {
                    return Err(PinyinError::malformed(format!(
                        "single-character table key has {} code points",
                        record.key.len()
                    )));
                }
                self.trie.insert_single(record.key[0], record.readings);
                Ok(())
            }
            Table::Phrase => self.trie.insert_phrase(&record.key, record.readings),
        }
    }
}
