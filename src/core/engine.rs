use crate::config::PinyinConfig;
use crate::core::converter::PinyinConverter;
use crate::core::format::{format_reading, OutputFormat};
use crate::core::loader::{DictionaryLoader, LoadReport};
use crate::core::trie::PinyinTrie;
use crate::core::types::{CodePoint, PhraseMatch, Reading, Segment};
use crate::persistence::{load_snapshot, save_snapshot};
use crate::resource::{DirectoryResources, ResourceProvider};
use crate::error::Result;
use std::io::BufRead;
use std::path::Path;
use tracing::{info, warn};

/// Read-only pinyin dictionary plus the lookups built on it.
///
/// Built once, then shared; every method takes `&self`.
pub struct PinyinEngine {
    trie: PinyinTrie,
}

impl Default for PinyinEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PinyinEngine {
    /// An engine with an empty dictionary. Every lookup misses.
    pub fn new() -> Self {
        Self { trie: PinyinTrie::new() }
    }

    pub fn from_trie(trie: PinyinTrie) -> Self {
        Self { trie }
    }

    /// Loads both tables from readers. Each stream degrades independently.
    pub fn from_readers<S: BufRead, P: BufRead>(single: S, phrases: P) -> Self {
        let mut trie = PinyinTrie::new();
        let mut loader = DictionaryLoader::new(&mut trie);
        loader.load_single(single);
        loader.load_phrases(phrases);
        Self { trie }
    }

    /// Loads the configured tables through `provider`. A table that cannot be
    /// opened contributes nothing; the other one still loads.
    pub fn from_resources(provider: &dyn ResourceProvider, config: &PinyinConfig) -> Self {
        let mut trie = PinyinTrie::new();
        let mut loader = DictionaryLoader::new(&mut trie).with_key_radix(config.key_radix);

        let single = open_and_load(provider, &config.single_table, |r| loader.load_single(r));
        let phrases = open_and_load(provider, &config.phrase_table, |r| loader.load_phrases(r));

        info!(
            singles = trie.single_count(),
            phrases = trie.phrase_count(),
            single_complete = single.is_complete(),
            phrase_complete = phrases.is_complete(),
            "pinyin dictionary ready"
        );
        Self { trie }
    }

    /// Prefers a readable snapshot, otherwise loads the text tables from
    /// `config.data_dir` and writes the snapshot for next time. Never fails.
    pub fn from_config(config: &PinyinConfig) -> Self {
        if let Some(path) = &config.snapshot_path {
            match load_snapshot(path) {
                Ok(trie) => {
                    info!(?path, "loaded pinyin snapshot");
                    return Self::from_trie(trie);
                }
                Err(e) => warn!(?path, error = %e, "snapshot unavailable, loading tables"),
            }
        }

        let resources = DirectoryResources::new(config.data_dir.clone());
        let engine = Self::from_resources(&resources, config);

        if let Some(path) = &config.snapshot_path {
            if !engine.is_empty() {
                if let Err(e) = engine.save_dictionary(path) {
                    warn!(?path, error = %e, "could not write snapshot");
                }
            }
        }
        engine
    }

    pub fn trie(&self) -> &PinyinTrie {
        &self.trie
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Candidate readings, most common first. Empty for unmapped characters.
    pub fn lookup(&self, ch: char) -> &[Reading] {
        self.trie.lookup_single(u32::from(ch))
    }

    pub fn lookup_code_point(&self, cp: CodePoint) -> &[Reading] {
        self.trie.lookup_single(cp)
    }

    pub fn lookup_phrase(&self, seq: &[CodePoint], start: usize) -> Option<PhraseMatch> {
        self.trie.lookup_longest_phrase(seq, start)
    }

    /// Formatted candidates for one character, without duplicates.
    ///
    /// Readings that differ only in tone collapse under `NoTone`; the first
    /// occurrence keeps its position.
    pub fn candidates(&self, ch: char, format: OutputFormat) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for reading in self.lookup(ch) {
            let formatted = format_reading(reading, format);
            if !out.contains(&formatted) {
                out.push(formatted);
            }
        }
        out
    }

    pub fn segment(&self, text: &str) -> Vec<Segment> {
        PinyinConverter::new(&self.trie).segment(text)
    }

    pub fn to_pinyin_string(&self, text: &str, format: OutputFormat, separator: &str) -> String {
        PinyinConverter::new(&self.trie).to_pinyin_string(text, format, separator)
    }

    pub fn save_dictionary(&self, path: &Path) -> Result<()> {
        save_snapshot(&self.trie, path)
    }
}

fn open_and_load<F>(provider: &dyn ResourceProvider, name: &str, load: F) -> LoadReport
where
    F: FnOnce(Box<dyn BufRead + Send>) -> LoadReport,
{
    match provider.open(name) {
        Ok(reader) => load(reader),
        Err(e) => {
            warn!(resource = name, error = %e, "pinyin table unavailable");
            LoadReport { io_error: Some(e.to_string()), ..LoadReport::default() }
        }
    }
}
