use crate::core::format::{format_reading, OutputFormat};
use crate::core::trie::PinyinTrie;
use crate::core::types::{code_points, Segment};

/// Applies the phrase-first disambiguation policy over a run of text.
pub struct PinyinConverter<'a> {
    trie: &'a PinyinTrie,
}

impl<'a> PinyinConverter<'a> {
    pub fn new(trie: &'a PinyinTrie) -> Self {
        Self { trie }
    }

    /// Splits `text` into phrase overrides, single characters and unmapped characters.
    ///
    /// At each position the longest phrase anchored there wins and consumes its
    /// characters; otherwise exactly one character is consumed. Scanning is
    /// greedy per position with no lookahead.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let chars: Vec<char> = text.chars().collect();
        let cps = code_points(text);
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < cps.len() {
            if let Some(m) = self.trie.lookup_longest_phrase(&cps, pos) {
                segments.push(Segment::Phrase {
                    text: chars[pos..pos + m.length].iter().collect(),
                    readings: m.readings,
                });
                pos += m.length;
                continue;
            }

            let ch = chars[pos];
            let candidates = self.trie.lookup_single(cps[pos]);
            segments.push(if candidates.is_empty() {
                Segment::Unmapped(ch)
            } else {
                Segment::Single { ch, candidates: candidates.to_vec() }
            });
            pos += 1;
        }
        segments
    }

    /// Renders `text` as pinyin using phrase overrides, else the default
    /// (first) candidate. Unmapped characters are copied through and runs of
    /// them are not separated.
    pub fn to_pinyin_string(&self, text: &str, format: OutputFormat, separator: &str) -> String {
        let mut result = String::new();
        let mut last_was_pinyin = false;

        for segment in self.segment(text) {
            match segment {
                Segment::Phrase { readings, .. } => {
                    for reading in readings {
                        let syllable = format_reading(&reading, format);
                        push_syllable(&mut result, &mut last_was_pinyin, separator, &syllable);
                    }
                }
                Segment::Single { candidates, .. } => {
                    push_syllable(
                        &mut result,
                        &mut last_was_pinyin,
                        separator,
                        &format_reading(&candidates[0], format),
                    );
                }
                Segment::Unmapped(ch) => {
                    result.push(ch);
                    last_was_pinyin = false;
                }
            }
        }
        result
    }
}

fn push_syllable(result: &mut String, last_was_pinyin: &mut bool, separator: &str, syllable: &str) {
    if *last_was_pinyin {
        result.push_str(separator);
    }
    result.push_str(syllable);
    *last_was_pinyin = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::ToneStyle;

    fn sample_trie() -> PinyinTrie {
        let mut trie = PinyinTrie::new();
        trie.insert_single('中' as u32, vec!["ZHONG1".into(), "ZHONG4".into()]);
        trie.insert_single('国' as u32, vec!["GUO2".into()]);
        trie.insert_single('银' as u32, vec!["YIN2".into()]);
        trie.insert_single('行' as u32, vec!["XING2".into(), "HANG2".into()]);
        trie.insert_phrase(&code_points("银行"), vec!["YIN2".into(), "HANG2".into()])
            .unwrap();
        trie
    }

    #[test]
    fn phrase_overrides_single_default() {
        let trie = sample_trie();
        let converter = PinyinConverter::new(&trie);
        let out = converter.to_pinyin_string("中国银行", OutputFormat::default(), " ");
        assert_eq!(out, "zhong1 guo2 yin2 hang2");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        let trie = sample_trie();
        let converter = PinyinConverter::new(&trie);
        let fmt = OutputFormat::default().with_tone(ToneStyle::NoTone);
        assert_eq!(converter.to_pinyin_string("A中B", fmt, "-"), "AzhongB");
        assert_eq!(converter.to_pinyin_string("行!", fmt, "-"), "xing!");
    }

    #[test]
    fn segments_follow_greedy_policy() {
        let trie = sample_trie();
        let segments = PinyinConverter::new(&trie).segment("行银行x");
        assert_eq!(
            segments,
            vec![
                Segment::Single { ch: '行', candidates: vec!["XING2".into(), "HANG2".into()] },
                Segment::Phrase {
                    text: "银行".into(),
                    readings: vec!["YIN2".into(), "HANG2".into()]
                },
                Segment::Unmapped('x'),
            ]
        );
    }
}
