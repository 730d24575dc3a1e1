//! Rendering of stored readings (`ZHONG1`, `LU:4`) into display pinyin.

use serde::{Deserialize, Serialize};

/// How the tone is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToneStyle {
    /// `zhong1`
    #[default]
    NumberSuffix,
    /// `zhōng`
    DiacriticMark,
    /// `zhong`
    NoTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseStyle {
    Upper,
    #[default]
    Lower,
}

/// How the ü vowel is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VCharStyle {
    /// `lu:`
    #[default]
    UAndColon,
    /// `lv`
    LiteralV,
    /// `lü`
    UnicodeUDiaeresis,
}

/// Presentation settings passed by value to [`format_reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputFormat {
    pub tone: ToneStyle,
    pub case: CaseStyle,
    pub v_char: VCharStyle,
}

impl OutputFormat {
    pub fn new(tone: ToneStyle, case: CaseStyle, v_char: VCharStyle) -> Self {
        Self { tone, case, v_char }
    }

    pub fn with_tone(mut self, tone: ToneStyle) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_case(mut self, case: CaseStyle) -> Self {
        self.case = case;
        self
    }

    pub fn with_v_char(mut self, v_char: VCharStyle) -> Self {
        self.v_char = v_char;
        self
    }
}

// Internal stand-in for ü while the syllable is being processed.
const U_DIAERESIS: char = 'ü';

const COMBINING_MARKS: [char; 4] = ['\u{0304}', '\u{0301}', '\u{030C}', '\u{0300}'];

/// Formats one stored reading.
///
/// The ü placeholder is resolved first, then the tone is rendered, and case
/// is applied last to the whole string. A reading that does not end in a tone
/// digit 1-5 is passed through with only v-style and case applied.
pub fn format_reading(reading: &str, format: OutputFormat) -> String {
    let lower = reading.trim().to_lowercase();
    let (syllable, tone) = split_tone(&lower);
    let syllable = normalize_u(syllable);

    let mut out = match (tone, format.tone) {
        (Some(tone), ToneStyle::NumberSuffix) => {
            let mut s = render_v(&syllable, format.v_char);
            s.push(char::from(b'0' + tone));
            s
        }
        (Some(tone @ 1..=4), ToneStyle::DiacriticMark) => {
            mark_syllable(&syllable, tone, format.v_char)
        }
        _ => render_v(&syllable, format.v_char),
    };

    if format.case == CaseStyle::Upper {
        out = out.to_uppercase();
    }
    out
}

fn split_tone(reading: &str) -> (&str, Option<u8>) {
    match reading.as_bytes().last() {
        Some(&d @ b'1'..=b'5') => (&reading[..reading.len() - 1], Some(d - b'0')),
        _ => (reading, None),
    }
}

fn normalize_u(syllable: &str) -> String {
    syllable.replace("u:", "ü").replace('v', "ü")
}

fn render_v(syllable: &str, style: VCharStyle) -> String {
    let mut out = String::with_capacity(syllable.len() + 1);
    for c in syllable.chars() {
        push_vowel(&mut out, c, style);
    }
    out
}

fn push_vowel(out: &mut String, c: char, style: VCharStyle) {
    if c != U_DIAERESIS {
        out.push(c);
        return;
    }
    match style {
        VCharStyle::UAndColon => out.push_str("u:"),
        VCharStyle::LiteralV => out.push('v'),
        VCharStyle::UnicodeUDiaeresis => out.push(U_DIAERESIS),
    }
}

/// Index (in chars) of the tone-bearing vowel: a, then e, then the o of ou,
/// then the last vowel.
fn tone_vowel_index(chars: &[char]) -> Option<usize> {
    if let Some(i) = chars.iter().position(|&c| c == 'a') {
        return Some(i);
    }
    if let Some(i) = chars.iter().position(|&c| c == 'e') {
        return Some(i);
    }
    if let Some(i) = chars.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    chars
        .iter()
        .rposition(|&c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | U_DIAERESIS))
}

fn marked_vowel(c: char, tone: u8) -> Option<char> {
    let row = match c {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        U_DIAERESIS => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        _ => return None,
    };
    Some(row[usize::from(tone - 1)])
}

fn mark_syllable(syllable: &str, tone: u8, style: VCharStyle) -> String {
    let chars: Vec<char> = syllable.chars().collect();
    let Some(target) = tone_vowel_index(&chars) else {
        return render_v(syllable, style);
    };

    let mut out = String::with_capacity(syllable.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i != target {
            push_vowel(&mut out, c, style);
            continue;
        }
        match (c, style) {
            (U_DIAERESIS, VCharStyle::UAndColon) => {
                out.extend(marked_vowel('u', tone));
                out.push(':');
            }
            (U_DIAERESIS, VCharStyle::LiteralV) => {
                out.push('v');
                out.push(COMBINING_MARKS[usize::from(tone - 1)]);
            }
            _ => out.extend(marked_vowel(c, tone)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(tone: ToneStyle, case: CaseStyle, v_char: VCharStyle) -> OutputFormat {
        OutputFormat::new(tone, case, v_char)
    }

    #[test]
    fn default_matches_number_lower_colon() {
        let f = OutputFormat::default();
        assert_eq!(f, fmt(ToneStyle::NumberSuffix, CaseStyle::Lower, VCharStyle::UAndColon));
        assert_eq!(format_reading("ZHONG1", f), "zhong1");
    }

    #[test]
    fn tone_mark_placement() {
        let mark = OutputFormat::default()
            .with_tone(ToneStyle::DiacriticMark)
            .with_v_char(VCharStyle::UnicodeUDiaeresis);
        assert_eq!(format_reading("ZHONG1", mark), "zhōng");
        assert_eq!(format_reading("hao3", mark), "hǎo");
        assert_eq!(format_reading("xie4", mark), "xiè");
        assert_eq!(format_reading("lou2", mark), "lóu");
        assert_eq!(format_reading("gui4", mark), "guì");
        assert_eq!(format_reading("liu2", mark), "liú");
        assert_eq!(format_reading("jiong3", mark), "jiǒng");
        assert_eq!(format_reading("lu:e4", mark), "lüè");
        assert_eq!(format_reading("nv3", mark), "nǚ");
        assert_eq!(format_reading("er2", mark), "ér");
    }

    #[test]
    fn last_vowel_fallback_includes_u_diaeresis() {
        let mark = OutputFormat::default()
            .with_tone(ToneStyle::DiacriticMark)
            .with_v_char(VCharStyle::UnicodeUDiaeresis);
        assert_eq!(format_reading("qiu1", mark), "qiū");
        assert_eq!(format_reading("lu:2", mark), "lǘ");
        assert_eq!(format_reading("JV4", mark), "jǜ");
    }

    #[test]
    fn neutral_tone_rendering() {
        let base = OutputFormat::default();
        assert_eq!(format_reading("ma5", base), "ma5");
        assert_eq!(format_reading("ma5", base.with_tone(ToneStyle::DiacriticMark)), "ma");
        assert_eq!(format_reading("ma5", base.with_tone(ToneStyle::NoTone)), "ma");
    }

    #[test]
    fn v_char_styles_are_independent_of_tone_and_case() {
        for tone in [ToneStyle::NumberSuffix, ToneStyle::NoTone] {
            let f = fmt(tone, CaseStyle::Lower, VCharStyle::UAndColon);
            assert!(format_reading("LV4", f).starts_with("lu:"));
            let f = fmt(tone, CaseStyle::Lower, VCharStyle::LiteralV);
            assert!(format_reading("LU:4", f).starts_with("lv"));
            let f = fmt(tone, CaseStyle::Upper, VCharStyle::UnicodeUDiaeresis);
            assert!(format_reading("lu:4", f).starts_with("LÜ"));
        }

        let mark = ToneStyle::DiacriticMark;
        assert_eq!(format_reading("lu:4", fmt(mark, CaseStyle::Lower, VCharStyle::UAndColon)), "lù:");
        assert_eq!(
            format_reading("lu:4", fmt(mark, CaseStyle::Lower, VCharStyle::LiteralV)),
            "lv\u{0300}"
        );
        assert_eq!(
            format_reading("lu:4", fmt(mark, CaseStyle::Lower, VCharStyle::UnicodeUDiaeresis)),
            "lǜ"
        );
    }

    #[test]
    fn case_applies_last() {
        let f = fmt(ToneStyle::DiacriticMark, CaseStyle::Upper, VCharStyle::UnicodeUDiaeresis);
        assert_eq!(format_reading("zhong1", f), "ZHŌNG");
        assert_eq!(format_reading("lv3", f), "LǙ");
    }

    #[test]
    fn malformed_and_vowelless_readings_pass_through() {
        let mark = OutputFormat::default().with_tone(ToneStyle::DiacriticMark);
        assert_eq!(format_reading("abc9", mark), "abc9");
        assert_eq!(format_reading("m2", mark), "m");
        assert_eq!(format_reading("hng", OutputFormat::default()), "hng");
        assert_eq!(format_reading("", OutputFormat::default()), "");
    }

    #[test]
    fn deterministic_output() {
        let f = fmt(ToneStyle::DiacriticMark, CaseStyle::Upper, VCharStyle::LiteralV);
        assert_eq!(format_reading("NV3", f), format_reading("NV3", f));
    }
}
