// Text Processing Service
// Sentence/word segmentation, word normalization and syllable estimation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

use super::error::AnalysisError;

/// Abbreviations whose trailing period never ends a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "cf", "al", "inc",
    "ltd", "corp", "dept", "fig", "vol", "approx", "est", "mt", "ave", "jan", "feb", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Punctuation class that closes a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Period,
    Exclamation,
    Question,
    Ellipsis,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    /// Token as it appeared in the document.
    pub surface: String,
    /// Lower-cased, apostrophe-folded form used for every lookup.
    pub normalized: String,
    pub syllables: u32,
}

impl Word {
    pub fn new(surface: &str) -> Self {
        let normalized = normalize_word(surface);
        let syllables = estimate_syllables(&normalized);
        Self {
            surface: surface.to_string(),
            normalized,
            syllables,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Sentence {
    pub text: String,
    /// UTF-8 byte offset (0-based) into the analyzed text.
    pub start: usize,
    /// UTF-8 byte offset (0-based, end-exclusive) into the analyzed text.
    pub end: usize,
    pub words: Vec<Word>,
    pub terminal: Terminal,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Segmented document. Every sentence holds at least one word and the
/// sequence holds at least one sentence.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceSequence {
    sentences: Vec<Sentence>,
    degraded: bool,
}

impl SentenceSequence {
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }

    pub fn syllable_count(&self) -> u64 {
        self.words().map(|w| w.syllables as u64).sum()
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.sentences.iter().flat_map(|s| s.words.iter())
    }

    pub fn sentence_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(Sentence::word_count).collect()
    }

    /// True when the whitespace-only fallback was used.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

#[derive(Debug, Clone, Copy)]
struct SentenceSpan {
    start: usize,
    end: usize,
    terminal: Terminal,
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:\p{L}\.){2,}|[\p{L}\p{N}]+(?:['\x{2019}\x{2010}\x{2011}\-][\p{L}\p{N}]+|[.,]\p{N}+)*",
        )
        .expect("word regex")
    })
}

/// Split text into sentences and words.
///
/// Fails with [`AnalysisError::NoWords`] when nothing word-like survives.
pub fn segment(text: &str) -> Result<SentenceSequence, AnalysisError> {
    let degraded = !is_latin_dominant(text);
    if degraded {
        debug!(
            chars = text.chars().count(),
            "segmentation.degraded: falling back to whitespace word splitting"
        );
    }

    let mut sentences: Vec<Sentence> = Vec::new();
    // Start of a leading word-less fragment waiting for the next real sentence.
    let mut carry_start: Option<usize> = None;

    for span in split_sentence_spans(text, degraded) {
        let slice = &text[span.start..span.end];
        let words = if degraded {
            whitespace_words(slice)
        } else {
            tokenize_words(slice)
        };

        if words.is_empty() {
            match sentences.last_mut() {
                Some(prev) => {
                    prev.end = span.end;
                    prev.text = text[prev.start..span.end].to_string();
                }
                None => {
                    carry_start.get_or_insert(span.start);
                }
            }
            continue;
        }

        let start = carry_start.take().unwrap_or(span.start);
        sentences.push(Sentence {
            text: text[start..span.end].to_string(),
            start,
            end: span.end,
            words,
            terminal: span.terminal,
        });
    }

    if sentences.is_empty() {
        return Err(AnalysisError::NoWords);
    }

    Ok(SentenceSequence { sentences, degraded })
}

fn split_sentence_spans(text: &str, degraded: bool) -> Vec<SentenceSpan> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        let sentence_start = match start {
            Some(s) => s,
            None if ch.is_whitespace() => {
                i += 1;
                continue;
            }
            None => {
                start = Some(pos);
                pos
            }
        };

        if !is_terminal(ch) {
            i += 1;
            continue;
        }

        // "?!", "..." and the like close a sentence once.
        let mut j = i;
        let mut run = String::new();
        while j < chars.len() && is_terminal(chars[j].1) {
            run.push(chars[j].1);
            j += 1;
        }
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        let at_end = j >= chars.len();
        let end = if at_end { text.len() } else { chars[j].0 };
        let followed_by_space = at_end || chars[j].1.is_whitespace();

        let boundary = if run.chars().any(is_cjk_terminal) {
            true
        } else if !followed_by_space {
            false
        } else if run == "." && !degraded && !at_end {
            !is_abbreviation(&text[sentence_start..pos])
        } else {
            true
        };

        if boundary {
            spans.push(SentenceSpan {
                start: sentence_start,
                end,
                terminal: classify_terminal(&run),
            });
            start = None;
        }
        i = j;
    }

    if let Some(s) = start {
        let end = s + text[s..].trim_end().len();
        if end > s {
            spans.push(SentenceSpan {
                start: s,
                end,
                terminal: Terminal::None,
            });
        }
    }

    spans
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\u{2026}') || is_cjk_terminal(ch)
}

fn is_cjk_terminal(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？')
}

fn is_closer(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}' | '」' | '』' | '）'
    )
}

fn classify_terminal(run: &str) -> Terminal {
    if run.contains(['?', '？']) {
        Terminal::Question
    } else if run.contains(['!', '！']) {
        Terminal::Exclamation
    } else if run.contains('\u{2026}') || run.matches('.').count() >= 2 {
        Terminal::Ellipsis
    } else {
        Terminal::Period
    }
}

/// Whether the token right before a period is an abbreviation or initial.
fn is_abbreviation(before: &str) -> bool {
    let token = before
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_start_matches(['(', '[', '"', '\'', '\u{201C}', '\u{2018}']);
    if token.is_empty() {
        return false;
    }

    let mut chars = token.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return first.is_uppercase();
    }

    let lower = token.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }

    // Dotted initialisms: "U.S", "a.m", "e.g"
    lower.contains('.')
        && lower
            .split('.')
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

fn tokenize_words(sentence: &str) -> Vec<Word> {
    word_re()
        .find_iter(sentence)
        .map(|m| Word::new(m.as_str()))
        .collect()
}

fn whitespace_words(sentence: &str) -> Vec<Word> {
    sentence
        .split_whitespace()
        .map(|chunk| chunk.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|chunk| !chunk.is_empty())
        .map(Word::new)
        .collect()
}

fn is_latin_dominant(text: &str) -> bool {
    let mut latin = 0usize;
    let mut alphabetic = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        alphabetic += 1;
        if c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}') {
            latin += 1;
        }
    }
    alphabetic == 0 || latin * 2 >= alphabetic
}

/// Lower-case a token, fold typographic apostrophes/hyphens and drop the
/// trailing dot of initialisms.
pub fn normalize_word(surface: &str) -> String {
    let folded: String = surface
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            '\u{2010}' | '\u{2011}' => '-',
            c => c,
        })
        .collect();
    folded.trim_end_matches('.').to_lowercase()
}

/// Vowel-group syllable estimate with silent-ending adjustments.
/// Tokens without letters (numbers) count as one syllable.
pub fn estimate_syllables(word: &str) -> u32 {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let mut groups: u32 = 0;
    let mut prev_vowel = false;
    for (idx, &c) in letters.iter().enumerate() {
        let vowel = is_vowel(c, idx);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    if groups > 1 && has_silent_ending(&letters) {
        groups -= 1;
    }
    groups.max(1)
}

fn is_vowel(c: char, idx: usize) -> bool {
    match c {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => idx > 0,
        'à'..='æ' | 'è'..='ï' | 'ò'..='ö' | 'ø'..='ü' => true,
        _ => false,
    }
}

fn has_silent_ending(letters: &[char]) -> bool {
    let n = letters.len();
    if n < 3 {
        return false;
    }
    let (before, prev, last) = (letters[n - 3], letters[n - 2], letters[n - 1]);
    let before_is_consonant = !is_vowel(before, n - 3);
    match (prev, last) {
        // "-le" after a consonant is voiced: "ta-ble", "un-cle"
        (p, 'e') if !is_vowel(p, n - 2) => !(p == 'l' && before_is_consonant),
        ('e', 'd') => before_is_consonant && !matches!(before, 't' | 'd'),
        ('e', 's') => before_is_consonant && !matches!(before, 's' | 'x' | 'z' | 'c' | 'g' | 'h'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(seq: &SentenceSequence) -> Vec<String> {
        seq.words().map(|w| w.surface.clone()).collect()
    }

    #[test]
    fn test_segment_two_sentences() {
        let text = "I felt sorrow for my uncle who had just met with an accident. I went to see him in the Hospital.";
        let seq = segment(text).unwrap();
        assert_eq!(seq.sentence_count(), 2);
        assert_eq!(seq.sentence_lengths(), vec![13, 8]);
        assert_eq!(seq.sentences()[0].terminal, Terminal::Period);
        assert!(!seq.is_degraded());
    }

    #[test]
    fn test_decimal_does_not_split() {
        let seq = segment("Revenue grew 3.2% this year. Costs were flat.").unwrap();
        assert_eq!(seq.sentence_count(), 2);
        assert!(surfaces(&seq).contains(&"3.2".to_string()));
    }

    #[test]
    fn test_abbreviations_and_initials_do_not_split() {
        let seq = segment("Dr. Smith met J. Doe at noon. They talked.").unwrap();
        assert_eq!(seq.sentence_count(), 2);
        assert_eq!(seq.sentences()[0].text, "Dr. Smith met J. Doe at noon.");

        let seq = segment("She moved to the U.S. in May, e.g. for work. It went well.").unwrap();
        assert_eq!(seq.sentence_count(), 2);
        assert!(surfaces(&seq).contains(&"U.S.".to_string()));
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_sentence() {
        let seq = segment("just some words without an ending").unwrap();
        assert_eq!(seq.sentence_count(), 1);
        assert_eq!(seq.sentences()[0].terminal, Terminal::None);
        assert_eq!(seq.word_count(), 6);
    }

    #[test]
    fn test_terminal_runs_and_closing_quotes() {
        let seq = segment("He shouted \"stop!\" Then he left?! Well... maybe").unwrap();
        let texts: Vec<&str> = seq.sentences().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["He shouted \"stop!\"", "Then he left?!", "Well...", "maybe"]);
        assert_eq!(seq.sentences()[0].terminal, Terminal::Exclamation);
        assert_eq!(seq.sentences()[1].terminal, Terminal::Question);
        assert_eq!(seq.sentences()[2].terminal, Terminal::Ellipsis);
    }

    #[test]
    fn test_hyphens_and_apostrophes_stay_whole() {
        let seq = segment("It's a well-known fact, don't you think?").unwrap();
        assert_eq!(
            surfaces(&seq),
            vec!["It's", "a", "well-known", "fact", "don't", "you", "think"]
        );
        let normalized: Vec<&str> = seq.words().map(|w| w.normalized.as_str()).collect();
        assert_eq!(normalized[0], "it's");
    }

    #[test]
    fn test_curly_apostrophe_is_folded() {
        let seq = segment("Don\u{2019}t panic.").unwrap();
        assert_eq!(seq.words().next().unwrap().normalized, "don't");
    }

    #[test]
    fn test_punctuation_only_fragments_are_folded() {
        let seq = segment("Great work. !!! Truly.").unwrap();
        assert_eq!(seq.sentence_count(), 2);
        assert_eq!(seq.sentences()[0].text, "Great work. !!!");

        let seq = segment("?? Hello there.").unwrap();
        assert_eq!(seq.sentence_count(), 1);
        assert_eq!(seq.sentences()[0].start, 0);
    }

    #[test]
    fn test_no_words_is_an_error() {
        assert_eq!(segment("!!! ... ???").unwrap_err(), AnalysisError::NoWords);
    }

    #[test]
    fn test_sentences_cover_the_text() {
        let text = "  First one.  Second one!\n\nThird \"quoted\" one? Trailing bit";
        let seq = segment(text).unwrap();
        let mut cursor = 0;
        for s in seq.sentences() {
            assert!(text[cursor..s.start].trim().is_empty());
            assert_eq!(&text[s.start..s.end], s.text);
            cursor = s.end;
        }
        assert!(text[cursor..].trim().is_empty());
    }

    #[test]
    fn test_non_latin_falls_back_to_whitespace_words() {
        let seq = segment("这是第一句。这是第二句！").unwrap();
        assert!(seq.is_degraded());
        assert_eq!(seq.sentence_count(), 2);
        assert_eq!(seq.word_count(), 2);

        let seq = segment("Привет мир. Как дела?").unwrap();
        assert!(seq.is_degraded());
        assert_eq!(seq.word_count(), 4);
    }

    #[test]
    fn test_segment_is_deterministic() {
        let text = "One sentence here. Another one there! And a third?";
        let a = segment(text).unwrap();
        let b = segment(text).unwrap();
        assert_eq!(a.sentence_lengths(), b.sentence_lengths());
        assert_eq!(surfaces(&a), surfaces(&b));
    }

    #[test]
    fn test_estimate_syllables() {
        assert_eq!(estimate_syllables("hello"), 2);
        assert_eq!(estimate_syllables("the"), 1);
        assert_eq!(estimate_syllables("see"), 1);
        assert_eq!(estimate_syllables("uncle"), 2);
        assert_eq!(estimate_syllables("while"), 1);
        assert_eq!(estimate_syllables("rates"), 1);
        assert_eq!(estimate_syllables("pages"), 2);
        assert_eq!(estimate_syllables("remained"), 2);
        assert_eq!(estimate_syllables("indicated"), 4);
        assert_eq!(estimate_syllables("hospital"), 3);
        assert_eq!(estimate_syllables("my"), 1);
        assert_eq!(estimate_syllables("3.2"), 1);
    }

    #[test]
    fn test_syllables_never_decrease_with_more_vowel_groups() {
        let words = ["cat", "table", "banana", "education", "unbelievable"];
        let counts: Vec<u32> = words.iter().map(|w| estimate_syllables(w)).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{:?}", counts);
    }
}
