//! Pronunciation lexicons and the grapheme matcher.
//!
//! A lexicon maps literal graphemes to pronunciation data. During
//! tokenization every known grapheme found in added text is routed through
//! the phoneme operation instead of being appended verbatim. The matcher is
//! an ordered alternation over the lexicon keys, compiled once per options
//! value; when two keys could match at the same position, the one inserted
//! first wins.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde::de::{MapAccess, Visitor};

/// Pronunciation data for one grapheme.
///
/// The reserved alphabet key `sub` is not a phonetic notation: it marks the
/// value as a substitution alias, used as a fallback on platforms without
/// phoneme support.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Pronunciation {
    /// A bare phonetic string, treated as IPA.
    Phonetic(String),
    /// Notations keyed by alphabet name.
    Alphabets(HashMap<String, String>),
}

impl Pronunciation {
    /// Look up the notation for an alphabet, if present.
    pub(crate) fn get(&self, alphabet: &str) -> Option<&str> {
        match self {
            Pronunciation::Phonetic(ph) => (alphabet == "ipa").then_some(ph.as_str()),
            Pronunciation::Alphabets(map) => map.get(alphabet).map(String::as_str),
        }
    }
}

impl From<&str> for Pronunciation {
    fn from(ph: &str) -> Self {
        Pronunciation::Phonetic(ph.to_string())
    }
}

impl From<String> for Pronunciation {
    fn from(ph: String) -> Self {
        Pronunciation::Phonetic(ph)
    }
}

impl From<HashMap<String, String>> for Pronunciation {
    fn from(map: HashMap<String, String>) -> Self {
        Pronunciation::Alphabets(map)
    }
}

/// Insertion-ordered grapheme-to-pronunciation table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: Vec<(String, Pronunciation)>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. A replaced grapheme keeps its original
    /// position, so matcher priority is stable.
    pub fn insert(&mut self, grapheme: impl Into<String>, pronunciation: impl Into<Pronunciation>) {
        let grapheme = grapheme.into();
        let pronunciation = pronunciation.into();
        match self.entries.iter_mut().find(|(g, _)| *g == grapheme) {
            Some((_, p)) => *p = pronunciation,
            None => self.entries.push((grapheme, pronunciation)),
        }
    }

    pub fn get(&self, grapheme: &str) -> Option<&Pronunciation> {
        self.entries
            .iter()
            .find(|(g, _)| g == grapheme)
            .map(|(_, p)| p)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(g, _)| g.as_str())
    }
}

impl<G: Into<String>, P: Into<Pronunciation>> FromIterator<(G, P)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (G, P)>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        for (grapheme, pronunciation) in iter {
            lexicon.insert(grapheme, pronunciation);
        }
        lexicon
    }
}

// Hand-written so JSON maps deserialize in document order; a derived map
// type would lose the insertion order the matcher depends on.
impl<'de> Deserialize<'de> for Lexicon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct LexiconVisitor;

        impl<'de> Visitor<'de> for LexiconVisitor {
            type Value = Lexicon;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of graphemes to pronunciations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut lexicon = Lexicon::new();
                while let Some((grapheme, pronunciation)) =
                    map.next_entry::<String, Pronunciation>()?
                {
                    lexicon.insert(grapheme, pronunciation);
                }
                Ok(lexicon)
            }
        }

        deserializer.deserialize_map(LexiconVisitor)
    }
}

/// One span of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'t> {
    /// A matched lexicon grapheme.
    Grapheme(&'t str),
    /// Text between matches, appended verbatim.
    Literal(&'t str),
}

/// Compiled alternation over the lexicon keys.
#[derive(Debug, Clone)]
pub(crate) struct LexiconMatcher {
    re: Regex,
}

impl LexiconMatcher {
    /// Compile the matcher, or `None` when the lexicon has no usable keys.
    pub(crate) fn compile(lexicon: &Lexicon) -> Option<Self> {
        let pattern = lexicon
            .graphemes()
            .filter(|g| !g.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        if pattern.is_empty() {
            return None;
        }
        let re = Regex::new(&format!("(?:{pattern})")).ok()?;
        Some(Self { re })
    }

    /// Split text into grapheme matches and literal gaps.
    pub(crate) fn segments<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut pos = 0;
        for m in self.re.find_iter(text) {
            if m.start() > pos {
                segments.push(Segment::Literal(&text[pos..m.start()]));
            }
            segments.push(Segment::Grapheme(m.as_str()));
            pos = m.end();
        }
        if pos < text.len() {
            segments.push(Segment::Literal(&text[pos..]));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lexicon(keys: &[&str]) -> Lexicon {
        keys.iter().map(|k| (*k, "x")).collect()
    }

    #[test]
    fn segments_split_on_known_graphemes() {
        let matcher = LexiconMatcher::compile(&lexicon(&["foo", "bar"])).unwrap();
        assert_eq!(
            matcher.segments("foo bar"),
            vec![
                Segment::Grapheme("foo"),
                Segment::Literal(" "),
                Segment::Grapheme("bar"),
            ]
        );
    }

    #[test]
    fn unmatched_text_is_one_literal_run() {
        let matcher = LexiconMatcher::compile(&lexicon(&["foo"])).unwrap();
        assert_eq!(
            matcher.segments("hello world"),
            vec![Segment::Literal("hello world")]
        );
    }

    #[test]
    fn graphemes_match_inside_words() {
        let matcher = LexiconMatcher::compile(&lexicon(&["foo", "bar"])).unwrap();
        assert_eq!(
            matcher.segments("xfoobary"),
            vec![
                Segment::Literal("x"),
                Segment::Grapheme("foo"),
                Segment::Grapheme("bar"),
                Segment::Literal("y"),
            ]
        );
    }

    #[test]
    fn earlier_entries_win_overlaps() {
        let matcher = LexiconMatcher::compile(&lexicon(&["foo", "foobar"])).unwrap();
        assert_eq!(
            matcher.segments("foobar"),
            vec![Segment::Grapheme("foo"), Segment::Literal("bar")]
        );
    }

    #[test]
    fn regex_metacharacters_in_keys_are_literal() {
        let matcher = LexiconMatcher::compile(&lexicon(&["a.b"])).unwrap();
        assert_eq!(matcher.segments("aXb"), vec![Segment::Literal("aXb")]);
        assert_eq!(matcher.segments("a.b"), vec![Segment::Grapheme("a.b")]);
    }

    #[test]
    fn empty_lexicon_has_no_matcher() {
        assert!(LexiconMatcher::compile(&Lexicon::new()).is_none());
        let mut empty_key = Lexicon::new();
        empty_key.insert("", "x");
        assert!(LexiconMatcher::compile(&empty_key).is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut lex = Lexicon::new();
        lex.insert("foo", "fu");
        lex.insert("bar", "ba");
        lex.insert("foo", "few");
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.get("foo"), Some(&Pronunciation::Phonetic("few".into())));
        assert_eq!(lex.graphemes().collect::<Vec<_>>(), vec!["foo", "bar"]);
    }

    #[test]
    fn lexicon_deserializes_with_loose_pronunciations() {
        let lex: Lexicon =
            serde_json::from_str(r#"{"foo": "fu", "bar": {"sub": "ba"}}"#).unwrap();
        assert_eq!(lex.get("foo"), Some(&Pronunciation::Phonetic("fu".into())));
        assert_eq!(lex.get("bar").unwrap().get("sub"), Some("ba"));
        assert_eq!(lex.graphemes().collect::<Vec<_>>(), vec!["foo", "bar"]);
    }
}
