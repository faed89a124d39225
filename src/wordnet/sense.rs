// Structured word senses.
//
// A Sense is one meaning of a word: a lemma, a part of speech, and the
// 1-based sense number within that lemma's entry. The synset offset is kept
// internally so the graph can follow hypernym pointers without re-parsing
// anything.

use std::fmt;

/// Part of speech of a synset, from the WNdb synset-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    /// Satellite adjective — grouped with adjectives in the database files.
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// Parse a WNdb synset-type character (`n`, `v`, `a`, `s`, `r`).
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' => Some(Self::Adjective),
            's' => Some(Self::AdjectiveSatellite),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    /// The single-character tag used in canonical sense names.
    pub fn tag(&self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::AdjectiveSatellite => 's',
            Self::Adverb => 'r',
        }
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, Self::Verb)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One sense of a word in the lexical graph.
///
/// The lemma is the lowercase head word of the sense's synset, with
/// multi-word lemmas joined by underscores (`natural_object`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub lemma: String,
    pub part_of_speech: PartOfSpeech,
    /// 1-based position within the lemma's sense list (frequency order).
    pub sense_index: u32,
    /// Byte offset of the sense's synset in its data file. Graph-internal.
    pub(crate) offset: u64,
}

impl Sense {
    /// Canonical display name, e.g. `dog.n.01`. Used in logs only.
    pub fn canonical(&self) -> String {
        format!(
            "{}.{}.{:02}",
            self.lemma, self.part_of_speech, self.sense_index
        )
    }
}
