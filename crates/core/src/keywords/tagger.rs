//! Rule-based part-of-speech tagger.
//!
//! Tagging runs in two passes over already lower-cased tokens:
//!
//! 1. **Initial tags**: a closed-class and common-word lexicon, then suffix heuristics for
//!    unknown words, defaulting to a singular noun.
//! 2. **Context rules**: a single left-to-right pass that retags a token based on the final tag
//!    of the token before it (for example a gerund after a preposition becomes a noun).
//!
//! Tags follow the Penn Treebank names (see [`Tag::penn`]). The tagger only needs to be good
//! enough to separate nouns from everything else; it does not attempt full disambiguation.

use std::collections::HashMap;

/// Part-of-speech tag, a subset of the Penn Treebank tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Conjunction,
    Cardinal,
    Determiner,
    Existential,
    Preposition,
    Adjective,
    Modal,
    Noun,
    PluralNoun,
    Pronoun,
    PossessivePronoun,
    Adverb,
    To,
    Interjection,
    Verb,
    VerbPast,
    VerbGerund,
    VerbParticiple,
    VerbPresent,
    VerbThirdPerson,
    WhDeterminer,
    WhPronoun,
    WhAdverb,
}

impl Tag {
    /// Penn Treebank label for this tag.
    pub fn penn(&self) -> &'static str {
        match self {
            Tag::Conjunction => "CC",
            Tag::Cardinal => "CD",
            Tag::Determiner => "DT",
            Tag::Existential => "EX",
            Tag::Preposition => "IN",
            Tag::Adjective => "JJ",
            Tag::Modal => "MD",
            Tag::Noun => "NN",
            Tag::PluralNoun => "NNS",
            Tag::Pronoun => "PRP",
            Tag::PossessivePronoun => "PRP$",
            Tag::Adverb => "RB",
            Tag::To => "TO",
            Tag::Interjection => "UH",
            Tag::Verb => "VB",
            Tag::VerbPast => "VBD",
            Tag::VerbGerund => "VBG",
            Tag::VerbParticiple => "VBN",
            Tag::VerbPresent => "VBP",
            Tag::VerbThirdPerson => "VBZ",
            Tag::WhDeterminer => "WDT",
            Tag::WhPronoun => "WP",
            Tag::WhAdverb => "WRB",
        }
    }

    /// True for every noun category (`NN*`).
    pub fn is_noun(&self) -> bool {
        self.penn().starts_with("NN")
    }

    /// Tags after which a following gerund or base verb reads as a noun.
    fn opens_noun_phrase(&self) -> bool {
        matches!(
            self,
            Tag::Determiner | Tag::Adjective | Tag::PossessivePronoun | Tag::Cardinal
        )
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "all", "both", "either", "neither", "such", "half",
];

/// Determiners that can also stand alone as the subject ("this is", "that makes").
const DEMONSTRATIVES: &[&str] = &["this", "that", "these", "those"];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite",
    "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "outside", "over", "past", "since", "than", "through", "throughout", "till",
    "toward", "towards", "under", "underneath", "unlike", "until", "up", "upon", "via", "with",
    "within", "without", "because", "although", "though", "while", "whether", "if", "unless",
    "whereas",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const CARDINALS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "hundred", "thousand", "million", "billion",
];

const ADJECTIVES: &[&str] = &[
    "good", "new", "first", "last", "long", "great", "little", "own", "other", "old", "right",
    "big", "high", "different", "small", "large", "next", "early", "young", "important", "few",
    "public", "bad", "same", "able", "best", "better", "sure", "free", "true", "whole", "real",
    "full", "clear", "hard", "easy", "strong", "possible", "major", "special", "low", "recent",
    "certain", "personal", "red", "white", "black", "blue", "green", "hot", "cold", "dark",
    "short", "simple", "late", "general", "local", "similar", "human", "main", "available",
    "current", "wide", "deep", "huge", "single", "political", "social", "economic", "national",
    "natural", "solar", "lunar", "final", "second", "third", "fourth", "fifth", "sixth",
    "seventh", "eighth", "ninth", "tenth", "fast", "slow", "happy", "sad", "quick", "nice",
    "fine", "poor", "rich", "common", "modern", "serious", "several", "various", "entire",
    "particular", "many", "much", "more", "most", "less", "least",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "just", "only", "then", "now", "so", "too", "well", "still", "even",
    "never", "always", "often", "here", "again", "already", "almost", "quite", "really", "soon",
    "perhaps", "maybe", "however", "rather", "ever", "once", "together", "away", "back", "far",
    "further", "down",
];

const INTERJECTIONS: &[&str] = &["oh", "hello", "yes", "okay", "ok", "wow"];

const WH_WORDS: &[(&str, Tag)] = &[
    ("which", Tag::WhDeterminer),
    ("whatever", Tag::WhDeterminer),
    ("who", Tag::WhPronoun),
    ("whom", Tag::WhPronoun),
    ("what", Tag::WhPronoun),
    ("whose", Tag::WhPronoun),
    ("when", Tag::WhAdverb),
    ("where", Tag::WhAdverb),
    ("why", Tag::WhAdverb),
    ("how", Tag::WhAdverb),
];

const AUXILIARIES: &[(&str, Tag)] = &[
    ("be", Tag::Verb),
    ("am", Tag::VerbPresent),
    ("are", Tag::VerbPresent),
    ("is", Tag::VerbThirdPerson),
    ("was", Tag::VerbPast),
    ("were", Tag::VerbPast),
    ("been", Tag::VerbParticiple),
    ("being", Tag::VerbGerund),
    ("have", Tag::VerbPresent),
    ("has", Tag::VerbThirdPerson),
    ("had", Tag::VerbPast),
    ("having", Tag::VerbGerund),
    ("do", Tag::VerbPresent),
    ("does", Tag::VerbThirdPerson),
    ("did", Tag::VerbPast),
    ("doing", Tag::VerbGerund),
    ("done", Tag::VerbParticiple),
];

/// Words that are predominantly verbs. Ambiguous noun/verb words are deliberately left out so
/// they fall through to the noun default.
const BASE_VERBS: &[&str] = &[
    "make", "go", "take", "get", "give", "say", "know", "think", "see", "come", "want", "find",
    "tell", "ask", "seem", "feel", "try", "leave", "become", "keep", "let", "begin", "bring",
    "happen", "write", "provide", "sit", "stand", "lose", "pay", "meet", "include", "continue",
    "learn", "understand", "follow", "create", "speak", "read", "allow", "spend", "grow",
    "consider", "appear", "buy", "wait", "serve", "die", "send", "expect", "build", "stay",
    "reach", "kill", "remain", "suggest", "raise", "sell", "require", "decide", "explain",
    "describe", "discuss", "believe", "hear", "improve", "analyze", "analyse", "extract",
];

const IRREGULAR_PAST: &[&str] = &[
    "made", "went", "took", "got", "gave", "said", "knew", "thought", "saw", "came", "found",
    "told", "felt", "left", "became", "kept", "began", "brought", "wrote", "sat", "stood",
    "lost", "paid", "met", "understood", "spoke", "grew", "bought", "sent", "built", "fell",
    "held", "ran",
];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "gone", "taken", "given", "known", "seen", "written", "spoken", "grown", "shown", "begun",
    "fallen", "chosen", "driven", "eaten", "forgotten",
];

/// Nouns that the suffix heuristics would otherwise mistag.
const NOUN_EXCEPTIONS: &[&str] = &[
    "thing", "nothing", "something", "anything", "everything", "morning", "evening", "ceiling",
    "string", "spring", "king", "ring", "wing", "family", "supply", "reply", "assembly",
    "anomaly", "monopoly", "butterfly", "speed", "seed", "greed", "breed", "creed", "archive",
    "detective", "executive", "objective", "motive", "initiative", "representative",
    "alternative", "perspective", "incentive", "table", "cable", "vegetable", "variable",
    "timetable", "radish",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "istic", "less", "ish",
];

/// Deterministic lexicon and rule based tagger.
///
/// Construct once and share; tagging never mutates the tagger.
#[derive(Debug, Clone)]
pub struct Tagger {
    lexicon: HashMap<&'static str, Tag>,
}

impl Tagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();

        let groups: &[(&[&'static str], Tag)] = &[
            (NOUN_EXCEPTIONS, Tag::Noun),
            (BASE_VERBS, Tag::Verb),
            (IRREGULAR_PAST, Tag::VerbPast),
            (IRREGULAR_PARTICIPLES, Tag::VerbParticiple),
            (ADJECTIVES, Tag::Adjective),
            (ADVERBS, Tag::Adverb),
            (INTERJECTIONS, Tag::Interjection),
            (CARDINALS, Tag::Cardinal),
            (MODALS, Tag::Modal),
            (CONJUNCTIONS, Tag::Conjunction),
            (PREPOSITIONS, Tag::Preposition),
            (POSSESSIVE_PRONOUNS, Tag::PossessivePronoun),
            (PRONOUNS, Tag::Pronoun),
            (DETERMINERS, Tag::Determiner),
        ];
        // Later groups win, so closed classes override the open-class lists above them.
        for (words, tag) in groups {
            for word in *words {
                lexicon.insert(*word, *tag);
            }
        }
        for (word, tag) in WH_WORDS.iter().chain(AUXILIARIES) {
            lexicon.insert(*word, *tag);
        }
        lexicon.insert("to", Tag::To);
        lexicon.insert("there", Tag::Existential);

        Self { lexicon }
    }

    /// Tag every token. The output has the same length and order as `tokens`.
    pub fn tag<'a>(&self, tokens: &[&'a str]) -> Vec<(&'a str, Tag)> {
        let mut tagged: Vec<(&'a str, Tag)> = tokens
            .iter()
            .map(|token| (*token, self.initial_tag(token)))
            .collect();

        for i in 1..tagged.len() {
            let (word, tag) = tagged[i];
            if is_auxiliary(word) {
                continue;
            }
            let (prev_word, prev_tag) = tagged[i - 1];
            tagged[i].1 = contextual_tag(tag, prev_word, prev_tag);
        }

        tagged
    }

    fn initial_tag(&self, word: &str) -> Tag {
        if let Some(tag) = self.lexicon.get(word) {
            return *tag;
        }
        if !word.is_empty() && word.chars().all(|c| c.is_numeric()) {
            return Tag::Cardinal;
        }

        let len = word.chars().count();
        if len > 4 && word.ends_with("ly") {
            return Tag::Adverb;
        }
        if len > 4 && word.ends_with("ing") {
            return Tag::VerbGerund;
        }
        if len > 4 && word.ends_with("ed") {
            return Tag::VerbPast;
        }
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Tag::Adjective;
        }
        if len > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return if self.is_inflected_base_verb(word) {
                Tag::VerbThirdPerson
            } else {
                Tag::PluralNoun
            };
        }

        Tag::Noun
    }

    /// True when `word` is a `-s`, `-es` or `-ies` inflection of a known base verb.
    fn is_inflected_base_verb(&self, word: &str) -> bool {
        let is_base = |stem: &str| self.lexicon.get(stem) == Some(&Tag::Verb);

        if let Some(stem) = word.strip_suffix("ies") {
            if is_base(format!("{stem}y").as_str()) {
                return true;
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            if is_base(stem) {
                return true;
            }
        }
        word.strip_suffix('s').is_some_and(is_base)
    }
}

fn is_auxiliary(word: &str) -> bool {
    AUXILIARIES.iter().any(|(aux, _)| *aux == word)
}

fn contextual_tag(tag: Tag, prev_word: &str, prev_tag: Tag) -> Tag {
    // A demonstrative directly before a finite verb is its subject, not a noun modifier.
    let verb_follows_subject = DEMONSTRATIVES.contains(&prev_word);

    match tag {
        Tag::VerbGerund if prev_tag.opens_noun_phrase() || prev_tag == Tag::Preposition => {
            Tag::Noun
        }
        Tag::Verb if prev_tag.opens_noun_phrase() && !verb_follows_subject => Tag::Noun,
        Tag::VerbThirdPerson if prev_tag.opens_noun_phrase() && !verb_follows_subject => {
            Tag::PluralNoun
        }
        Tag::Noun if matches!(prev_tag, Tag::To | Tag::Modal) => Tag::Verb,
        Tag::Noun if SUBJECT_PRONOUNS.contains(&prev_word) => Tag::VerbPresent,
        Tag::PluralNoun if SUBJECT_PRONOUNS.contains(&prev_word) => Tag::VerbThirdPerson,
        Tag::VerbPast | Tag::VerbParticiple if prev_tag == Tag::Determiner => Tag::Adjective,
        _ => tag,
    }
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}
