// Part-of-speech oracle seam. The grammar tier consumes tags through the
// `PosOracle` trait so a real tagger can be injected; the bundled
// `LexiconPosOracle` is a closed-class-lookup + suffix heuristic whose tags
// are estimates, not gold annotations.

use crate::services::text_processor::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    Verb,
    /// Past tense or past participle form.
    VerbPast,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Other,
}

impl PosTag {
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Verb | PosTag::VerbPast | PosTag::Adjective | PosTag::Adverb
        )
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, PosTag::Verb | PosTag::VerbPast)
    }

    /// Single-letter code used when comparing whole-sentence tag sequences.
    pub fn code(&self) -> char {
        match self {
            PosTag::Noun => 'N',
            PosTag::Verb => 'V',
            PosTag::VerbPast => 'P',
            PosTag::Adjective => 'J',
            PosTag::Adverb => 'R',
            PosTag::Pronoun => 'O',
            PosTag::Determiner => 'D',
            PosTag::Preposition => 'I',
            PosTag::Conjunction => 'C',
            PosTag::Other => 'X',
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
}

#[derive(Debug, Clone, Default)]
pub struct TaggedSentence {
    pub tokens: Vec<TaggedToken>,
}

/// External tagging capability. Implementations may fail per sentence; the
/// caller treats any failure as "grammar tier unavailable" for the whole
/// sample.
pub trait PosOracle {
    fn tag(&self, sentence: &str) -> Result<TaggedSentence, String>;
}

const PRONOUNS: [&str; 31] = [
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
];

const DETERMINERS: [&str; 11] = [
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "either", "neither",
];

const PREPOSITIONS: [&str; 22] = [
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "between", "among", "through", "during", "about", "against", "without", "within", "across",
];

const CONJUNCTIONS: [&str; 14] = [
    "and", "but", "or", "nor", "yet", "so", "because", "although", "though", "while", "whereas",
    "unless", "until", "whether",
];

const AUXILIARIES: [&str; 20] = [
    "is", "are", "am", "be", "been", "being", "have", "has", "had", "do", "does", "did", "can",
    "could", "will", "would", "shall", "should", "may", "might",
];

const IRREGULAR_PAST: [&str; 40] = [
    "went", "said", "made", "took", "came", "knew", "got", "gave", "thought", "told", "became",
    "showed", "left", "felt", "put", "brought", "began", "kept", "held", "wrote", "stood",
    "heard", "meant", "met", "ran", "paid", "sat", "spoke", "led", "grew", "lost", "fell",
    "sent", "built", "understood", "drew", "broke", "spent", "rose", "drove",
];

const COMMON_VERBS: [&str; 32] = [
    "make", "makes", "go", "goes", "see", "sees", "know", "think", "want", "use", "find",
    "give", "tell", "work", "call", "try", "ask", "need", "feel", "become", "leave", "mean",
    "keep", "say", "says", "get", "gets", "show", "seem", "appear", "take", "takes",
];

const COMMON_ADVERBS: [&str; 20] = [
    "not", "very", "also", "just", "now", "then", "here", "there", "well", "even", "still",
    "too", "quite", "rather", "almost", "often", "never", "always", "sometimes", "perhaps",
];

const COMMON_ADJECTIVES: [&str; 22] = [
    "good", "new", "first", "last", "long", "great", "little", "own", "other", "old", "right",
    "big", "high", "small", "large", "young", "important", "few", "public", "bad", "same",
    "able",
];

/// Heuristic English tagger: closed-class lookups first, then suffix rules,
/// defaulting to noun. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconPosOracle;

impl LexiconPosOracle {
    pub fn new() -> Self {
        LexiconPosOracle
    }

    fn classify(token: &str) -> PosTag {
        if PRONOUNS.contains(&token) {
            return PosTag::Pronoun;
        }
        if DETERMINERS.contains(&token) {
            return PosTag::Determiner;
        }
        if CONJUNCTIONS.contains(&token) {
            return PosTag::Conjunction;
        }
        if PREPOSITIONS.contains(&token) {
            return PosTag::Preposition;
        }
        if token == "was" || token == "were" {
            return PosTag::VerbPast;
        }
        if AUXILIARIES.contains(&token) {
            return PosTag::Verb;
        }
        if IRREGULAR_PAST.contains(&token) {
            return PosTag::VerbPast;
        }
        if COMMON_ADVERBS.contains(&token) {
            return PosTag::Adverb;
        }
        if COMMON_ADJECTIVES.contains(&token) {
            return PosTag::Adjective;
        }
        if COMMON_VERBS.contains(&token) {
            return PosTag::Verb;
        }
        let len = token.chars().count();
        if len > 3 && token.ends_with("ly") {
            return PosTag::Adverb;
        }
        if len > 3 && token.ends_with("ed") {
            return PosTag::VerbPast;
        }
        if len > 4 && token.ends_with("ing") {
            return PosTag::Verb;
        }
        if token.ends_with("tion")
            || token.ends_with("sion")
            || token.ends_with("ness")
            || token.ends_with("ment")
            || token.ends_with("ity")
            || token.ends_with("ance")
            || token.ends_with("ence")
        {
            return PosTag::Noun;
        }
        if token.ends_with("ous")
            || token.ends_with("ful")
            || token.ends_with("ive")
            || token.ends_with("ible")
            || token.ends_with("able")
            || token.ends_with("ical")
        {
            return PosTag::Adjective;
        }
        PosTag::Noun
    }
}

impl PosOracle for LexiconPosOracle {
    fn tag(&self, sentence: &str) -> Result<TaggedSentence, String> {
        let tokens = tokenize(sentence)
            .into_iter()
            .map(|text| {
                let tag = Self::classify(&text);
                TaggedToken { text, tag }
            })
            .collect();
        Ok(TaggedSentence { tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<PosTag> {
        LexiconPosOracle::new()
            .tag(sentence)
            .unwrap()
            .tokens
            .iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn test_closed_class_lookup() {
        assert_eq!(
            tags("the cat was happily running"),
            vec![
                PosTag::Determiner,
                PosTag::Noun,
                PosTag::VerbPast,
                PosTag::Adverb,
                PosTag::Verb,
            ]
        );
    }

    #[test]
    fn test_suffix_rules() {
        let tagged = tags("information seemed wonderful");
        assert_eq!(tagged[0], PosTag::Noun);
        assert_eq!(tagged[1], PosTag::VerbPast);
        assert_eq!(tagged[2], PosTag::Adjective);
    }

    #[test]
    fn test_default_is_noun() {
        assert_eq!(tags("zyzzyva"), vec![PosTag::Noun]);
    }

    #[test]
    fn test_empty_sentence() {
        let tagged = LexiconPosOracle::new().tag("").unwrap();
        assert!(tagged.tokens.is_empty());
    }
}
