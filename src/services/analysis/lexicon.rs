// Closed word lists shared across the feature extractors. These are fixed
// reference sets; changing them changes metric values, so treat every list
// as part of the metric's definition.

/// Top 100 English function words, most frequent first. Doubles as the K1
/// frequency band and as the stop list for content-word filtering.
pub const FUNCTION_WORDS: [&str; 100] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so",
    "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like",
    "time", "no", "just", "him", "know", "take", "people", "into", "year", "your", "good", "some",
    "could", "them", "see", "other", "than", "then", "now", "look", "only", "come", "its", "over",
    "think", "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
    "even", "new", "want", "because", "any", "these", "give", "day", "most", "us",
];

/// Academic Word List, representative subset (Coxhead, 2000). Doubles as the
/// K2 frequency band.
pub const ACADEMIC_WORDS: [&str; 180] = [
    "analyze", "approach", "area", "assess", "assume", "authority", "available", "benefit",
    "concept", "consist", "constitute", "context", "contract", "create", "data", "define",
    "derive", "distribute", "economy", "environment", "establish", "estimate", "evident",
    "export", "factor", "finance", "formula", "function", "identify", "income", "indicate",
    "individual", "interpret", "involve", "issue", "labor", "legal", "legislate", "major",
    "method", "occur", "percent", "period", "policy", "principle", "proceed", "process",
    "require", "research", "respond", "role", "section", "sector", "significant", "similar",
    "source", "specific", "structure", "theory", "vary", "achieve", "acquire", "administrate",
    "affect", "appropriate", "aspect", "assist", "category", "chapter", "commission",
    "community", "complex", "compute", "conclude", "conduct", "consequent", "construct",
    "consume", "credit", "culture", "design", "distinct", "element", "equate", "evaluate",
    "feature", "final", "focus", "impact", "injure", "institute", "invest", "item", "journal",
    "maintain", "normal", "obtain", "participate", "perceive", "positive", "potential",
    "previous", "primary", "purchase", "range", "region", "regulate", "relevant", "reside",
    "resource", "restrict", "secure", "seek", "select", "site", "strategy", "survey", "text",
    "tradition", "transfer", "alternative", "circumstance", "comment", "compensate",
    "component", "consent", "considerable", "constant", "constrain", "contribute", "convene",
    "coordinate", "core", "corporate", "correspond", "criteria", "deduce", "demonstrate",
    "document", "dominate", "emphasis", "ensure", "exclude", "framework", "fund", "illustrate",
    "immigrate", "imply", "initial", "instance", "interact", "justify", "layer", "link",
    "locate", "maximize", "minor", "negate", "outcome", "partner", "philosophy", "physical",
    "proportion", "publish", "react", "register", "rely", "remove", "scheme", "sequence",
    "sex", "shift", "specify", "sufficient", "task", "technical", "technique", "technology",
    "valid", "volume",
];

/// Subordinating conjunctions used by every clause estimate. "even though"
/// is matched as a phrase; "though" also matches inside it, which inflates
/// those sentences by one. Known quirk of the counting scheme, kept as is.
pub const SUBORDINATING_CONJUNCTIONS: [&str; 18] = [
    "although", "though", "even though", "because", "since", "as", "if", "unless", "until",
    "while", "whereas", "after", "before", "when", "whenever", "where", "wherever", "whether",
];

pub const COORDINATING_CONJUNCTIONS: [&str; 7] = ["and", "but", "or", "nor", "for", "yet", "so"];

/// Correlative pairs; `...` is a wildcard over the span between the halves.
pub const CORRELATIVE_CONJUNCTIONS: [&str; 4] = [
    "either...or",
    "neither...nor",
    "both...and",
    "not only...but also",
];

pub const FIRST_PERSON_PRONOUNS: [&str; 10] = [
    "i", "me", "my", "mine", "we", "us", "our", "ours", "myself", "ourselves",
];

pub const SECOND_PERSON_PRONOUNS: [&str; 5] = ["you", "your", "yours", "yourself", "yourselves"];

pub const THIRD_PERSON_PRONOUNS: [&str; 16] = [
    "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves",
];

pub const REPORTING_VERBS: [&str; 36] = [
    "argue", "argues", "argued", "claim", "claims", "claimed", "suggest", "suggests",
    "suggested", "demonstrate", "demonstrates", "demonstrated", "show", "shows", "showed",
    "indicate", "indicates", "indicated", "reveal", "reveals", "revealed", "find", "finds",
    "found", "conclude", "concludes", "concluded", "state", "states", "stated", "report",
    "reports", "reported", "assert", "asserts", "asserted",
];

pub const DISCOURSE_MARKERS: [&str; 20] = [
    "furthermore", "moreover", "additionally", "besides", "likewise", "however", "nevertheless",
    "nonetheless", "conversely", "alternatively", "therefore", "thus", "consequently", "hence",
    "accordingly", "meanwhile", "subsequently", "previously", "initially", "finally",
];

/// Epistemic hedges for the stance-marking ratio (wider than the Hyland
/// hedge category).
pub const STANCE_HEDGES: [&str; 19] = [
    "possibly", "probably", "perhaps", "maybe", "might", "may", "could", "can", "seem",
    "appear", "suggest", "indicate", "assume", "likely", "unlikely", "conceivably",
    "potentially", "presumably", "apparently",
];

/// Boosters for the stance-marking ratio; entries with spaces are matched as
/// phrases over the raw lowered text.
pub const STANCE_BOOSTERS: [&str; 15] = [
    "definitely", "certainly", "clearly", "obviously", "undeniably", "absolutely", "always",
    "never", "must", "prove", "conclusively", "evidently", "invariably", "show that",
    "demonstrate that",
];

pub const IDIOMS: [&str; 13] = [
    "piece of cake",
    "break a leg",
    "hit the nail",
    "bite the bullet",
    "under the weather",
    "spill the beans",
    "once in a blue moon",
    "see eye to eye",
    "ball is in your court",
    "barking up the wrong tree",
    "blessing in disguise",
    "burn the midnight oil",
    "cut corners",
];

/// Hallidayan process verb roots. Matching is by substring against the
/// token, mirroring a root lookup.
pub const MATERIAL_VERBS: [&str; 13] = [
    "do", "make", "go", "run", "walk", "work", "play", "take", "give", "build", "create",
    "write", "eat",
];

pub const MENTAL_VERBS: [&str; 13] = [
    "think", "know", "feel", "believe", "understand", "want", "like", "love", "see", "hear",
    "smell", "remember", "forget",
];

pub const RELATIONAL_VERBS: [&str; 9] = [
    "be", "have", "become", "seem", "appear", "sound", "look", "remain", "stay",
];

pub fn is_function_word(token: &str) -> bool {
    FUNCTION_WORDS.contains(&token)
}

pub fn is_academic_word(token: &str) -> bool {
    ACADEMIC_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_word_lookup() {
        assert!(is_function_word("the"));
        assert!(is_function_word("us"));
        assert!(!is_function_word("cat"));
    }

    #[test]
    fn test_bands_mostly_disjoint() {
        // K1 and K2 overlap would double-count band coverage
        let overlap: Vec<&str> = FUNCTION_WORDS
            .iter()
            .filter(|w| ACADEMIC_WORDS.contains(w))
            .copied()
            .collect();
        assert!(overlap.is_empty(), "overlapping bands: {:?}", overlap);
    }
}
