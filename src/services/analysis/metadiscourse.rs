// Metadiscourse and stance marking, after Hyland (2005): six core
// categories matched per token, five extended categories matched as phrases
// over the lower-cased raw text.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ExtendedMetadiscourse, MetadiscourseCounts, MetadiscourseSummary};
use crate::services::analysis::lexicon;
use crate::services::text_processor::tokenize;

const TRANSITIONS: [&str; 16] = [
    "however", "therefore", "thus", "moreover", "furthermore", "consequently", "nevertheless",
    "nonetheless", "additionally", "similarly", "conversely", "meanwhile", "subsequently",
    "accordingly", "hence", "whereas",
];

const HEDGES: [&str; 18] = [
    "might", "perhaps", "possibly", "probably", "maybe", "could", "would", "seem", "appear",
    "suggest", "indicate", "likely", "unlikely", "somewhat", "relatively", "fairly", "rather",
    "quite",
];

const BOOSTERS: [&str; 15] = [
    "clearly", "obviously", "definitely", "certainly", "undoubtedly", "indeed", "surely",
    "always", "never", "must", "demonstrate", "prove", "show", "establish", "confirm",
];

const ATTITUDE_MARKERS: [&str; 10] = [
    "surprisingly", "unfortunately", "fortunately", "importantly", "interestingly",
    "remarkably", "hopefully", "regrettably", "essentially", "dramatically",
];

const SELF_MENTION: [&str; 8] = ["i", "we", "my", "our", "me", "us", "mine", "ours"];

const ENGAGEMENT_MARKERS: [&str; 10] = [
    "consider", "note", "see", "imagine", "suppose", "assume", "recall", "remember", "think",
    "believe",
];

const CODE_GLOSSES: [&str; 9] = [
    "i.e.", "e.g.", "namely", "that is", "in other words", "for example", "for instance",
    "such as", "specifically",
];

const FRAME_MARKERS: [&str; 14] = [
    "finally", "first", "second", "third", "firstly", "secondly", "to conclude",
    "in conclusion", "in summary", "to summarize", "overall", "lastly", "next", "then",
];

const EVIDENTIALS: [&str; 12] = [
    "according to", "based on", "argues", "claims", "suggests", "states", "reports", "finds",
    "demonstrates", "shows", "research shows", "studies show",
];

const DIRECTIVES: [&str; 10] = [
    "consider", "note", "see", "observe", "examine", "look at", "refer to", "review",
    "compare", "analyze",
];

const READER_PRONOUNS: [&str; 5] = ["you", "your", "yours", "yourself", "yourselves"];

/// Core Hyland counts plus density per 1000 tokens. A token belonging to
/// several categories counts once in each.
pub fn core_metadiscourse(tokens: &[String]) -> MetadiscourseSummary {
    let mut counts = MetadiscourseCounts::default();
    for token in tokens {
        let t = token.as_str();
        if TRANSITIONS.contains(&t) {
            counts.transitions += 1;
        }
        if HEDGES.contains(&t) {
            counts.hedges += 1;
        }
        if BOOSTERS.contains(&t) {
            counts.boosters += 1;
        }
        if ATTITUDE_MARKERS.contains(&t) {
            counts.attitude_markers += 1;
        }
        if SELF_MENTION.contains(&t) {
            counts.self_mention += 1;
        }
        if ENGAGEMENT_MARKERS.contains(&t) {
            counts.engagement_markers += 1;
        }
    }
    let total = counts.transitions
        + counts.hedges
        + counts.boosters
        + counts.attitude_markers
        + counts.self_mention
        + counts.engagement_markers;
    let density = if tokens.is_empty() {
        0.0
    } else {
        total as f64 / tokens.len() as f64 * 1000.0
    };
    MetadiscourseSummary {
        counts,
        total,
        density,
    }
}

struct ExtendedPatterns {
    code_glosses: Vec<Regex>,
    frame_markers: Vec<Regex>,
    evidentials: Vec<Regex>,
    directives: Vec<Regex>,
    reader_pronouns: Vec<Regex>,
}

fn compile_markers(markers: &[&str]) -> Vec<Regex> {
    markers
        .iter()
        .map(|m| Regex::new(&format!(r"\b{}\b", regex::escape(m))).unwrap())
        .collect()
}

fn extended_patterns() -> &'static ExtendedPatterns {
    static PATTERNS: OnceLock<ExtendedPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ExtendedPatterns {
        code_glosses: compile_markers(&CODE_GLOSSES),
        frame_markers: compile_markers(&FRAME_MARKERS),
        evidentials: compile_markers(&EVIDENTIALS),
        directives: compile_markers(&DIRECTIVES),
        reader_pronouns: compile_markers(&READER_PRONOUNS),
    })
}

fn count_markers(patterns: &[Regex], lowered: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(lowered).count()).sum()
}

/// Extended categories are matched over the raw lower-cased text so that
/// multi-word markers ("in other words", "according to") are seen whole.
pub fn extended_metadiscourse(text: &str, token_count: usize) -> ExtendedMetadiscourse {
    let lowered = text.to_lowercase();
    let patterns = extended_patterns();

    let code_glosses = count_markers(&patterns.code_glosses, &lowered);
    let frame_markers = count_markers(&patterns.frame_markers, &lowered);
    let evidentials = count_markers(&patterns.evidentials, &lowered);
    let directives = count_markers(&patterns.directives, &lowered);
    let reader_pronouns = count_markers(&patterns.reader_pronouns, &lowered);

    let per_1k = if token_count > 0 {
        1000.0 / token_count as f64
    } else {
        0.0
    };

    ExtendedMetadiscourse {
        code_glosses,
        frame_markers,
        evidentials,
        directives,
        reader_pronouns,
        code_gloss_density: code_glosses as f64 * per_1k,
        frame_marker_density: frame_markers as f64 * per_1k,
        evidential_density: evidentials as f64 * per_1k,
        directive_density: directives as f64 * per_1k,
        reader_pronoun_density: reader_pronouns as f64 * per_1k,
    }
}

/// Connective adverbs per 1000 tokens.
pub fn discourse_marker_density(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let count = tokens
        .iter()
        .filter(|t| lexicon::DISCOURSE_MARKERS.contains(&t.as_str()))
        .count();
    count as f64 / tokens.len() as f64 * 1000.0
}

/// Percent of tokens that are epistemic hedges.
pub fn hedging_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let count = tokens
        .iter()
        .filter(|t| lexicon::STANCE_HEDGES.contains(&t.as_str()))
        .count();
    count as f64 / tokens.len() as f64 * 100.0
}

/// Percent of tokens that are boosters. Single words are matched per token,
/// phrase entries ("show that") as substrings of the lowered text.
pub fn boosting_ratio(text: &str, tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let mut count = 0usize;
    for booster in lexicon::STANCE_BOOSTERS {
        if booster.contains(' ') {
            count += lowered.matches(booster).count();
        } else {
            count += tokens.iter().filter(|t| t.as_str() == booster).count();
        }
    }
    count as f64 / tokens.len() as f64 * 100.0
}

/// Reporting verbs (inflected forms included) per 1000 tokens.
pub fn reporting_verb_density(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let count = tokens
        .iter()
        .filter(|t| lexicon::REPORTING_VERBS.contains(&t.as_str()))
        .count();
    count as f64 / tokens.len() as f64 * 1000.0
}

/// Demonstrative + noun sequences ("this finding", "those results") per
/// 1000 tokens.
pub fn anaphoric_demonstrative_density(text: &str, token_count: usize) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    static DEMONSTRATIVE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DEMONSTRATIVE_RE
        .get_or_init(|| Regex::new(r"(?i)\b(this|that|these|those)\s+\w+").unwrap());
    re.find_iter(text).count() as f64 / token_count as f64 * 1000.0
}

/// Convenience for callers that only have raw text.
pub fn density_for_text(text: &str) -> f64 {
    core_metadiscourse(&tokenize(text)).density
}
