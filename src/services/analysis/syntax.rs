// Syntactic and cohesion estimates. Everything here is lexical or
// regex-based; no parse trees. Clause counts are approximations built from
// the fixed subordinator list plus capped non-finite markers.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ConjunctionCounts, MicroSyntaxPatterns, ParagraphProfile};
use crate::services::analysis::lexicon;
use crate::services::text_processor::{split_paragraphs, split_sentences, tokenize};

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Burstiness: coefficient of variation of sentence lengths (population
/// sigma over mean). 0 for empty input or zero mean.
pub fn burstiness_cv(sentence_lengths: &[usize]) -> f64 {
    if sentence_lengths.is_empty() {
        return 0.0;
    }
    let lengths: Vec<f64> = sentence_lengths.iter().map(|&l| l as f64).collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }
    std_dev(&lengths) / mean
}

pub fn sentence_length_std_dev(sentence_lengths: &[usize]) -> f64 {
    let lengths: Vec<f64> = sentence_lengths.iter().map(|&l| l as f64).collect();
    std_dev(&lengths)
}

fn subordinator_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        lexicon::SUBORDINATING_CONJUNCTIONS
            .iter()
            .map(|conj| Regex::new(&format!(r"\b{}\b", conj)).unwrap())
            .collect()
    })
}

fn subordinator_matches(lowered_sentence: &str) -> usize {
    subordinator_patterns()
        .iter()
        .map(|re| re.find_iter(lowered_sentence).count())
        .sum()
}

fn non_finite_markers(lowered_sentence: &str) -> f64 {
    static TO_INF_RE: OnceLock<Regex> = OnceLock::new();
    static ING_RE: OnceLock<Regex> = OnceLock::new();
    let to_inf = TO_INF_RE
        .get_or_init(|| Regex::new(r"\bto\s+\w+").unwrap())
        .find_iter(lowered_sentence)
        .count();
    let ing = ING_RE
        .get_or_init(|| Regex::new(r"\b\w+ing\b").unwrap())
        .find_iter(lowered_sentence)
        .count();
    (to_inf.min(2) as f64) + (ing as f64 * 0.3).min(1.0)
}

/// Mean subordinator occurrences per sentence.
pub fn subordination_depth(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences
        .iter()
        .map(|s| subordinator_matches(&s.to_lowercase()))
        .sum();
    total as f64 / sentences.len() as f64
}

/// Dependent clauses as a percentage of all clauses, where each sentence
/// contributes one main clause plus one clause per subordinator.
pub fn dependent_clause_ratio(sentences: &[String]) -> f64 {
    let mut total_clauses = 0usize;
    let mut dependent = 0usize;
    for sentence in sentences {
        let matches = subordinator_matches(&sentence.to_lowercase());
        total_clauses += 1 + matches;
        dependent += matches;
    }
    if total_clauses == 0 {
        return 0.0;
    }
    dependent as f64 / total_clauses as f64 * 100.0
}

/// Finite + non-finite subordinate clauses per 100 sentences. Non-finite
/// markers are capped per sentence (to-infinitives at 2, -ing forms at a
/// weight of 1) so long sentences cannot dominate.
pub fn subordinate_clause_ratio(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let mut subordinate = 0.0;
    for sentence in sentences {
        let lowered = sentence.to_lowercase();
        subordinate += subordinator_matches(&lowered) as f64;
        subordinate += non_finite_markers(&lowered);
    }
    subordinate / sentences.len() as f64 * 100.0
}

/// Clauses per sentence: one main clause plus subordinators plus capped
/// non-finite markers.
pub fn clauses_per_sentence(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: f64 = sentences
        .iter()
        .map(|sentence| {
            let lowered = sentence.to_lowercase();
            1.0 + subordinator_matches(&lowered) as f64 + non_finite_markers(&lowered)
        })
        .sum();
    total / sentences.len() as f64
}

/// Composite 0-100 complexity score: capped average sentence length (33),
/// capped clauses per sentence (33), clamped subordination depth (34).
pub fn complexity_index(
    avg_sentence_length: f64,
    clauses_per_sent: f64,
    subordination: f64,
) -> f64 {
    let length_score = (avg_sentence_length / 30.0).min(1.0) * 33.0;
    let clause_score = (clauses_per_sent / 3.0).min(1.0) * 33.0;
    let subordination_score = subordination.min(1.0) * 34.0;
    length_score + clause_score + subordination_score
}

/// T-unit length approximated as tokens per sentence.
pub fn t_unit_length(token_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    token_count as f64 / sentence_count as f64
}

/// Percent of distinct sentence-initial words.
pub fn sentence_opener_diversity(sentences: &[String]) -> f64 {
    let openers: Vec<String> = sentences
        .iter()
        .filter_map(|sentence| {
            sentence.split_whitespace().next().map(|word| {
                word.to_lowercase()
                    .chars()
                    .filter(|c| c.is_ascii_lowercase())
                    .collect::<String>()
            })
        })
        .filter(|opener| !opener.is_empty())
        .collect();
    if openers.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = openers.iter().map(|o| o.as_str()).collect();
    unique.len() as f64 / openers.len() as f64 * 100.0
}

/// Paragraph count, mean sentences per paragraph, and sentence-count
/// spread. Variation is 0 below two paragraphs.
pub fn paragraph_profile(text: &str) -> ParagraphProfile {
    let paragraphs = split_paragraphs(text);
    if paragraphs.is_empty() {
        return ParagraphProfile::default();
    }
    let lengths: Vec<f64> = paragraphs
        .iter()
        .map(|p| split_sentences(p).len() as f64)
        .collect();
    let avg_sentences = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let length_variation = if lengths.len() < 2 {
        0.0
    } else {
        std_dev(&lengths)
    };
    ParagraphProfile {
        count: paragraphs.len(),
        avg_sentences,
        length_variation,
    }
}

/// Coordinating/subordinating counts over the lowered text; correlative
/// pairs matched with a wildcard between the halves.
pub fn conjunction_counts(text: &str) -> ConjunctionCounts {
    let lowered = text.to_lowercase();

    static COORD_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let coordinating = COORD_PATTERNS
        .get_or_init(|| {
            lexicon::COORDINATING_CONJUNCTIONS
                .iter()
                .map(|conj| Regex::new(&format!(r"\b{}\b", conj)).unwrap())
                .collect()
        })
        .iter()
        .map(|re| re.find_iter(&lowered).count())
        .sum();

    let subordinating = subordinator_matches(&lowered);

    static CORRELATIVE_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let correlative = CORRELATIVE_PATTERNS
        .get_or_init(|| {
            lexicon::CORRELATIVE_CONJUNCTIONS
                .iter()
                .map(|pair| Regex::new(&format!("(?i){}", pair.replace("...", ".*?"))).unwrap())
                .collect()
        })
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();

    ConjunctionCounts {
        coordinating,
        subordinating,
        correlative,
    }
}

/// Percent of content-token occurrences belonging to a repeated type.
pub fn lexical_repetition(tokens: &[String]) -> f64 {
    let content: Vec<&str> = tokens
        .iter()
        .map(|t| t.as_str())
        .filter(|t| !lexicon::is_function_word(t))
        .collect();
    if content.is_empty() {
        return 0.0;
    }
    let mut freq: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for token in &content {
        *freq.entry(token).or_insert(0) += 1;
    }
    let repeated: usize = freq.values().filter(|&&c| c > 1).sum();
    repeated as f64 / content.len() as f64 * 100.0
}

/// Percent of adjacent sentence pairs sharing at least one content word.
pub fn lexical_chain_continuity(sentences: &[String]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let token_sets: Vec<HashSet<String>> = sentences
        .iter()
        .map(|s| tokenize(s).into_iter().collect())
        .collect();
    let mut overlapping = 0usize;
    for pair in token_sets.windows(2) {
        let shares_content = pair[0]
            .iter()
            .any(|t| pair[1].contains(t) && !lexicon::is_function_word(t));
        if shares_content {
            overlapping += 1;
        }
    }
    overlapping as f64 / (sentences.len() - 1) as f64 * 100.0
}

/// Mean Jaccard similarity of adjacent sentence token sets. Pairs with an
/// empty side contribute nothing but the divisor stays `sentences - 1`.
pub fn jaccard_cohesion(sentences: &[String]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let token_sets: Vec<HashSet<String>> = sentences
        .iter()
        .map(|s| tokenize(s).into_iter().collect())
        .collect();
    let mut sum = 0.0;
    for pair in token_sets.windows(2) {
        if pair[0].is_empty() || pair[1].is_empty() {
            continue;
        }
        let intersection = pair[0].intersection(&pair[1]).count();
        let union = pair[0].union(&pair[1]).count();
        sum += intersection as f64 / union as f64;
    }
    sum / (sentences.len() - 1) as f64
}

struct MicroPatterns {
    it_cleft: Regex,
    wh_cleft: Regex,
    existential_there: Regex,
    negative_inversion: Vec<Regex>,
    impersonal: Vec<Regex>,
    passive_agent: Regex,
    light_verbs: Vec<Regex>,
    contraction: Regex,
    s_genitive: Regex,
    of_genitive: Regex,
    double_object: Regex,
    prep_dative: Regex,
}

fn micro_patterns() -> &'static MicroPatterns {
    static PATTERNS: OnceLock<MicroPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MicroPatterns {
        it_cleft: Regex::new(r"(?i)\bit\s+(is|was|'s)\s+\w+\s+that\b").unwrap(),
        wh_cleft: Regex::new(r"(?i)\b(what|where|when|why|how)\s+\w+\s+(is|was|are|were)\b")
            .unwrap(),
        existential_there: Regex::new(r"(?i)\bthere\s+(is|are|was|were|has|have|been)\b")
            .unwrap(),
        negative_inversion: vec![
            Regex::new(r"(?i)\bnever\s+(have|has|had|do|does|did|can|could|will|would)\b")
                .unwrap(),
            Regex::new(r"(?i)\bseldom\s+(have|has|had|do|does|did)\b").unwrap(),
            Regex::new(r"(?i)\brarely\s+(have|has|had|do|does|did)\b").unwrap(),
            Regex::new(r"(?i)\bhardly\s+(have|has|had|do|does|did)\b").unwrap(),
            Regex::new(r"(?i)\bscarcely\s+(have|has|had|do|does|did)\b").unwrap(),
        ],
        impersonal: vec![
            Regex::new(r"(?i)\bit\s+(seems|appears|looks|sounds|feels)").unwrap(),
            Regex::new(r"(?i)\bit\s+is\s+(likely|possible|probable|clear|obvious|evident)")
                .unwrap(),
            Regex::new(r"(?i)\bone\s+(must|should|can|could|may|might)").unwrap(),
            Regex::new(r"(?i)\bthere\s+(is|are|seems|appears)").unwrap(),
        ],
        passive_agent: Regex::new(r"(?i)\b(is|are|was|were|been|be)\s+\w+ed\s+by\s+").unwrap(),
        light_verbs: vec![
            Regex::new(r"(?i)\bmake\s+a\s+(decision|choice|mistake|attempt|effort)\b").unwrap(),
            Regex::new(r"(?i)\btake\s+a\s+(look|break|chance|step|walk)\b").unwrap(),
            Regex::new(r"(?i)\bgive\s+a\s+(presentation|talk|speech|lecture)\b").unwrap(),
            Regex::new(r"(?i)\bhave\s+a\s+(discussion|conversation|meeting|chat)\b").unwrap(),
            Regex::new(r"(?i)\bdo\s+a\s+(favor|job|task)\b").unwrap(),
        ],
        contraction: Regex::new(r"(?i)\b\w+'[stmdre]\b|\bwon't\b|\bcan't\b").unwrap(),
        s_genitive: Regex::new(r"\b[a-z]+'s\s+[a-z]+").unwrap(),
        of_genitive: Regex::new(r"\b[a-z]+\s+of\s+(the|a|an)\s+[a-z]+").unwrap(),
        double_object: Regex::new(r"(?i)\b(give|gives|gave|sent|send|show|shows|showed|tell|tells|told|offer|offers|offered)\s+(him|her|them|me|us|you)\s+\w+").unwrap(),
        prep_dative: Regex::new(r"(?i)\b(give|gives|gave|sent|send|show|shows|showed|tell|tells|told|offer|offers|offered)\s+\w+\s+to\s+(him|her|them|me|us|you)\b").unwrap(),
    })
}

fn count_any(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Regex battery over the raw text. Sentence-relative rates are per 100
/// sentences; token-relative ones per 1000 tokens (contraction ratio per
/// 100).
pub fn micro_syntax(text: &str, token_count: usize, sentence_count: usize) -> MicroSyntaxPatterns {
    let patterns = micro_patterns();
    let lowered = text.to_lowercase();

    let per_sentence = if sentence_count > 0 {
        100.0 / sentence_count as f64
    } else {
        0.0
    };
    let per_1k = if token_count > 0 {
        1000.0 / token_count as f64
    } else {
        0.0
    };
    let per_100_tokens = if token_count > 0 {
        100.0 / token_count as f64
    } else {
        0.0
    };

    let s_genitives = patterns.s_genitive.find_iter(&lowered).count();
    let of_genitives = patterns.of_genitive.find_iter(&lowered).count();
    let genitive_total = s_genitives + of_genitives;
    let genitive_s_preference = if genitive_total > 0 {
        s_genitives as f64 / genitive_total as f64 * 100.0
    } else {
        0.0
    };

    let double_object = patterns.double_object.find_iter(text).count();
    let prep_dative = patterns.prep_dative.find_iter(text).count();
    let dative_total = double_object + prep_dative;
    let double_object_preference = if dative_total > 0 {
        double_object as f64 / dative_total as f64 * 100.0
    } else {
        0.0
    };

    // idioms count once per expression present, not per occurrence
    let idiom_hits = lexicon::IDIOMS
        .iter()
        .filter(|idiom| lowered.contains(*idiom))
        .count();

    MicroSyntaxPatterns {
        it_cleft_rate: patterns.it_cleft.find_iter(text).count() as f64 * per_sentence,
        wh_cleft_rate: patterns.wh_cleft.find_iter(text).count() as f64 * per_sentence,
        existential_there_rate: patterns.existential_there.find_iter(text).count() as f64
            * per_sentence,
        negative_inversion_rate: count_any(&patterns.negative_inversion, text) as f64
            * per_sentence,
        impersonal_rate: count_any(&patterns.impersonal, text) as f64 * per_1k,
        passive_agent_rate: patterns.passive_agent.find_iter(text).count() as f64 * per_sentence,
        light_verb_rate: count_any(&patterns.light_verbs, text) as f64 * per_1k,
        contraction_ratio: patterns.contraction.find_iter(text).count() as f64 * per_100_tokens,
        genitive_s_preference,
        double_object_preference,
        idiom_rate: idiom_hits as f64 * per_1k,
    }
}
