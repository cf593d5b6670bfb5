// Tiered feature extraction. `analyze_text` runs the whole battery over one
// document and returns a `TextSample`; classification and calibration are
// separate passes so verdicts always reflect the thresholds at call time.

pub mod calibration;
pub mod grammar;
pub mod lexical;
pub mod lexicon;
pub mod metadiscourse;
pub mod readability;
pub mod risk;
pub mod syntax;

use crate::models::{
    CoreFeatures, DiscourseFeatures, ExternalLabel, FeatureReport, LexicalFeatures,
    ReadabilityFeatures, SyntaxFeatures, TextSample,
};
use crate::services::pos_oracle::{LexiconPosOracle, PosOracle};
use crate::services::text_processor::{sentence_token_lengths, split_sentences, tokenize};

/// Full analysis with the default heuristic POS oracle and a fresh RNG for
/// VOCD-D.
pub fn analyze_text(text: &str, name: &str) -> TextSample {
    analyze_text_with(text, name, Some(&LexiconPosOracle::new()), None)
}

/// Full analysis with an injected oracle (`None` skips the grammar tier)
/// and an optional VOCD-D seed for reproducible runs.
pub fn analyze_text_with(
    text: &str,
    name: &str,
    oracle: Option<&dyn PosOracle>,
    vocd_seed: Option<u64>,
) -> TextSample {
    let tokens = tokenize(text);
    let sentences = split_sentences(text);
    let sentence_lengths = sentence_token_lengths(&sentences);

    let core = core_features(&tokens, &sentence_lengths);
    let lexical = lexical_features(&tokens, vocd_seed);
    let discourse = discourse_features(text, &tokens, &sentences);
    let syntax = syntax_features(text, &tokens, &sentences, core.avg_sentence_length);
    let grammar = oracle.and_then(|o| grammar::grammar_features(&sentences, o));
    let readability = readability_features(text, &tokens, sentences.len());

    TextSample {
        name: name.to_string(),
        tokens,
        sentences,
        sentence_lengths,
        features: FeatureReport {
            core,
            lexical,
            discourse,
            syntax,
            grammar,
            readability,
        },
        external_label: ExternalLabel::Unknown,
    }
}

fn core_features(tokens: &[String], sentence_lengths: &[usize]) -> CoreFeatures {
    let avg_sentence_length = if sentence_lengths.is_empty() {
        0.0
    } else {
        sentence_lengths.iter().sum::<usize>() as f64 / sentence_lengths.len() as f64
    };
    CoreFeatures {
        word_count: tokens.len(),
        sentence_count: sentence_lengths.len(),
        avg_sentence_length,
        sttr: lexical::sttr(tokens),
        burstiness: syntax::burstiness_cv(sentence_lengths),
        metadiscourse: metadiscourse::core_metadiscourse(tokens),
    }
}

fn lexical_features(tokens: &[String], vocd_seed: Option<u64>) -> LexicalFeatures {
    let vocd_d = match vocd_seed {
        Some(seed) => lexical::vocd_d_seeded(tokens, seed),
        None => lexical::vocd_d(tokens),
    };
    LexicalFeatures {
        mattr: lexical::mattr(tokens),
        mtld: lexical::mtld(tokens),
        vocd_d,
        hapax_ratio: lexical::hapax_ratio(tokens),
        dis_ratio: lexical::dis_ratio(tokens),
        ttr_decay: lexical::ttr_decay(tokens),
        rare_word_ratio: lexical::rare_word_ratio(tokens),
        avg_word_length: lexical::avg_word_length(tokens),
        multi_syllabic_ratio: lexical::multi_syllabic_ratio(tokens),
        growth_curve: lexical::growth_curve(tokens),
        first_appearance: lexical::first_appearance(tokens),
    }
}

fn discourse_features(text: &str, tokens: &[String], sentences: &[String]) -> DiscourseFeatures {
    DiscourseFeatures {
        extended: metadiscourse::extended_metadiscourse(text, tokens.len()),
        discourse_marker_density: metadiscourse::discourse_marker_density(tokens),
        hedging_ratio: metadiscourse::hedging_ratio(tokens),
        boosting_ratio: metadiscourse::boosting_ratio(text, tokens),
        reporting_verb_density: metadiscourse::reporting_verb_density(tokens),
        anaphoric_demonstrative_density: metadiscourse::anaphoric_demonstrative_density(
            text,
            tokens.len(),
        ),
        lexical_repetition: syntax::lexical_repetition(tokens),
        lexical_chain_continuity: syntax::lexical_chain_continuity(sentences),
        jaccard_cohesion: syntax::jaccard_cohesion(sentences),
    }
}

fn syntax_features(
    text: &str,
    tokens: &[String],
    sentences: &[String],
    avg_sentence_length: f64,
) -> SyntaxFeatures {
    let sentence_lengths = sentence_token_lengths(sentences);
    let clauses = syntax::clauses_per_sentence(sentences);
    let subordination = syntax::subordination_depth(sentences);
    SyntaxFeatures {
        sentence_length_std_dev: syntax::sentence_length_std_dev(&sentence_lengths),
        subordination_depth: subordination,
        clauses_per_sentence: clauses,
        dependent_clause_ratio: syntax::dependent_clause_ratio(sentences),
        subordinate_clause_ratio: syntax::subordinate_clause_ratio(sentences),
        complexity_index: syntax::complexity_index(avg_sentence_length, clauses, subordination),
        t_unit_length: syntax::t_unit_length(tokens.len(), sentences.len()),
        sentence_opener_diversity: syntax::sentence_opener_diversity(sentences),
        conjunctions: syntax::conjunction_counts(text),
        paragraphs: syntax::paragraph_profile(text),
        patterns: syntax::micro_syntax(text, tokens.len(), sentences.len()),
    }
}

fn readability_features(
    text: &str,
    tokens: &[String],
    sentence_count: usize,
) -> ReadabilityFeatures {
    ReadabilityFeatures {
        flesch_reading_ease: readability::flesch_reading_ease(tokens, sentence_count),
        flesch_kincaid_grade: readability::flesch_kincaid_grade(tokens, sentence_count),
        gunning_fog: readability::gunning_fog(tokens, sentence_count),
        coleman_liau: readability::coleman_liau(text, tokens, sentence_count),
        automated_readability: readability::automated_readability(text, tokens, sentence_count),
        function_word_profile: readability::function_word_profile(tokens),
        pronouns: readability::pronoun_distribution(tokens),
        frequency_bands: readability::frequency_bands(tokens),
        awl_coverage: readability::awl_coverage(tokens),
        germanic_ratio: readability::germanic_ratio(tokens),
    }
}
