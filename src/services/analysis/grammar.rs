// POS-dependent grammar tier. Computed only when an oracle is available;
// any per-sentence tagging failure downgrades the whole sample to a partial
// analysis (tier omitted) instead of failing the pipeline.

use std::collections::HashSet;

use tracing::warn;

use crate::models::{GrammarFeatures, HallidayanProcesses, OpenerPosCounts};
use crate::services::analysis::lexicon;
use crate::services::analysis::syntax::std_dev;
use crate::services::pos_oracle::{PosOracle, PosTag, TaggedSentence, TaggedToken};

const BE_FORMS: [&str; 7] = ["is", "are", "was", "were", "been", "be", "being"];

fn verb_matches_root(token: &str, roots: &[&str]) -> bool {
    roots.iter().any(|root| token.contains(root))
}

fn sentence_lexical_density(sentence: &TaggedSentence) -> f64 {
    if sentence.tokens.is_empty() {
        return 0.0;
    }
    let content = sentence.tokens.iter().filter(|t| t.tag.is_content()).count();
    content as f64 / sentence.tokens.len() as f64 * 100.0
}

fn tag_signature(sentence: &TaggedSentence) -> String {
    sentence.tokens.iter().map(|t| t.tag.code()).collect()
}

/// Runs the oracle over every sentence and derives the tier. `None` (with a
/// warning) when the oracle fails on any sentence or there is nothing to
/// tag.
pub fn grammar_features(sentences: &[String], oracle: &dyn PosOracle) -> Option<GrammarFeatures> {
    if sentences.is_empty() {
        return None;
    }
    let mut tagged: Vec<TaggedSentence> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        match oracle.tag(sentence) {
            Ok(result) => tagged.push(result),
            Err(reason) => {
                warn!(reason = %reason, "POS oracle failed, grammar tier omitted");
                return None;
            }
        }
    }
    Some(compute(&tagged))
}

fn compute(tagged: &[TaggedSentence]) -> GrammarFeatures {
    let all_tokens: Vec<&TaggedToken> =
        tagged.iter().flat_map(|s| s.tokens.iter()).collect();
    let total = all_tokens.len();

    let content: Vec<&TaggedToken> = all_tokens
        .iter()
        .copied()
        .filter(|t| t.tag.is_content())
        .collect();

    let lexical_density = if total > 0 {
        content.len() as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let open_class_types: HashSet<&str> =
        content.iter().map(|t| t.text.as_str()).collect();
    let open_class_ttr = if content.is_empty() {
        0.0
    } else {
        open_class_types.len() as f64 / content.len() as f64
    };

    let function_count = total - content.len();
    let content_function_ratio = if function_count > 0 {
        content.len() as f64 / function_count as f64
    } else {
        0.0
    };

    let nouns = all_tokens.iter().filter(|t| t.tag == PosTag::Noun).count();
    let verbs = all_tokens.iter().filter(|t| t.tag.is_verb()).count();
    let adjectives = all_tokens
        .iter()
        .filter(|t| t.tag == PosTag::Adjective)
        .count();
    let adverbs = all_tokens
        .iter()
        .filter(|t| t.tag == PosTag::Adverb)
        .count();

    let nominal_verbal_ratio = if verbs > 0 {
        nouns as f64 / verbs as f64
    } else {
        0.0
    };

    // passive: a be-form plus any past form anywhere in the sentence
    let passive_sentences = tagged
        .iter()
        .filter(|s| {
            let has_be = s
                .tokens
                .iter()
                .any(|t| BE_FORMS.contains(&t.text.as_str()));
            let has_past = s.tokens.iter().any(|t| t.tag == PosTag::VerbPast);
            has_be && has_past
        })
        .count();
    let passive_voice_density = passive_sentences as f64 / tagged.len() as f64 * 100.0;

    // present perfect: have/has immediately followed by a past form
    let mut present_perfect = 0usize;
    for sentence in tagged {
        for pair in sentence.tokens.windows(2) {
            let aux = pair[0].text.as_str();
            if (aux == "have" || aux == "has") && pair[1].tag == PosTag::VerbPast {
                present_perfect += 1;
            }
        }
    }
    let present_perfect_ratio = present_perfect as f64 / tagged.len() as f64 * 100.0;

    let mut hallidayan = HallidayanProcesses::default();
    for token in all_tokens.iter().filter(|t| t.tag.is_verb()) {
        if verb_matches_root(&token.text, &lexicon::MATERIAL_VERBS) {
            hallidayan.material += 1;
        }
        if verb_matches_root(&token.text, &lexicon::MENTAL_VERBS) {
            hallidayan.mental += 1;
        }
        if verb_matches_root(&token.text, &lexicon::RELATIONAL_VERBS) {
            hallidayan.relational += 1;
        }
    }

    let dynamic = hallidayan.material as f64;
    let stative = (hallidayan.mental + hallidayan.relational) as f64;
    let dynamic_stative_ratio = if stative > 0.0 {
        dynamic / stative
    } else if dynamic > 0.0 {
        10.0
    } else {
        0.0
    };

    let mut opener_pos = OpenerPosCounts::default();
    for sentence in tagged {
        match sentence.tokens.first().map(|t| t.tag) {
            Some(PosTag::Noun) => opener_pos.noun += 1,
            Some(tag) if tag.is_verb() => opener_pos.verb += 1,
            Some(PosTag::Adjective) => opener_pos.adjective += 1,
            Some(PosTag::Adverb) => opener_pos.adverb += 1,
            Some(_) => opener_pos.other += 1,
            None => {}
        }
    }

    let noun_verb_ratio = if verbs > 0 {
        nouns as f64 / verbs as f64
    } else {
        0.0
    };
    let adjective_noun_ratio = if nouns > 0 {
        adjectives as f64 / nouns as f64
    } else {
        0.0
    };
    let adverb_verb_ratio = if verbs > 0 {
        adverbs as f64 / verbs as f64
    } else {
        0.0
    };

    let lexical_density_variability = if tagged.len() < 2 {
        0.0
    } else {
        let densities: Vec<f64> = tagged.iter().map(sentence_lexical_density).collect();
        std_dev(&densities)
    };

    let repetitive_pattern_rate = if tagged.len() < 2 {
        0.0
    } else {
        let signatures: Vec<String> = tagged.iter().map(tag_signature).collect();
        let repeats = signatures.windows(2).filter(|w| w[0] == w[1]).count();
        repeats as f64 / tagged.len() as f64 * 100.0
    };

    GrammarFeatures {
        lexical_density,
        open_class_ttr,
        content_function_ratio,
        nominal_verbal_ratio,
        passive_voice_density,
        present_perfect_ratio,
        hallidayan,
        dynamic_stative_ratio,
        opener_pos,
        noun_verb_ratio,
        adjective_noun_ratio,
        adverb_verb_ratio,
        lexical_density_variability,
        repetitive_pattern_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pos_oracle::LexiconPosOracle;

    struct FailingOracle;

    impl PosOracle for FailingOracle {
        fn tag(&self, _sentence: &str) -> Result<TaggedSentence, String> {
            Err("tagger offline".to_string())
        }
    }

    fn sents(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_failing_oracle_omits_tier() {
        let sentences = sents(&["The cat sat"]);
        assert!(grammar_features(&sentences, &FailingOracle).is_none());
    }

    #[test]
    fn test_empty_input_omits_tier() {
        assert!(grammar_features(&[], &LexiconPosOracle::new()).is_none());
    }

    #[test]
    fn test_passive_detection() {
        let oracle = LexiconPosOracle::new();
        let features =
            grammar_features(&sents(&["The ball was kicked", "The cat sat quietly"]), &oracle)
                .unwrap();
        assert!((features.passive_voice_density - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_repetitive_pattern_rate() {
        let oracle = LexiconPosOracle::new();
        let features = grammar_features(
            &sents(&["The cat sat", "The dog sat", "Suddenly everything changed"]),
            &oracle,
        )
        .unwrap();
        // first two sentences share the tag signature
        assert!((features.repetitive_pattern_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_lexical_density_bounds() {
        let oracle = LexiconPosOracle::new();
        let features =
            grammar_features(&sents(&["The extremely old cat slept"]), &oracle).unwrap();
        assert!(features.lexical_density > 0.0 && features.lexical_density <= 100.0);
    }
}
