// Readability indices and stylometric profiles. All formulas are the
// published ones, fed by the shared vowel-cluster syllable estimate; empty
// input yields 0 for every index.

use crate::models::{FrequencyBands, PronounDistribution, WordFrequency};
use crate::services::analysis::lexicon;
use crate::services::text_processor::estimate_syllables;

fn total_syllables(tokens: &[String]) -> usize {
    tokens.iter().map(|t| estimate_syllables(t)).sum()
}

pub fn flesch_reading_ease(tokens: &[String], sentence_count: usize) -> f64 {
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let avg_sentence_length = tokens.len() as f64 / sentence_count as f64;
    let avg_syllables = total_syllables(tokens) as f64 / tokens.len() as f64;
    206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables
}

pub fn flesch_kincaid_grade(tokens: &[String], sentence_count: usize) -> f64 {
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let avg_sentence_length = tokens.len() as f64 / sentence_count as f64;
    let avg_syllables = total_syllables(tokens) as f64 / tokens.len() as f64;
    0.39 * avg_sentence_length + 11.8 * avg_syllables - 15.59
}

/// Complex words are those with three or more estimated syllables.
pub fn gunning_fog(tokens: &[String], sentence_count: usize) -> f64 {
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let complex = tokens
        .iter()
        .filter(|t| estimate_syllables(t) >= 3)
        .count();
    let avg_sentence_length = tokens.len() as f64 / sentence_count as f64;
    let percent_complex = complex as f64 / tokens.len() as f64 * 100.0;
    0.4 * (avg_sentence_length + percent_complex)
}

/// Letters and sentences per 100 words, over the raw text (pre-tokenizer
/// character counts).
pub fn coleman_liau(text: &str, tokens: &[String], sentence_count: usize) -> f64 {
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let l = letters as f64 / tokens.len() as f64 * 100.0;
    let s = sentence_count as f64 / tokens.len() as f64 * 100.0;
    0.0588 * l - 0.296 * s - 15.8
}

/// ARI over alphanumeric characters of the raw text.
pub fn automated_readability(text: &str, tokens: &[String], sentence_count: usize) -> f64 {
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let chars = text.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    4.71 * (chars as f64 / tokens.len() as f64)
        + 0.5 * (tokens.len() as f64 / sentence_count as f64)
        - 21.43
}

/// Frequencies of the 50 most common function words as percentages of all
/// tokens, top 10 by frequency.
pub fn function_word_profile(tokens: &[String]) -> Vec<WordFrequency> {
    let mut profile: Vec<WordFrequency> = lexicon::FUNCTION_WORDS[..50]
        .iter()
        .map(|&word| {
            let count = tokens.iter().filter(|t| t.as_str() == word).count();
            let percent = if tokens.is_empty() {
                0.0
            } else {
                count as f64 / tokens.len() as f64 * 100.0
            };
            WordFrequency {
                word: word.to_string(),
                count,
                percent,
            }
        })
        .collect();
    profile.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    profile.truncate(10);
    profile
}

/// First/second/third person counts with percentages of all pronoun hits.
/// Lookup order matters: "her" is third person even though possessives
/// overlap grammatically.
pub fn pronoun_distribution(tokens: &[String]) -> PronounDistribution {
    let mut dist = PronounDistribution::default();
    for token in tokens {
        let t = token.as_str();
        if lexicon::FIRST_PERSON_PRONOUNS.contains(&t) {
            dist.first_person += 1;
        } else if lexicon::SECOND_PERSON_PRONOUNS.contains(&t) {
            dist.second_person += 1;
        } else if lexicon::THIRD_PERSON_PRONOUNS.contains(&t) {
            dist.third_person += 1;
        }
    }
    let total = dist.first_person + dist.second_person + dist.third_person;
    if total > 0 {
        dist.first_percent = dist.first_person as f64 / total as f64 * 100.0;
        dist.second_percent = dist.second_person as f64 / total as f64 * 100.0;
        dist.third_percent = dist.third_person as f64 / total as f64 * 100.0;
    }
    dist
}

/// K1 = function-word list, K2 = AWL list, off-list = the rest. The three
/// percentages partition the token stream.
pub fn frequency_bands(tokens: &[String]) -> FrequencyBands {
    if tokens.is_empty() {
        return FrequencyBands::default();
    }
    let k1 = tokens.iter().filter(|t| lexicon::is_function_word(t)).count();
    let k2 = tokens.iter().filter(|t| lexicon::is_academic_word(t)).count();
    let off_list = tokens.len() - k1 - k2;
    let total = tokens.len() as f64;
    FrequencyBands {
        k1: k1 as f64 / total * 100.0,
        k2: k2 as f64 / total * 100.0,
        off_list: off_list as f64 / total * 100.0,
    }
}

/// Percent of tokens on the Academic Word List.
pub fn awl_coverage(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let awl = tokens.iter().filter(|t| lexicon::is_academic_word(t)).count();
    awl as f64 / tokens.len() as f64 * 100.0
}

/// Germanic-core proxy: tokens on the high-frequency list or of four
/// letters or fewer, as a percent of all tokens.
pub fn germanic_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let count = tokens
        .iter()
        .filter(|t| lexicon::is_function_word(t) || t.chars().count() <= 4)
        .count();
    count as f64 / tokens.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_processor::{split_sentences, tokenize};

    #[test]
    fn test_indices_zero_on_empty() {
        assert_eq!(flesch_reading_ease(&[], 0), 0.0);
        assert_eq!(flesch_kincaid_grade(&[], 0), 0.0);
        assert_eq!(gunning_fog(&[], 0), 0.0);
        assert_eq!(coleman_liau("", &[], 0), 0.0);
        assert_eq!(automated_readability("", &[], 0), 0.0);
    }

    #[test]
    fn test_flesch_monosyllabic_text() {
        // one sentence of five one-syllable words:
        // 206.835 - 1.015*5 - 84.6*1 = 117.16
        let tokens = tokenize("the cat sat on mats");
        let score = flesch_reading_ease(&tokens, 1);
        assert!((score - 117.16).abs() < 1e-9);
    }

    #[test]
    fn test_fog_counts_complex_words() {
        let text = "Considerable complexity characterizes everything.";
        let tokens = tokenize(text);
        let sentences = split_sentences(text);
        assert!(gunning_fog(&tokens, sentences.len()) > gunning_fog(&tokenize("The cat sat."), 1));
    }

    #[test]
    fn test_function_word_profile_top_ten() {
        let tokens = tokenize("the the the of of and a cat");
        let profile = function_word_profile(&tokens);
        assert_eq!(profile.len(), 10);
        assert_eq!(profile[0].word, "the");
        assert!((profile[0].percent - 3.0 / 8.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pronoun_distribution() {
        let tokens = tokenize("I told you that they left with us");
        let dist = pronoun_distribution(&tokens);
        assert_eq!(dist.first_person, 2);
        assert_eq!(dist.second_person, 1);
        assert_eq!(dist.third_person, 1);
        assert!((dist.first_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_bands_partition() {
        let tokens = tokenize("the data suggests serendipity");
        let bands = frequency_bands(&tokens);
        assert!((bands.k1 + bands.k2 + bands.off_list - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_germanic_ratio_short_words() {
        let tokens = tokenize("cat dog extraordinary");
        assert!((germanic_ratio(&tokens) - 2.0 / 3.0 * 100.0).abs() < 1e-9);
    }
}
