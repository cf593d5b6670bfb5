// Lexical diversity metrics. All token inputs are the segmenter's
// lower-cased output; every metric defines a zero value for streams too
// short to measure.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::models::{FirstAppearance, GrowthPoint};
use crate::services::analysis::lexicon;
use crate::services::text_processor::estimate_syllables;

const STTR_BLOCK: usize = 100;
const MATTR_WINDOW: usize = 50;
const MTLD_FACTOR_THRESHOLD: f64 = 0.72;
const VOCD_SAMPLE_SIZES: [usize; 4] = [35, 40, 45, 50];
const VOCD_TRIALS: usize = 3;
const GROWTH_STEP: usize = 50;
const TTR_DECAY_WINDOWS: [usize; 4] = [50, 100, 150, 200];

fn type_count<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<HashSet<_>>()
        .len()
}

/// Standardized TTR: mean TTR over consecutive full blocks of 100 tokens.
/// Below one block, falls back to the plain type/token ratio; a trailing
/// partial block is ignored.
pub fn sttr(tokens: &[String]) -> f64 {
    if tokens.len() < STTR_BLOCK {
        if tokens.is_empty() {
            return 0.0;
        }
        return type_count(tokens) as f64 / tokens.len() as f64;
    }
    let mut sum = 0.0;
    let mut blocks = 0usize;
    let mut start = 0usize;
    while start + STTR_BLOCK <= tokens.len() {
        let block = &tokens[start..start + STTR_BLOCK];
        sum += type_count(block) as f64 / STTR_BLOCK as f64;
        blocks += 1;
        start += STTR_BLOCK;
    }
    if blocks > 0 {
        sum / blocks as f64
    } else {
        0.0
    }
}

/// Moving-average TTR over every window of 50 tokens (stride 1). Shorter
/// streams fall back to the plain ratio.
pub fn mattr(tokens: &[String]) -> f64 {
    if tokens.len() < MATTR_WINDOW {
        if tokens.is_empty() {
            return 0.0;
        }
        return type_count(tokens) as f64 / tokens.len() as f64;
    }
    let mut sum = 0.0;
    let mut windows = 0usize;
    for start in 0..=(tokens.len() - MATTR_WINDOW) {
        let window = &tokens[start..start + MATTR_WINDOW];
        sum += type_count(window) as f64 / MATTR_WINDOW as f64;
        windows += 1;
    }
    sum / windows as f64
}

fn mtld_factor_score<'a, I>(tokens: I) -> f64
where
    I: Iterator<Item = &'a String>,
{
    let mut factors = 0.0;
    let mut types: HashSet<&str> = HashSet::new();
    let mut seen = 0usize;
    for token in tokens {
        types.insert(token.as_str());
        seen += 1;
        let ttr = types.len() as f64 / seen as f64;
        if ttr <= MTLD_FACTOR_THRESHOLD {
            factors += 1.0;
            types.clear();
            seen = 0;
        }
    }
    if seen > 0 {
        let ttr = types.len() as f64 / seen as f64;
        factors += (1.0 - ttr) / (1.0 - MTLD_FACTOR_THRESHOLD);
    }
    factors
}

/// Measure of Textual Lexical Diversity: mean factor length, averaged over
/// a forward and a backward pass. 0 below 50 tokens.
pub fn mtld(tokens: &[String]) -> f64 {
    if tokens.len() < 50 {
        return 0.0;
    }
    let forward = mtld_factor_score(tokens.iter());
    let backward = mtld_factor_score(tokens.iter().rev());
    let avg_factors = (forward + backward) / 2.0;
    if avg_factors > 0.0 {
        tokens.len() as f64 / avg_factors
    } else {
        0.0
    }
}

/// VOCD-D approximation: for each sample size (35/40/45/50 tokens) draw
/// three samples without replacement and average a closed-form D surrogate,
/// `types^2 / (2 * (size - types + 1))`. 0 below 50 tokens. Not the full
/// curve-fitting procedure; values are comparable across samples, not with
/// published D scores.
pub fn vocd_d_with<R: Rng>(tokens: &[String], rng: &mut R) -> f64 {
    if tokens.len() < 50 {
        return 0.0;
    }
    let mut total_d = 0.0;
    let mut draws = 0usize;
    for &size in &VOCD_SAMPLE_SIZES {
        if tokens.len() < size {
            continue;
        }
        for _ in 0..VOCD_TRIALS {
            let mut indices: HashSet<usize> = HashSet::new();
            let mut sample: Vec<&str> = Vec::with_capacity(size);
            while sample.len() < size {
                let idx = rng.random_range(0..tokens.len());
                if indices.insert(idx) {
                    sample.push(tokens[idx].as_str());
                }
            }
            let types = sample.iter().collect::<HashSet<_>>().len();
            total_d += (types * types) as f64 / (2.0 * (size - types + 1) as f64);
            draws += 1;
        }
    }
    if draws > 0 {
        total_d / draws as f64
    } else {
        0.0
    }
}

pub fn vocd_d(tokens: &[String]) -> f64 {
    vocd_d_with(tokens, &mut rand::rng())
}

/// Deterministic variant for reproducible runs.
pub fn vocd_d_seeded(tokens: &[String], seed: u64) -> f64 {
    vocd_d_with(tokens, &mut ChaCha8Rng::seed_from_u64(seed))
}

fn frequency_table(tokens: &[String]) -> HashMap<&str, usize> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *freq.entry(token.as_str()).or_insert(0) += 1;
    }
    freq
}

/// Share of types occurring exactly once, relative to all tokens.
pub fn hapax_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let hapax = frequency_table(tokens)
        .values()
        .filter(|&&c| c == 1)
        .count();
    hapax as f64 / tokens.len() as f64
}

/// Share of types occurring exactly twice, relative to all tokens.
pub fn dis_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let dis = frequency_table(tokens)
        .values()
        .filter(|&&c| c == 2)
        .count();
    dis as f64 / tokens.len() as f64
}

/// Cumulative TTR sampled every 50 tokens; empty below one step.
pub fn growth_curve(tokens: &[String]) -> Vec<GrowthPoint> {
    let mut curve = Vec::new();
    let mut position = GROWTH_STEP;
    while position <= tokens.len() {
        let types = type_count(&tokens[..position]);
        curve.push(GrowthPoint {
            position,
            types,
            ttr: types as f64 / position as f64,
        });
        position += GROWTH_STEP;
    }
    curve
}

/// Index of the first occurrence of every type, in stream order.
pub fn first_appearance(tokens: &[String]) -> Vec<FirstAppearance> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut trace = Vec::new();
    for (position, token) in tokens.iter().enumerate() {
        if seen.insert(token.as_str()) {
            trace.push(FirstAppearance {
                position,
                word: token.clone(),
            });
        }
    }
    trace
}

/// TTR slope over prefix windows of 50/100/150/200 tokens, scaled by 1000.
/// Expected to be negative for natural text; 0 below 200 tokens.
pub fn ttr_decay(tokens: &[String]) -> f64 {
    if tokens.len() < 200 {
        return 0.0;
    }
    let mut ttrs = Vec::new();
    for &size in &TTR_DECAY_WINDOWS {
        if tokens.len() >= size {
            ttrs.push(type_count(&tokens[..size]) as f64 / size as f64);
        }
    }
    if ttrs.len() < 2 {
        return 0.0;
    }
    let span = (TTR_DECAY_WINDOWS[ttrs.len() - 1] - TTR_DECAY_WINDOWS[0]) as f64;
    let slope = (ttrs[ttrs.len() - 1] - ttrs[0]) / span;
    slope * 1000.0
}

/// Percent of tokens that are neither function words nor AWL entries and
/// longer than three letters. A stop-list proxy for off-frequency-list
/// vocabulary.
pub fn rare_word_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let rare = tokens
        .iter()
        .filter(|t| {
            t.chars().count() > 3
                && !lexicon::is_function_word(t)
                && !lexicon::is_academic_word(t)
        })
        .count();
    rare as f64 / tokens.len() as f64 * 100.0
}

pub fn avg_word_length(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total: usize = tokens.iter().map(|t| t.chars().count()).sum();
    total as f64 / tokens.len() as f64
}

/// Percent of tokens estimated at three or more syllables.
pub fn multi_syllabic_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let multi = tokens
        .iter()
        .filter(|t| estimate_syllables(t) >= 3)
        .count();
    multi as f64 / tokens.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn repeat_cycle(words: &[&str], len: usize) -> Vec<String> {
        (0..len).map(|i| words[i % words.len()].to_string()).collect()
    }

    #[test]
    fn test_sttr_empty_is_zero() {
        assert_eq!(sttr(&[]), 0.0);
    }

    #[test]
    fn test_sttr_short_fallback() {
        let tokens = toks(&["a", "b", "a", "c"]);
        assert!((sttr(&tokens) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sttr_ignores_partial_block() {
        // 250 tokens cycling 10 types: both full blocks have TTR 0.10, the
        // trailing 50 tokens must not move the average
        let tokens = repeat_cycle(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"], 250);
        assert!((sttr(&tokens) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_sttr_and_mattr_bounded() {
        let tokens = repeat_cycle(&["x", "y", "z", "w"], 300);
        for value in [sttr(&tokens), mattr(&tokens)] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_mattr_short_fallback() {
        let tokens = toks(&["a", "b", "b"]);
        assert!((mattr(&tokens) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mattr_all_distinct_is_one() {
        let tokens: Vec<String> = (0..120).map(|i| format!("w{}", i)).collect();
        assert!((mattr(&tokens) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mtld_below_fifty_tokens_is_zero() {
        let tokens: Vec<String> = (0..49).map(|i| format!("w{}", i)).collect();
        assert_eq!(mtld(&tokens), 0.0);
    }

    #[test]
    fn test_mtld_positive_on_varied_text() {
        let tokens: Vec<String> = (0..200).map(|i| format!("w{}", i % 37)).collect();
        assert!(mtld(&tokens) > 0.0);
    }

    #[test]
    fn test_vocd_below_fifty_tokens_is_zero() {
        let tokens: Vec<String> = (0..49).map(|i| format!("w{}", i)).collect();
        assert_eq!(vocd_d_seeded(&tokens, 7), 0.0);
    }

    #[test]
    fn test_vocd_seeded_is_reproducible() {
        let tokens: Vec<String> = (0..150).map(|i| format!("w{}", i % 60)).collect();
        let a = vocd_d_seeded(&tokens, 42);
        let b = vocd_d_seeded(&tokens, 42);
        assert_eq!(a, b);
        assert!(a > 0.0);
    }

    #[test]
    fn test_hapax_and_dis_ratios() {
        let tokens = toks(&["a", "b", "b", "c", "c", "c"]);
        assert!((hapax_ratio(&tokens) - 1.0 / 6.0).abs() < 1e-12);
        assert!((dis_ratio(&tokens) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_growth_curve_steps() {
        let tokens: Vec<String> = (0..130).map(|i| format!("w{}", i % 20)).collect();
        let curve = growth_curve(&tokens);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].position, 50);
        assert_eq!(curve[1].position, 100);
        assert!((curve[0].ttr - 20.0 / 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_appearance_positions() {
        let tokens = toks(&["a", "b", "a", "c"]);
        let trace = first_appearance(&tokens);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[2].position, 3);
        assert_eq!(trace[2].word, "c");
    }

    #[test]
    fn test_ttr_decay_needs_two_hundred_tokens() {
        let tokens: Vec<String> = (0..199).map(|i| format!("w{}", i)).collect();
        assert_eq!(ttr_decay(&tokens), 0.0);
    }

    #[test]
    fn test_ttr_decay_negative_on_repetitive_tail() {
        // all distinct in the first 50, heavy repetition after
        let mut tokens: Vec<String> = (0..50).map(|i| format!("u{}", i)).collect();
        tokens.extend((0..200).map(|i| format!("r{}", i % 5)));
        assert!(ttr_decay(&tokens) < 0.0);
    }

    #[test]
    fn test_rare_word_ratio_filters_common_and_short() {
        let tokens = toks(&["the", "cat", "serendipity", "of"]);
        // only "serendipity": "cat" is too short, the rest are function words
        assert!((rare_word_ratio(&tokens) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_avg_word_length() {
        let tokens = toks(&["ab", "abcd"]);
        assert!((avg_word_length(&tokens) - 3.0).abs() < 1e-12);
    }
}
