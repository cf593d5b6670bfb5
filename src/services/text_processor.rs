// Text segmentation: tokenizer, abbreviation-safe sentence splitter,
// paragraph splitter and the shared syllable estimator.

use regex::Regex;

/// Abbreviations protected during sentence splitting. Each entry is
/// (match pattern, placeholder, canonical restored form); placeholders must
/// not contain sentence-final punctuation.
const PROTECTED_ABBREVIATIONS: [(&str, &str, &str); 8] = [
    (r"(?i)\bi\.e\.", "IE_PROT", "i.e."),
    (r"(?i)\be\.g\.", "EG_PROT", "e.g."),
    (r"(?i)\betc\.", "ETC_PROT", "etc."),
    (r"(?i)\bdr\.", "DR_PROT", "Dr."),
    (r"(?i)\bmr\.", "MR_PROT", "Mr."),
    (r"(?i)\bmrs\.", "MRS_PROT", "Mrs."),
    (r"(?i)\bms\.", "MS_PROT", "Ms."),
    (r"(?i)\bprof\.", "PROF_PROT", "Prof."),
];

/// Lower-cases the text and extracts alphabetic runs, allowing a single
/// apostrophe or hyphen between letter groups ("don't", "well-known").
/// Digits, punctuation and whitespace never appear in the output.
pub fn tokenize(text: &str) -> Vec<String> {
    let word_re = Regex::new(r"[a-z]+(?:['-][a-z]+)*").unwrap();
    let lowered = text.to_lowercase();
    word_re
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splits on runs of `.`, `!`, `?` after masking the fixed abbreviation
/// list, then restores the abbreviations inside each sentence. Trimmed,
/// empty segments dropped; interior newlines are not boundaries.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut masked = text.to_string();
    for (pattern, placeholder, _) in PROTECTED_ABBREVIATIONS {
        let re = Regex::new(pattern).unwrap();
        masked = re.replace_all(&masked, placeholder).to_string();
    }

    let boundary = Regex::new(r"[.!?]+").unwrap();
    boundary
        .split(&masked)
        .map(|segment| {
            let mut restored = segment.to_string();
            for (_, placeholder, canonical) in PROTECTED_ABBREVIATIONS {
                restored = restored.replace(placeholder, canonical);
            }
            restored.trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Token count per sentence, using the same tokenizer as the full text.
pub fn sentence_token_lengths(sentences: &[String]) -> Vec<usize> {
    sentences.iter().map(|s| tokenize(s).len()).collect()
}

/// Paragraphs are runs of text separated by one or more blank lines.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let break_re = Regex::new(r"\n\s*\n").unwrap();
    break_re
        .split(text)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Vowel-cluster syllable estimate: strip a silent tail, count runs of one
/// or two vowels. Words of three letters or fewer count as one syllable.
pub fn estimate_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    if lowered.chars().count() <= 3 {
        return 1;
    }
    let tail_re = Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").unwrap();
    let trimmed = tail_re.replace(&lowered, "").to_string();
    let trimmed = trimmed.strip_prefix('y').unwrap_or(&trimmed).to_string();
    let vowel_re = Regex::new(r"[aeiouy]{1,2}").unwrap();
    let clusters = vowel_re.find_iter(&trimmed).count();
    if clusters == 0 {
        1
    } else {
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("The cat sat. However, the dog ran quickly and happily.");
        assert_eq!(
            tokens,
            vec![
                "the", "cat", "sat", "however", "the", "dog", "ran", "quickly", "and", "happily"
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_internal_punctuation() {
        assert_eq!(tokenize("Don't re-use it!"), vec!["don't", "re-use", "it"]);
    }

    #[test]
    fn test_tokenize_drops_digits_and_symbols() {
        assert_eq!(tokenize("42 + x9 == $"), vec!["x"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("123 456").is_empty());
    }

    #[test]
    fn test_tokenize_idempotent_on_own_output() {
        let first = tokenize("Well-known facts DON'T change; they persist!");
        let rejoined = first.join(" ");
        assert_eq!(tokenize(&rejoined), first);
    }

    #[test]
    fn test_split_sentences_basic() {
        let sents = split_sentences("The cat sat. However, the dog ran quickly and happily.");
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0], "The cat sat");
        assert_eq!(sents[1], "However, the dog ran quickly and happily");
    }

    #[test]
    fn test_split_sentences_protects_abbreviations() {
        let sents = split_sentences("Dr. Smith left early. We followed, e.g. by bus.");
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0], "Dr. Smith left early");
        assert_eq!(sents[1], "We followed, e.g. by bus");
    }

    #[test]
    fn test_split_sentences_collapses_punctuation_runs() {
        let sents = split_sentences("Really?! Yes... absolutely.");
        assert_eq!(sents, vec!["Really", "Yes", "absolutely"]);
    }

    #[test]
    fn test_split_sentences_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  \n\t ").is_empty());
    }

    #[test]
    fn test_sentence_token_lengths() {
        let sents = split_sentences("The cat sat. However, the dog ran quickly and happily.");
        assert_eq!(sentence_token_lengths(&sents), vec![3, 7]);
    }

    #[test]
    fn test_split_paragraphs() {
        let paras = split_paragraphs("First block.\nStill first.\n\nSecond block.\n\n\nThird.");
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[1], "Second block.");
    }

    #[test]
    fn test_estimate_syllables() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("happy"), 2);
        // "eau" splits into two clusters under the 1-2 vowel rule
        assert_eq!(estimate_syllables("beautiful"), 4);
        assert_eq!(estimate_syllables("the"), 1);
        // silent-e tail is stripped
        assert_eq!(estimate_syllables("side"), 1);
    }
}
