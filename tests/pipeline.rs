// End-to-end pipeline tests: raw text in, features, verdicts, and corpus
// calibration out.

use styloscope_lib::models::{
    Corpus, ExternalLabel, FeatureReport, MetricStatus, TextSample, ThresholdConfig, Verdict,
};
use styloscope_lib::services::analysis::lexical;
use styloscope_lib::services::text_processor::{split_sentences, tokenize};
use styloscope_lib::services::{
    analyze_text, analyze_text_with, assess_risk, confusion_matrix, corpus_record, corpus_stats,
    rank_outliers, z_scores,
};

fn synthetic_sample(name: &str, cv: f64, sttr: f64, md: f64, label: ExternalLabel) -> TextSample {
    let mut features = FeatureReport::default();
    features.core.burstiness = cv;
    features.core.sttr = sttr;
    features.core.metadiscourse.density = md;
    features.core.word_count = 100;
    features.core.sentence_count = 5;
    TextSample {
        name: name.to_string(),
        tokens: Vec::new(),
        sentences: Vec::new(),
        sentence_lengths: Vec::new(),
        features,
        external_label: label,
    }
}

#[test]
fn reference_example_end_to_end() {
    let text = "The cat sat. However, the dog ran quickly and happily.";
    let sample = analyze_text(text, "ref");

    assert_eq!(sample.features.core.word_count, 10);
    assert_eq!(sample.sentence_lengths, vec![3, 7]);
    assert!((sample.features.core.burstiness - 0.4).abs() < 1e-12);
    assert!((sample.features.core.metadiscourse.density - 100.0).abs() < 1e-9);
    // 9 distinct tokens out of 10
    assert!((sample.features.core.sttr - 0.9).abs() < 1e-12);

    let risk = assess_risk(&sample.features.core, &ThresholdConfig::default());
    assert!(!risk.cv_veto);
    assert_eq!(risk.overall, Verdict::LikelyHuman);
    assert!(risk.verdict_text.contains("Human"));
}

#[test]
fn tokenization_is_idempotent() {
    let text = "Dr. Smith said, \"It's e.g. a well-known fact!\" Isn't it?";
    let tokens = tokenize(text);
    let retokenized = tokenize(&tokens.join(" "));
    assert_eq!(tokens, retokenized);
}

#[test]
fn abbreviations_do_not_split_sentences() {
    let sentences = split_sentences("Dr. Smith arrived. He left, e.g. at noon.");
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0], "Dr. Smith arrived");
}

#[test]
fn diversity_metrics_stay_in_unit_range() {
    let text = "The quick brown fox jumps over the lazy dog. \
                A slow grey wolf walks under the bright moon tonight. \
                Every single word here adds something new and different. \
                Repetition repetition repetition makes the ratio drop quickly now.";
    let tokens = tokenize(text);

    for value in [lexical::sttr(&tokens), lexical::mattr(&tokens)] {
        assert!((0.0..=1.0).contains(&value), "out of range: {}", value);
    }
    assert_eq!(lexical::sttr(&[]), 0.0);
    assert_eq!(lexical::mattr(&[]), 0.0);
}

#[test]
fn length_gated_metrics_are_zero_on_short_text() {
    let tokens = tokenize("Just a handful of words here.");
    assert!(tokens.len() < 50);
    assert_eq!(lexical::mtld(&tokens), 0.0);
    assert_eq!(lexical::vocd_d(&tokens), 0.0);
    assert!(lexical::ttr_decay(&tokens) == 0.0);
}

#[test]
fn uniform_rhythm_triggers_the_veto() {
    // every sentence is exactly four tokens, so cv = 0
    let text = "The cat sat here. The dog ran fast. The owl flew low.";
    let sample = analyze_text(text, "uniform");
    assert_eq!(sample.features.core.burstiness, 0.0);

    let risk = assess_risk(&sample.features.core, &ThresholdConfig::default());
    assert!(risk.cv_veto);
    assert_eq!(risk.verdict_text, "AI / HIGH RISK");
    assert_eq!(risk.burstiness, MetricStatus::AiLike);
}

#[test]
fn seeded_vocd_is_reproducible_across_runs() {
    let words = [
        "river", "stone", "cloud", "ember", "willow", "harbor", "meadow", "lantern", "cinder",
        "hollow", "thicket", "summit",
    ];
    let text = words
        .iter()
        .cycle()
        .take(150)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let a = analyze_text_with(&text, "a", None, Some(42));
    let b = analyze_text_with(&text, "b", None, Some(42));
    assert_eq!(a.features.lexical.vocd_d, b.features.lexical.vocd_d);
    assert!(a.features.lexical.vocd_d > 0.0);
}

#[test]
fn grammar_tier_is_skippable() {
    let sample = analyze_text_with("The cat sat on the mat.", "s", None, None);
    assert!(sample.features.grammar.is_none());

    let json = serde_json::to_value(&sample).unwrap();
    assert!(json["features"].get("grammar").is_none());
    assert!(json["features"]["core"].get("wordCount").is_some());
}

#[test]
fn confusion_matrix_counts_labeled_samples_only() {
    let samples = vec![
        // predicted human, labeled human
        synthetic_sample("tp", 0.50, 0.80, 12.0, ExternalLabel::Human),
        // predicted ai (veto), labeled machine
        synthetic_sample("tn", 0.05, 0.80, 12.0, ExternalLabel::Machine),
        // predicted ai (veto), labeled human
        synthetic_sample("fn", 0.05, 0.80, 12.0, ExternalLabel::Human),
        // predicted human, labeled machine
        synthetic_sample("fp", 0.50, 0.80, 12.0, ExternalLabel::Machine),
        // unlabeled, must be skipped entirely
        synthetic_sample("skip", 0.50, 0.80, 12.0, ExternalLabel::Unknown),
    ];
    let thresholds = ThresholdConfig::default();

    let matrix = confusion_matrix(&samples, &thresholds).unwrap();
    assert_eq!(matrix.labeled_count, 4);
    assert_eq!(
        matrix.true_positive + matrix.false_positive + matrix.true_negative
            + matrix.false_negative,
        matrix.labeled_count
    );
    assert_eq!(matrix.true_positive, 1);
    assert_eq!(matrix.false_negative, 1);
    assert_eq!(matrix.false_positive, 1);
    assert_eq!(matrix.true_negative, 1);
    assert!((matrix.sensitivity - 0.5).abs() < 1e-12);
    assert!((matrix.specificity - 0.5).abs() < 1e-12);
    assert!(matrix.youden_j.abs() < 1e-12);

    let unlabeled = vec![synthetic_sample("x", 0.5, 0.8, 12.0, ExternalLabel::Unknown)];
    assert!(confusion_matrix(&unlabeled, &thresholds).is_none());
}

#[test]
fn z_scores_are_signed_relative_to_thresholds() {
    let samples = vec![
        synthetic_sample("low", 0.20, 0.40, 4.0, ExternalLabel::Unknown),
        synthetic_sample("high", 0.40, 0.60, 12.0, ExternalLabel::Unknown),
    ];
    let thresholds = ThresholdConfig::default();
    let stats = corpus_stats(&samples).unwrap();

    let low = z_scores(&samples[0], &stats, &thresholds);
    let high = z_scores(&samples[1], &stats, &thresholds);
    assert!(low.burstiness < 0.0);
    assert!(high.burstiness > 0.0);
    assert!(low.metadiscourse < 0.0);
    assert!(high.metadiscourse > 0.0);

    let outliers = rank_outliers(&samples, &stats, &thresholds);
    assert_eq!(outliers.len(), 2);
    assert!(outliers[0].max_abs_z >= outliers[1].max_abs_z);
}

#[test]
fn z_scores_are_zero_for_degenerate_spread() {
    let samples = vec![
        synthetic_sample("a", 0.30, 0.50, 9.0, ExternalLabel::Unknown),
        synthetic_sample("b", 0.30, 0.50, 9.0, ExternalLabel::Unknown),
    ];
    let stats = corpus_stats(&samples).unwrap();
    assert_eq!(stats.std_burstiness, 0.0);

    let z = z_scores(&samples[0], &stats, &ThresholdConfig::default());
    assert_eq!(z.burstiness, 0.0);
    assert_eq!(z.diversity, 0.0);
    assert_eq!(z.metadiscourse, 0.0);
}

#[test]
fn invalid_thresholds_are_rejected_without_sticking() {
    assert!(ThresholdConfig::new(-0.1, 0.45, 8.0).is_err());
    assert!(ThresholdConfig::new(0.25, 1.5, 8.0).is_err());
    assert!(ThresholdConfig::new(0.25, 0.45, f64::NAN).is_err());

    let mut thresholds = ThresholdConfig::default();
    assert!(thresholds.set_sttr_threshold(2.0).is_err());
    assert_eq!(thresholds.sttr_threshold, 0.45);
    assert!(thresholds.set_cv_threshold(0.3).is_ok());
    assert_eq!(thresholds.cv_threshold, 0.3);
}

#[test]
fn corpus_record_serializes_camel_case() {
    let mut corpus = Corpus::new(ThresholdConfig::default());
    corpus.push(analyze_text(
        "The cat sat. However, the dog ran quickly and happily.",
        "doc-1",
    ));
    corpus.push(analyze_text(
        "Short sentences. Then a much longer sentence follows with many extra words inside it.",
        "doc-2",
    ));

    let record = corpus_record(&corpus);
    let json = serde_json::to_value(&record).unwrap();

    assert!(json["thresholds"]["cvThreshold"].is_number());
    assert_eq!(json["stats"]["sampleCount"], 2);
    assert_eq!(json["samples"].as_array().unwrap().len(), 2);
    assert!(json["samples"][0]["zScores"]["burstiness"].is_number());
    assert!(json["samples"][0]["features"]["core"]["wordCount"].is_number());
    assert!(json["samples"][0]["risk"]["verdictText"].is_string());
    // no labels anywhere, so no matrix
    assert!(json.get("confusion").is_none());
    assert_eq!(json["outliers"].as_array().unwrap().len(), 2);
}
