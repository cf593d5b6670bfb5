// Corpus-level calibration: aggregate statistics, z-scores against the
// thresholds, confusion matrix with Youden's J, and outlier ranking. All of
// it is recomputed from the current samples on every call; nothing is
// cached against threshold or label edits.

use crate::models::{
    ConfusionMatrix, Corpus, CorpusRecord, CorpusStats, ExternalLabel, OutlierEntry,
    SampleRecord, TextSample, ThresholdConfig, ZScores,
};
use crate::services::analysis::risk::assess_risk;

fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Per-metric means and population standard deviations. `None` for an
/// empty corpus.
pub fn corpus_stats(samples: &[TextSample]) -> Option<CorpusStats> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;

    let cvs: Vec<f64> = samples.iter().map(|s| s.features.core.burstiness).collect();
    let sttrs: Vec<f64> = samples.iter().map(|s| s.features.core.sttr).collect();
    let densities: Vec<f64> = samples
        .iter()
        .map(|s| s.features.core.metadiscourse.density)
        .collect();

    let mean_burstiness = cvs.iter().sum::<f64>() / n;
    let mean_diversity = sttrs.iter().sum::<f64>() / n;
    let mean_metadiscourse = densities.iter().sum::<f64>() / n;

    Some(CorpusStats {
        sample_count: samples.len(),
        total_words: samples.iter().map(|s| s.features.core.word_count).sum(),
        total_sentences: samples.iter().map(|s| s.features.core.sentence_count).sum(),
        mean_burstiness,
        mean_diversity,
        mean_metadiscourse,
        std_burstiness: population_std(&cvs, mean_burstiness),
        std_diversity: population_std(&sttrs, mean_diversity),
        std_metadiscourse: population_std(&densities, mean_metadiscourse),
    })
}

/// Signed distance of each metric from its classification threshold in
/// corpus standard deviations. 0 where the corpus has no spread, so a
/// single-sample corpus never produces infinities.
pub fn z_scores(
    sample: &TextSample,
    stats: &CorpusStats,
    thresholds: &ThresholdConfig,
) -> ZScores {
    let z = |value: f64, threshold: f64, std: f64| {
        if std > 0.0 {
            (value - threshold) / std
        } else {
            0.0
        }
    };
    ZScores {
        burstiness: z(
            sample.features.core.burstiness,
            thresholds.cv_threshold,
            stats.std_burstiness,
        ),
        diversity: z(
            sample.features.core.sttr,
            thresholds.sttr_threshold,
            stats.std_diversity,
        ),
        metadiscourse: z(
            sample.features.core.metadiscourse.density,
            thresholds.metadiscourse_threshold,
            stats.std_metadiscourse,
        ),
    }
}

/// Verdict-vs-label agreement over labeled samples only. Positive class is
/// "human" on both axes; verdicts are recomputed against the current
/// thresholds, never read from storage. `None` when no sample is labeled.
pub fn confusion_matrix(
    samples: &[TextSample],
    thresholds: &ThresholdConfig,
) -> Option<ConfusionMatrix> {
    let mut matrix = ConfusionMatrix::default();
    for sample in samples {
        let actual_human = match sample.external_label {
            ExternalLabel::Human => true,
            ExternalLabel::Machine => false,
            ExternalLabel::Unknown => continue,
        };
        let risk = assess_risk(&sample.features.core, thresholds);
        let predicted_human = risk.verdict_text.contains("Human");

        match (predicted_human, actual_human) {
            (true, true) => matrix.true_positive += 1,
            (false, true) => matrix.false_negative += 1,
            (true, false) => matrix.false_positive += 1,
            (false, false) => matrix.true_negative += 1,
        }
        matrix.labeled_count += 1;
    }

    if matrix.labeled_count == 0 {
        return None;
    }

    let tp = matrix.true_positive as f64;
    let fp = matrix.false_positive as f64;
    let tn = matrix.true_negative as f64;
    let fn_ = matrix.false_negative as f64;

    matrix.sensitivity = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
    matrix.specificity = if tn + fp > 0.0 { tn / (tn + fp) } else { 0.0 };
    matrix.youden_j = matrix.sensitivity + matrix.specificity - 1.0;

    Some(matrix)
}

/// Samples ranked by the largest absolute z-score, descending.
pub fn rank_outliers(
    samples: &[TextSample],
    stats: &CorpusStats,
    thresholds: &ThresholdConfig,
) -> Vec<OutlierEntry> {
    let mut entries: Vec<OutlierEntry> = samples
        .iter()
        .map(|sample| {
            let scores = z_scores(sample, stats, thresholds);
            OutlierEntry {
                name: sample.name.clone(),
                max_abs_z: scores.max_abs(),
                z_scores: scores,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.max_abs_z
            .partial_cmp(&a.max_abs_z)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Flat per-sample export record with the derived verdict and z-scores.
pub fn sample_record(
    sample: &TextSample,
    stats: &CorpusStats,
    thresholds: &ThresholdConfig,
) -> SampleRecord {
    SampleRecord {
        name: sample.name.clone(),
        external_label: sample.external_label,
        word_count: sample.features.core.word_count,
        sentence_count: sample.features.core.sentence_count,
        features: sample.features.clone(),
        risk: assess_risk(&sample.features.core, thresholds),
        z_scores: z_scores(sample, stats, thresholds),
    }
}

/// Whole-corpus export record for downstream formatting.
pub fn corpus_record(corpus: &Corpus) -> CorpusRecord {
    let stats = corpus_stats(&corpus.samples);
    let (samples, outliers) = match &stats {
        Some(stats) => (
            corpus
                .samples
                .iter()
                .map(|s| sample_record(s, stats, &corpus.thresholds))
                .collect(),
            rank_outliers(&corpus.samples, stats, &corpus.thresholds),
        ),
        None => (Vec::new(), Vec::new()),
    };
    CorpusRecord {
        thresholds: corpus.thresholds,
        stats,
        confusion: confusion_matrix(&corpus.samples, &corpus.thresholds),
        outliers,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoreFeatures, FeatureReport, MetadiscourseSummary};

    fn sample(name: &str, cv: f64, sttr: f64, md: f64, label: ExternalLabel) -> TextSample {
        TextSample {
            name: name.to_string(),
            tokens: Vec::new(),
            sentences: Vec::new(),
            sentence_lengths: Vec::new(),
            features: FeatureReport {
                core: CoreFeatures {
                    burstiness: cv,
                    sttr,
                    metadiscourse: MetadiscourseSummary {
                        density: md,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            external_label: label,
        }
    }

    #[test]
    fn test_stats_empty_corpus() {
        assert!(corpus_stats(&[]).is_none());
    }

    #[test]
    fn test_stats_population_sigma() {
        let samples = vec![
            sample("a", 0.2, 0.4, 4.0, ExternalLabel::Unknown),
            sample("b", 0.4, 0.6, 8.0, ExternalLabel::Unknown),
        ];
        let stats = corpus_stats(&samples).unwrap();
        assert!((stats.mean_burstiness - 0.3).abs() < 1e-12);
        // population sigma of {0.2, 0.4} is 0.1
        assert!((stats.std_burstiness - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_z_score_sign_matches_threshold_side() {
        let samples = vec![
            sample("low", 0.10, 0.30, 2.0, ExternalLabel::Unknown),
            sample("high", 0.50, 0.70, 14.0, ExternalLabel::Unknown),
        ];
        let thresholds = ThresholdConfig::default();
        let stats = corpus_stats(&samples).unwrap();
        let low = z_scores(&samples[0], &stats, &thresholds);
        let high = z_scores(&samples[1], &stats, &thresholds);
        assert!(low.burstiness < 0.0 && low.diversity < 0.0 && low.metadiscourse < 0.0);
        assert!(high.burstiness > 0.0 && high.diversity > 0.0 && high.metadiscourse > 0.0);
    }

    #[test]
    fn test_z_score_zero_spread_guard() {
        let samples = vec![sample("only", 0.5, 0.5, 9.0, ExternalLabel::Unknown)];
        let stats = corpus_stats(&samples).unwrap();
        let scores = z_scores(&samples[0], &stats, &ThresholdConfig::default());
        assert_eq!(scores.burstiness, 0.0);
        assert_eq!(scores.diversity, 0.0);
        assert_eq!(scores.metadiscourse, 0.0);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let thresholds = ThresholdConfig::default();
        let samples = vec![
            // verdict LikelyHuman, labeled human: TP
            sample("tp", 0.40, 0.60, 12.0, ExternalLabel::Human),
            // veto verdict, labeled human: FN
            sample("fn", 0.10, 0.60, 12.0, ExternalLabel::Human),
            // veto verdict, labeled machine: TN
            sample("tn", 0.10, 0.30, 2.0, ExternalLabel::Machine),
            // verdict LikelyHuman, labeled machine: FP
            sample("fp", 0.40, 0.60, 12.0, ExternalLabel::Machine),
            // unlabeled samples are skipped
            sample("skip", 0.40, 0.60, 12.0, ExternalLabel::Unknown),
        ];
        let matrix = confusion_matrix(&samples, &thresholds).unwrap();
        assert_eq!(matrix.true_positive, 1);
        assert_eq!(matrix.false_negative, 1);
        assert_eq!(matrix.true_negative, 1);
        assert_eq!(matrix.false_positive, 1);
        assert_eq!(matrix.labeled_count, 4);
        assert!((matrix.sensitivity - 0.5).abs() < 1e-12);
        assert!((matrix.specificity - 0.5).abs() < 1e-12);
        assert!((matrix.youden_j - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_confusion_matrix_none_without_labels() {
        let samples = vec![sample("a", 0.4, 0.6, 12.0, ExternalLabel::Unknown)];
        assert!(confusion_matrix(&samples, &ThresholdConfig::default()).is_none());
    }

    #[test]
    fn test_outliers_sorted_descending() {
        let samples = vec![
            sample("mild", 0.30, 0.45, 8.0, ExternalLabel::Unknown),
            sample("wild", 0.90, 0.95, 30.0, ExternalLabel::Unknown),
            sample("middle", 0.50, 0.60, 15.0, ExternalLabel::Unknown),
        ];
        let stats = corpus_stats(&samples).unwrap();
        let ranked = rank_outliers(&samples, &stats, &ThresholdConfig::default());
        assert_eq!(ranked[0].name, "wild");
        assert!(ranked[0].max_abs_z >= ranked[1].max_abs_z);
        assert!(ranked[1].max_abs_z >= ranked[2].max_abs_z);
    }

    #[test]
    fn test_corpus_record_round_trip() {
        let mut corpus = Corpus::default();
        corpus.push(sample("a", 0.4, 0.6, 12.0, ExternalLabel::Human));
        corpus.push(sample("b", 0.1, 0.3, 2.0, ExternalLabel::Machine));
        let record = corpus_record(&corpus);
        assert_eq!(record.samples.len(), 2);
        assert!(record.stats.is_some());
        let confusion = record.confusion.unwrap();
        assert_eq!(confusion.true_positive, 1);
        assert_eq!(confusion.true_negative, 1);
    }
}
