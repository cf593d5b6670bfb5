// Risk classification: per-metric banding with a burstiness veto, then a
// 2-of-3 majority. Pure function of the sample's core features and the
// current thresholds.

use crate::models::{CoreFeatures, MetricStatus, RiskAssessment, ThresholdConfig, Verdict};

/// Fixed burstiness bands. Empirically chosen constants; the configurable
/// cv threshold only drives the veto, not these bands.
pub const CV_HUMAN_BAND: f64 = 0.30;
pub const CV_AI_BAND: f64 = 0.20;
/// Diversity floor below which STTR reads as AI-like.
pub const STTR_AI_FLOOR: f64 = 0.40;
/// Metadiscourse density floor (per 1k tokens) below which it reads AI-like.
pub const METADISCOURSE_AI_FLOOR: f64 = 5.0;

fn burstiness_status(cv: f64) -> MetricStatus {
    if cv > CV_HUMAN_BAND {
        MetricStatus::HumanLike
    } else if cv < CV_AI_BAND {
        MetricStatus::AiLike
    } else {
        MetricStatus::Ambiguous
    }
}

fn diversity_status(sttr: f64, thresholds: &ThresholdConfig) -> MetricStatus {
    if sttr > thresholds.sttr_threshold {
        MetricStatus::HumanLike
    } else if sttr < STTR_AI_FLOOR {
        MetricStatus::AiLike
    } else {
        MetricStatus::Ambiguous
    }
}

fn metadiscourse_status(density: f64, thresholds: &ThresholdConfig) -> MetricStatus {
    if density > thresholds.metadiscourse_threshold {
        MetricStatus::HumanLike
    } else if density < METADISCOURSE_AI_FLOOR {
        MetricStatus::AiLike
    } else {
        MetricStatus::Ambiguous
    }
}

/// Veto first: burstiness below the configured cv threshold forces the
/// high-risk verdict outright (uniform sentence rhythm is the strongest
/// single signal). Otherwise each metric is banded independently and two
/// agreeing statuses decide; anything else is inconclusive.
pub fn assess_risk(core: &CoreFeatures, thresholds: &ThresholdConfig) -> RiskAssessment {
    let cv = core.burstiness;
    let sttr = core.sttr;
    let density = core.metadiscourse.density;

    if cv < thresholds.cv_threshold {
        let overall = Verdict::AiHighRisk;
        return RiskAssessment {
            burstiness: MetricStatus::AiLike,
            diversity: diversity_status(sttr, thresholds),
            metadiscourse: metadiscourse_status(density, thresholds),
            cv_veto: true,
            overall,
            verdict_text: overall.as_str().to_string(),
        };
    }

    let burstiness = burstiness_status(cv);
    let diversity = diversity_status(sttr, thresholds);
    let metadiscourse = metadiscourse_status(density, thresholds);

    let statuses = [burstiness, diversity, metadiscourse];
    let human_like = statuses
        .iter()
        .filter(|s| **s == MetricStatus::HumanLike)
        .count();
    let ai_like = statuses
        .iter()
        .filter(|s| **s == MetricStatus::AiLike)
        .count();

    let overall = if human_like >= 2 {
        Verdict::LikelyHuman
    } else if ai_like >= 2 {
        Verdict::LikelyAi
    } else {
        Verdict::Inconclusive
    };

    RiskAssessment {
        burstiness,
        diversity,
        metadiscourse,
        cv_veto: false,
        overall,
        verdict_text: overall.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadiscourseSummary;

    fn core(cv: f64, sttr: f64, md_density: f64) -> CoreFeatures {
        CoreFeatures {
            burstiness: cv,
            sttr,
            metadiscourse: MetadiscourseSummary {
                density: md_density,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_cv_veto_overrides_strong_signals() {
        let thresholds = ThresholdConfig::default();
        // diversity and metadiscourse both look human, veto still fires
        let risk = assess_risk(&core(0.10, 0.60, 12.0), &thresholds);
        assert!(risk.cv_veto);
        assert_eq!(risk.overall, Verdict::AiHighRisk);
        assert_eq!(risk.burstiness, MetricStatus::AiLike);
        assert_eq!(risk.diversity, MetricStatus::HumanLike);
        assert_eq!(risk.metadiscourse, MetricStatus::HumanLike);
    }

    #[test]
    fn test_majority_human() {
        let thresholds = ThresholdConfig::default();
        // cv 0.35 human, sttr 0.55 human, metadiscourse 2.0 ai-like
        let risk = assess_risk(&core(0.35, 0.55, 2.0), &thresholds);
        assert!(!risk.cv_veto);
        assert_eq!(risk.overall, Verdict::LikelyHuman);
    }

    #[test]
    fn test_majority_ai() {
        let thresholds = ThresholdConfig::default();
        // cv passes the veto but bands ai-like alongside low diversity
        let risk = assess_risk(&core(0.26, 0.35, 2.0), &thresholds);
        assert_eq!(risk.overall, Verdict::LikelyAi);
    }

    #[test]
    fn test_inconclusive_split() {
        let thresholds = ThresholdConfig::default();
        // one human, one ai, one ambiguous
        let risk = assess_risk(&core(0.35, 0.42, 2.0), &thresholds);
        assert_eq!(risk.overall, Verdict::Inconclusive);
    }

    #[test]
    fn test_boundary_is_not_veto() {
        let thresholds = ThresholdConfig::default();
        // exactly at the threshold: no veto, band is ambiguous
        let risk = assess_risk(&core(0.25, 0.42, 6.0), &thresholds);
        assert!(!risk.cv_veto);
        assert_eq!(risk.burstiness, MetricStatus::Ambiguous);
        assert_eq!(risk.overall, Verdict::Inconclusive);
    }

    #[test]
    fn test_thresholds_read_at_call_time() {
        let mut thresholds = ThresholdConfig::default();
        let features = core(0.26, 0.50, 2.0);
        assert_eq!(
            assess_risk(&features, &thresholds).overall,
            Verdict::Inconclusive
        );
        thresholds.set_cv_threshold(0.28).unwrap();
        assert_eq!(
            assess_risk(&features, &thresholds).overall,
            Verdict::AiHighRisk
        );
    }
}
