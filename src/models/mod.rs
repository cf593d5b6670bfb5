// Data models shared across the analysis services and the CLI.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Ground-truth authorship label attached to a sample at ingestion time.
/// `Unknown` samples take part in corpus statistics but are skipped by the
/// confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExternalLabel {
    Human,
    Machine,
    Unknown,
}

impl Default for ExternalLabel {
    fn default() -> Self {
        ExternalLabel::Unknown
    }
}

/// One analyzed document. `tokens`, `sentences` and `sentence_lengths` are
/// the segmenter's output for the same raw text; `sentence_lengths[i]` is the
/// token count of `sentences[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSample {
    pub name: String,
    pub tokens: Vec<String>,
    pub sentences: Vec<String>,
    pub sentence_lengths: Vec<usize>,
    pub features: FeatureReport,
    #[serde(default)]
    pub external_label: ExternalLabel,
}

/// All extracted metrics, grouped by tier. Serializes as
/// `tierName -> metricName -> value` so consumers can enumerate a tier
/// without knowing individual metric names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureReport {
    pub core: CoreFeatures,
    pub lexical: LexicalFeatures,
    pub discourse: DiscourseFeatures,
    pub syntax: SyntaxFeatures,
    /// Present only when a POS oracle was supplied and succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<GrammarFeatures>,
    pub readability: ReadabilityFeatures,
}

/// The three signals the risk classifier reads, plus basic counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub sttr: f64,
    pub burstiness: f64,
    pub metadiscourse: MetadiscourseSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadiscourseSummary {
    pub counts: MetadiscourseCounts,
    pub total: usize,
    /// Markers per 1000 tokens.
    pub density: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadiscourseCounts {
    pub transitions: usize,
    pub hedges: usize,
    pub boosters: usize,
    pub attitude_markers: usize,
    pub self_mention: usize,
    pub engagement_markers: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalFeatures {
    pub mattr: f64,
    pub mtld: f64,
    pub vocd_d: f64,
    pub hapax_ratio: f64,
    pub dis_ratio: f64,
    pub ttr_decay: f64,
    pub rare_word_ratio: f64,
    pub avg_word_length: f64,
    pub multi_syllabic_ratio: f64,
    pub growth_curve: Vec<GrowthPoint>,
    pub first_appearance: Vec<FirstAppearance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub position: usize,
    pub types: usize,
    pub ttr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstAppearance {
    pub position: usize,
    pub word: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscourseFeatures {
    pub extended: ExtendedMetadiscourse,
    pub discourse_marker_density: f64,
    pub hedging_ratio: f64,
    pub boosting_ratio: f64,
    pub reporting_verb_density: f64,
    pub anaphoric_demonstrative_density: f64,
    pub lexical_repetition: f64,
    pub lexical_chain_continuity: f64,
    pub jaccard_cohesion: f64,
}

/// Phrase-matched extended categories: counts plus per-1k densities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedMetadiscourse {
    pub code_glosses: usize,
    pub frame_markers: usize,
    pub evidentials: usize,
    pub directives: usize,
    pub reader_pronouns: usize,
    pub code_gloss_density: f64,
    pub frame_marker_density: f64,
    pub evidential_density: f64,
    pub directive_density: f64,
    pub reader_pronoun_density: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxFeatures {
    pub sentence_length_std_dev: f64,
    pub subordination_depth: f64,
    pub clauses_per_sentence: f64,
    pub dependent_clause_ratio: f64,
    pub subordinate_clause_ratio: f64,
    pub complexity_index: f64,
    pub t_unit_length: f64,
    pub sentence_opener_diversity: f64,
    pub conjunctions: ConjunctionCounts,
    pub paragraphs: ParagraphProfile,
    pub patterns: MicroSyntaxPatterns,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConjunctionCounts {
    pub coordinating: usize,
    pub subordinating: usize,
    pub correlative: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProfile {
    pub count: usize,
    pub avg_sentences: f64,
    pub length_variation: f64,
}

/// Regex-estimated construction frequencies. Per-sentence rates are
/// percentages; per-token rates are per 1000 tokens unless noted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroSyntaxPatterns {
    pub it_cleft_rate: f64,
    pub wh_cleft_rate: f64,
    pub existential_there_rate: f64,
    pub negative_inversion_rate: f64,
    pub impersonal_rate: f64,
    pub passive_agent_rate: f64,
    pub light_verb_rate: f64,
    /// Percent of tokens that are contracted forms.
    pub contraction_ratio: f64,
    /// Percent of genitives realized as 's rather than of-phrases.
    pub genitive_s_preference: f64,
    /// Percent of dative constructions realized as double objects.
    pub double_object_preference: f64,
    pub idiom_rate: f64,
}

/// POS-oracle-dependent tier. Every value is an estimate bounded by the
/// oracle's accuracy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarFeatures {
    pub lexical_density: f64,
    pub open_class_ttr: f64,
    pub content_function_ratio: f64,
    pub nominal_verbal_ratio: f64,
    pub passive_voice_density: f64,
    pub present_perfect_ratio: f64,
    pub hallidayan: HallidayanProcesses,
    pub dynamic_stative_ratio: f64,
    pub opener_pos: OpenerPosCounts,
    pub noun_verb_ratio: f64,
    pub adjective_noun_ratio: f64,
    pub adverb_verb_ratio: f64,
    pub lexical_density_variability: f64,
    pub repetitive_pattern_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallidayanProcesses {
    pub material: usize,
    pub mental: usize,
    pub relational: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenerPosCounts {
    pub noun: usize,
    pub verb: usize,
    pub adjective: usize,
    pub adverb: usize,
    pub other: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityFeatures {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub coleman_liau: f64,
    pub automated_readability: f64,
    pub function_word_profile: Vec<WordFrequency>,
    pub pronouns: PronounDistribution,
    pub frequency_bands: FrequencyBands,
    pub awl_coverage: f64,
    pub germanic_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronounDistribution {
    pub first_person: usize,
    pub second_person: usize,
    pub third_person: usize,
    pub first_percent: f64,
    pub second_percent: f64,
    pub third_percent: f64,
}

/// Coverage percentages over all tokens; the three bands partition them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyBands {
    pub k1: f64,
    pub k2: f64,
    pub off_list: f64,
}

fn default_cv_threshold() -> f64 {
    0.25
}
fn default_sttr_threshold() -> f64 {
    0.45
}
fn default_metadiscourse_threshold() -> f64 {
    8.0
}

/// Classification thresholds. Mutate only through the validating setters so
/// out-of-range values never reach the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    #[serde(default = "default_cv_threshold")]
    pub cv_threshold: f64,
    #[serde(default = "default_sttr_threshold")]
    pub sttr_threshold: f64,
    #[serde(default = "default_metadiscourse_threshold")]
    pub metadiscourse_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig {
            cv_threshold: default_cv_threshold(),
            sttr_threshold: default_sttr_threshold(),
            metadiscourse_threshold: default_metadiscourse_threshold(),
        }
    }
}

impl ThresholdConfig {
    pub fn new(cv: f64, sttr: f64, metadiscourse: f64) -> Result<Self, AnalyzerError> {
        let mut config = ThresholdConfig::default();
        config.set_cv_threshold(cv)?;
        config.set_sttr_threshold(sttr)?;
        config.set_metadiscourse_threshold(metadiscourse)?;
        Ok(config)
    }

    pub fn set_cv_threshold(&mut self, value: f64) -> Result<(), AnalyzerError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalyzerError::InvalidThreshold {
                name: "cvThreshold",
                value,
                range: ">= 0, finite",
            });
        }
        self.cv_threshold = value;
        Ok(())
    }

    pub fn set_sttr_threshold(&mut self, value: f64) -> Result<(), AnalyzerError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AnalyzerError::InvalidThreshold {
                name: "sttrThreshold",
                value,
                range: "0.0..=1.0",
            });
        }
        self.sttr_threshold = value;
        Ok(())
    }

    pub fn set_metadiscourse_threshold(&mut self, value: f64) -> Result<(), AnalyzerError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalyzerError::InvalidThreshold {
                name: "metadiscourseThreshold",
                value,
                range: ">= 0, finite",
            });
        }
        self.metadiscourse_threshold = value;
        Ok(())
    }

    /// Re-checks every field; used when a config is deserialized from disk.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        let mut probe = ThresholdConfig::default();
        probe.set_cv_threshold(self.cv_threshold)?;
        probe.set_sttr_threshold(self.sttr_threshold)?;
        probe.set_metadiscourse_threshold(self.metadiscourse_threshold)?;
        Ok(())
    }
}

/// Per-metric classification outcome against the fixed bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricStatus {
    HumanLike,
    AiLike,
    Ambiguous,
}

impl std::fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricStatus::HumanLike => write!(f, "Human-like"),
            MetricStatus::AiLike => write!(f, "AI-like"),
            MetricStatus::Ambiguous => write!(f, "Ambiguous"),
        }
    }
}

/// Overall verdict. Display strings are the contract downstream consumers
/// match on: the confusion matrix treats any verdict containing "Human" as a
/// predicted-human outcome, so only `LikelyHuman` may contain that word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    AiHighRisk,
    LikelyHuman,
    LikelyAi,
    Inconclusive,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::AiHighRisk => "AI / HIGH RISK",
            Verdict::LikelyHuman => "High Stylistic Variation Detected - Likely Human",
            Verdict::LikelyAi => "Low Stylistic Variation Detected - Likely AI",
            Verdict::Inconclusive => "Mixed Stylistic Signals - Inconclusive",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived classification for one sample. Never stored on the sample;
/// recomputed from (features, thresholds) on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub burstiness: MetricStatus,
    pub diversity: MetricStatus,
    pub metadiscourse: MetricStatus,
    pub cv_veto: bool,
    pub overall: Verdict,
    pub verdict_text: String,
}

/// Append-only collection of analyzed samples plus the thresholds they are
/// classified against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub samples: Vec<TextSample>,
    pub thresholds: ThresholdConfig,
}

impl Corpus {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Corpus {
            samples: Vec::new(),
            thresholds,
        }
    }

    pub fn push(&mut self, sample: TextSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Corpus::new(ThresholdConfig::default())
    }
}

/// Per-metric aggregates over the whole corpus. Standard deviations are
/// population (divide by N).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub sample_count: usize,
    pub total_words: usize,
    pub total_sentences: usize,
    pub mean_burstiness: f64,
    pub mean_diversity: f64,
    pub mean_metadiscourse: f64,
    pub std_burstiness: f64,
    pub std_diversity: f64,
    pub std_metadiscourse: f64,
}

/// Signed distances from the classification thresholds in corpus standard
/// deviations; 0 where the corpus has no spread.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZScores {
    pub burstiness: f64,
    pub diversity: f64,
    pub metadiscourse: f64,
}

impl ZScores {
    pub fn max_abs(&self) -> f64 {
        self.burstiness
            .abs()
            .max(self.diversity.abs())
            .max(self.metadiscourse.abs())
    }
}

/// Verdict-vs-label agreement over labeled samples. Positive class is
/// "human": predicted when the verdict text contains "Human", actual when
/// the label is `Human`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
    pub labeled_count: usize,
    pub sensitivity: f64,
    pub specificity: f64,
    pub youden_j: f64,
}

/// Flat export record for one sample: features plus derived verdict and
/// z-scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    pub name: String,
    pub external_label: ExternalLabel,
    pub word_count: usize,
    pub sentence_count: usize,
    pub features: FeatureReport,
    pub risk: RiskAssessment,
    pub z_scores: ZScores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierEntry {
    pub name: String,
    pub max_abs_z: f64,
    pub z_scores: ZScores,
}

/// Whole-corpus export record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRecord {
    pub thresholds: ThresholdConfig,
    pub stats: Option<CorpusStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusion: Option<ConfusionMatrix>,
    pub outliers: Vec<OutlierEntry>,
    pub samples: Vec<SampleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults() {
        let t = ThresholdConfig::default();
        assert_eq!(t.cv_threshold, 0.25);
        assert_eq!(t.sttr_threshold, 0.45);
        assert_eq!(t.metadiscourse_threshold, 8.0);
    }

    #[test]
    fn test_threshold_rejects_out_of_range() {
        let mut t = ThresholdConfig::default();
        assert!(t.set_cv_threshold(-0.1).is_err());
        assert!(t.set_sttr_threshold(1.5).is_err());
        assert!(t.set_metadiscourse_threshold(f64::NAN).is_err());
        // rejected values must not stick
        assert_eq!(t, ThresholdConfig::default());
    }

    #[test]
    fn test_verdict_strings_human_marker() {
        assert!(Verdict::LikelyHuman.as_str().contains("Human"));
        for v in [Verdict::AiHighRisk, Verdict::LikelyAi, Verdict::Inconclusive] {
            assert!(!v.as_str().contains("Human"));
        }
    }

    #[test]
    fn test_feature_report_serializes_by_tier() {
        let report = FeatureReport::default();
        let json = serde_json::to_value(&report).unwrap();
        for tier in ["core", "lexical", "discourse", "syntax", "readability"] {
            assert!(json.get(tier).is_some(), "missing tier {}", tier);
        }
        // grammar tier omitted when no oracle ran
        assert!(json.get("grammar").is_none());
    }
}
