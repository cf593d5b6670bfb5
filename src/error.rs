// Error taxonomy for the analysis pipeline.
//
// Degenerate *inputs* (empty text, single sentence, short token streams) are
// not errors: every metric defines a zero/neutral value for them. Errors are
// reserved for boundary violations (bad thresholds, unreadable documents) and
// for oracle failures that downgrade the analysis to a partial one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid threshold `{name}`: {value} (allowed range: {range})")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("failed to ingest `{name}`: {reason}")]
    Ingestion { name: String, reason: String },

    #[error("POS oracle failed: {0}")]
    Oracle(String),
}
