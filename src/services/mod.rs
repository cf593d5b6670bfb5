pub mod analysis;
pub mod config_store;
pub mod pos_oracle;
pub mod text_processor;

pub use analysis::{analyze_text, analyze_text_with};
pub use analysis::calibration::{
    confusion_matrix, corpus_record, corpus_stats, rank_outliers, sample_record, z_scores,
};
pub use analysis::risk::assess_risk;
pub use config_store::{AppConfig, ConfigStore};
pub use pos_oracle::{LexiconPosOracle, PosOracle, PosTag, TaggedSentence, TaggedToken};
