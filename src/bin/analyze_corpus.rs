use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use styloscope_lib::error::AnalyzerError;
use styloscope_lib::models::{Corpus, ExternalLabel, ThresholdConfig};
use styloscope_lib::services::{
    analyze_text_with, assess_risk, confusion_matrix, corpus_record, corpus_stats,
    rank_outliers, ConfigStore, LexiconPosOracle, PosOracle,
};

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

/// Labels file: JSON object mapping sample name to "human" / "machine"
/// (also accepts "h" / "ai"); anything else stays unlabeled.
fn load_labels(path: &str) -> Result<HashMap<String, ExternalLabel>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read labels file {}", path))?;
    let raw: HashMap<String, String> =
        serde_json::from_str(&content).context("labels file is not a JSON string map")?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let label = match value.to_lowercase().as_str() {
                "human" | "h" => ExternalLabel::Human,
                "machine" | "ai" => ExternalLabel::Machine,
                _ => ExternalLabel::Unknown,
            };
            (name, label)
        })
        .collect())
}

fn ingest(path: &str) -> Result<(String, String), AnalyzerError> {
    let name = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());

    let extension = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if extension != "txt" && extension != "md" {
        return Err(AnalyzerError::Ingestion {
            name,
            reason: format!(
                "unsupported format `.{}` (plain text only; extract binary documents first)",
                extension
            ),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Ingestion {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    Ok((name, text))
}

fn load_thresholds(args: &[String]) -> Result<ThresholdConfig> {
    let mut thresholds = match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir)
            .load_thresholds()
            .unwrap_or_else(|e| {
                error!("{} (using defaults)", e);
                ThresholdConfig::default()
            }),
        None => ThresholdConfig::default(),
    };

    if let Some(value) = parse_arg_value(args, "--cv") {
        let value: f64 = value.parse().context("--cv expects a number")?;
        thresholds.set_cv_threshold(value)?;
    }
    if let Some(value) = parse_arg_value(args, "--sttr") {
        let value: f64 = value.parse().context("--sttr expects a number")?;
        thresholds.set_sttr_threshold(value)?;
    }
    if let Some(value) = parse_arg_value(args, "--md") {
        let value: f64 = value.parse().context("--md expects a number")?;
        thresholds.set_metadiscourse_threshold(value)?;
    }
    Ok(thresholds)
}

fn main() -> Result<()> {
    styloscope_lib::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  analyze_corpus <file.txt> [more files...] [--labels <labels.json>] [--seed <n>] [--cv <x>] [--sttr <x>] [--md <x>] [--no-grammar] [--out <json_path>]\n\nNotes:\n  - input files must be plain text (.txt or .md)\n  - --labels maps file names to \"human\"/\"machine\" for the confusion matrix\n  - --seed makes the VOCD-D estimate reproducible"
        );
        return Ok(());
    }

    let labels = match parse_arg_value(&args, "--labels") {
        Some(path) => load_labels(&path)?,
        None => HashMap::new(),
    };
    let seed: Option<u64> = parse_arg_value(&args, "--seed").and_then(|s| s.parse().ok());
    let skip_grammar = has_flag(&args, "--no-grammar");
    let out_path = parse_arg_value(&args, "--out");
    let thresholds = load_thresholds(&args)?;

    let files: Vec<&String> = args[1..]
        .iter()
        .enumerate()
        .filter(|(i, a)| {
            if a.starts_with("--") {
                return false;
            }
            // skip option values
            let prev = if *i == 0 { None } else { args[1..].get(i - 1) };
            !matches!(
                prev.map(|p| p.as_str()),
                Some("--labels") | Some("--seed") | Some("--cv") | Some("--sttr") | Some("--md")
                    | Some("--out")
            )
        })
        .map(|(_, a)| a)
        .collect();

    let oracle = LexiconPosOracle::new();
    let oracle_ref: Option<&dyn PosOracle> = if skip_grammar { None } else { Some(&oracle) };

    let mut corpus = Corpus::new(thresholds);
    let mut failures = 0usize;

    for path in &files {
        let (name, text) = match ingest(path) {
            Ok(ok) => ok,
            Err(e) => {
                error!("{}", e);
                eprintln!("skipped: {}", e);
                failures += 1;
                continue;
            }
        };

        let mut sample = analyze_text_with(&text, &name, oracle_ref, seed);
        if let Some(label) = labels.get(&name) {
            sample.external_label = *label;
        }

        let risk = assess_risk(&sample.features.core, &corpus.thresholds);
        println!(
            "[{}] words={} sentences={} cv={:.3} sttr={:.3} md={:.2}/1k",
            name,
            sample.features.core.word_count,
            sample.features.core.sentence_count,
            sample.features.core.burstiness,
            sample.features.core.sttr,
            sample.features.core.metadiscourse.density,
        );
        println!(
            "  verdict: {}{}",
            risk.verdict_text,
            if risk.cv_veto { " (cv veto)" } else { "" }
        );
        println!("  {}", preview(&text, 100));

        info!(sample = %name, verdict = %risk.verdict_text, "sample.analyzed");
        corpus.push(sample);
    }

    if corpus.is_empty() {
        eprintln!("No samples analyzed ({} file(s) failed).", failures);
        return Ok(());
    }

    println!();
    if let Some(stats) = corpus_stats(&corpus.samples) {
        println!(
            "Corpus: {} sample(s), {} words, {} sentences",
            stats.sample_count, stats.total_words, stats.total_sentences
        );
        println!(
            "  cv   mean={:.3} sd={:.3}\n  sttr mean={:.3} sd={:.3}\n  md   mean={:.2} sd={:.2}",
            stats.mean_burstiness,
            stats.std_burstiness,
            stats.mean_diversity,
            stats.std_diversity,
            stats.mean_metadiscourse,
            stats.std_metadiscourse,
        );

        let outliers = rank_outliers(&corpus.samples, &stats, &corpus.thresholds);
        if let Some(top) = outliers.first() {
            println!("  strongest outlier: {} (|z|={:.2})", top.name, top.max_abs_z);
        }
    }

    match confusion_matrix(&corpus.samples, &corpus.thresholds) {
        Some(matrix) => {
            println!(
                "Confusion ({} labeled): TP={} FP={} TN={} FN={}",
                matrix.labeled_count,
                matrix.true_positive,
                matrix.false_positive,
                matrix.true_negative,
                matrix.false_negative,
            );
            println!(
                "  sensitivity={:.3} specificity={:.3} youdenJ={:.3}",
                matrix.sensitivity, matrix.specificity, matrix.youden_j
            );
        }
        None => println!("Confusion matrix: no labeled samples."),
    }

    if let Some(out_path) = out_path {
        let record = corpus_record(&corpus);
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("failed to write {}", out_path))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    if failures > 0 {
        eprintln!("{} file(s) skipped.", failures);
    }

    Ok(())
}
