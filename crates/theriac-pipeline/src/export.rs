//! JSON and JSONL renderings of a normalization outcome
//!
//! The JSON form carries the accepted evidence together with the report and
//! accounting, for archival or review. The JSONL form is the knowledge-base
//! hand-off: one self-contained merged record per line, so consumers can
//! stream a file without parsing it whole.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use theriac_domain::record::MergedEvidence;
use theriac_normalizer::NormalizationReport;
use tracing::info;

use crate::error::EngineError;
use crate::types::{NormalizationOutcome, RunAccounting};

/// Everything a downstream consumer needs from one run
#[derive(Debug, Serialize)]
struct RunExport<'a> {
    accepted: &'a [MergedEvidence],
    report: &'a NormalizationReport,
    accounting: &'a RunAccounting,
}

/// Render the accepted evidence, report, and accounting as pretty JSON
pub fn to_json(outcome: &NormalizationOutcome) -> Result<String, EngineError> {
    let export = RunExport {
        accepted: &outcome.accepted,
        report: &outcome.report,
        accounting: &outcome.accounting,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Render merged evidence as JSON Lines, one record per line
pub fn to_jsonl(accepted: &[MergedEvidence]) -> Result<String, EngineError> {
    let mut lines = String::new();
    for evidence in accepted {
        lines.push_str(&serde_json::to_string(evidence)?);
        lines.push('\n');
    }
    Ok(lines)
}

/// Write the JSON rendering of an outcome to a file
///
/// Parent directories are created as needed.
pub fn write_json(outcome: &NormalizationOutcome, path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(to_json(outcome)?.as_bytes())?;
    info!(
        "Wrote {} accepted record(s) to {}",
        outcome.accepted.len(),
        path.display()
    );
    Ok(())
}

/// Write merged evidence to a JSONL file, one record per line
///
/// Parent directories are created as needed.
pub fn write_jsonl(accepted: &[MergedEvidence], path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    for evidence in accepted {
        let line = serde_json::to_string(evidence)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
    }
    info!(
        "Wrote {} record(s) to {}",
        accepted.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resolved_record;
    use theriac_domain::scoring::apply_scores;
    use theriac_domain::ScoringConfig;

    fn merged_fixture() -> MergedEvidence {
        let mut record = resolved_record("11289", "4450");
        apply_scores(&mut record, &ScoringConfig::default());
        MergedEvidence::single(record)
    }

    fn outcome_fixture() -> NormalizationOutcome {
        let accepted = vec![merged_fixture()];
        let report = theriac_normalizer::NormalizationReport::generate(2, &accepted);
        NormalizationOutcome {
            accepted,
            rejected: Vec::new(),
            report,
            accounting: RunAccounting {
                input: 2,
                accepted: 1,
                groups: 1,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_json_carries_report_and_accounting() {
        let json = to_json(&outcome_fixture()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["accepted"].as_array().unwrap().len(), 1);
        assert_eq!(value["report"]["input_count"], 2);
        assert_eq!(value["accounting"]["input"], 2);
        assert_eq!(value["accounting"]["accepted"], 1);
    }

    #[test]
    fn test_jsonl_is_one_record_per_line() {
        let accepted = vec![merged_fixture(), merged_fixture()];
        let jsonl = to_jsonl(&accepted).unwrap();

        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["sources_count"], 1);
            assert_eq!(value["record"]["drug_a"]["resolved_id"], "11289");
        }
    }

    #[test]
    fn test_jsonl_of_nothing_is_empty() {
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }

    #[test]
    fn test_write_jsonl_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports/run.jsonl");
        let accepted = vec![merged_fixture()];

        write_jsonl(&accepted, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: MergedEvidence = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(parsed, accepted[0]);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/run.json");

        write_json(&outcome_fixture(), &path).unwrap();

        assert!(path.exists());
    }
}
