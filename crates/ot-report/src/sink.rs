//! CSV writers for the two OraTune output tables.

use std::path::Path;
use tracing::info;

use ot_types::{
    AggregateRecord, Configuration, Dimension, ScenarioSet, ScoreResult, SearchOutcome,
    TunerError, TunerResult,
};

fn csv_error(err: csv::Error) -> TunerError {
    TunerError::Report(err.to_string())
}

fn score_field(score: &ScoreResult) -> String {
    match score.known() {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn dimension_fields(config: &Configuration, dims: &[Dimension]) -> Vec<String> {
    dims.iter()
        .map(|dim| {
            config
                .value(&dim.name)
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Writes every trajectory step of every outcome, tagged with scenario and
/// run: `scenario, run, iteration, <one column per dimension>, score,
/// temperature`. An unknown score renders as an empty field.
pub fn write_trajectory_csv<P: AsRef<Path>>(
    path: P,
    dims: &[Dimension],
    outcomes: &[SearchOutcome],
) -> TunerResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    let mut header = vec!["scenario".to_string(), "run".to_string(), "iteration".to_string()];
    header.extend(dims.iter().map(|d| d.name.clone()));
    header.push("score".to_string());
    header.push("temperature".to_string());
    writer.write_record(&header).map_err(csv_error)?;

    let mut rows = 0usize;
    for outcome in outcomes {
        for step in &outcome.trajectory {
            let mut row = vec![
                outcome.scenario.to_string(),
                outcome.run.to_string(),
                step.iteration.to_string(),
            ];
            row.extend(dimension_fields(&step.config, dims));
            row.push(score_field(&step.score));
            row.push(step.temperature.to_string());
            writer.write_record(&row).map_err(csv_error)?;
            rows += 1;
        }
    }

    writer.flush()?;
    info!(rows, path = %path.display(), "wrote trajectory table");
    Ok(())
}

/// Writes one row per aggregate record: `optimized_for, <one column per
/// dimension>, score_<scenario> per scenario, weighted_score`.
pub fn write_aggregate_csv<P: AsRef<Path>>(
    path: P,
    dims: &[Dimension],
    scenarios: &ScenarioSet,
    records: &[AggregateRecord],
) -> TunerResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    let mut header = vec!["optimized_for".to_string()];
    header.extend(dims.iter().map(|d| d.name.clone()));
    header.extend(scenarios.ids().map(|id| format!("score_{id}")));
    header.push("weighted_score".to_string());
    writer.write_record(&header).map_err(csv_error)?;

    for record in records {
        let mut row = vec![record
            .optimized_for
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()];
        row.extend(dimension_fields(&record.config, dims));
        for id in scenarios.ids() {
            let score = record.scores.get(id).copied().unwrap_or(ScoreResult::Unknown);
            row.push(score_field(&score));
        }
        row.push(score_field(&record.weighted_score));
        writer.write_record(&row).map_err(csv_error)?;
    }

    writer.flush()?;
    info!(rows = records.len(), path = %path.display(), "wrote aggregate table");
    Ok(())
}
