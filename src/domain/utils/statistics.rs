use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::simulator::report::SimulationReport;
use crate::error::Result;

/// Every row of the statistics file measures one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatParameter {
    /// Tuples emitted by a sensor.
    Emitted,

    /// Mean inter-arrival time of a sensor's emissions.
    EmissionMean,

    /// Tuples that reached an actuator.
    Delivered,

    /// Tuples that travelled an edge of a given tuple type.
    Tuples,

    /// Tuples without a module instance or actuator to go to.
    Dropped,

    LoopSamples,
    LoopLatencyAverage,
    LoopLatencyMin,
    LoopLatencyMax,

    /// Devices a module was placed on.
    Placement,

    /// Simulated time of the last processed event.
    FinishTime,
}

/// store values in their native format, only format them when writing to the CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self {
        StatValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatRecord {
    pub run_id: String,
    pub metric: StatParameter,
    pub subject: String,
    pub value: StatValue,
}

/// Flattens a report into one record per measured value.
pub fn report_records(run_id: &str, report: &SimulationReport) -> Vec<StatRecord> {
    let record = |metric: StatParameter, subject: &str, value: StatValue| StatRecord {
        run_id: run_id.to_string(),
        metric,
        subject: subject.to_string(),
        value,
    };

    let mut records = Vec::new();

    for (sensor, count) in &report.emitted {
        records.push(record(StatParameter::Emitted, sensor, (*count).into()));
    }
    for (sensor, mean) in &report.emission_mean {
        records.push(record(StatParameter::EmissionMean, sensor, (*mean).into()));
    }
    for (actuator, count) in &report.delivered {
        records.push(record(StatParameter::Delivered, actuator, (*count).into()));
    }
    for (tuple_type, count) in &report.tuples_by_type {
        records.push(record(StatParameter::Tuples, tuple_type, (*count).into()));
    }
    records.push(record(StatParameter::Dropped, &report.strategy, report.dropped.into()));

    for latency in &report.loops {
        records.push(record(StatParameter::LoopSamples, &latency.label, latency.samples.into()));
        if let Some(average) = latency.average() {
            records.push(record(StatParameter::LoopLatencyAverage, &latency.label, average.into()));
            records.push(record(StatParameter::LoopLatencyMin, &latency.label, latency.min.into()));
            records.push(record(StatParameter::LoopLatencyMax, &latency.label, latency.max.into()));
        }
    }

    for (module, devices) in &report.placement {
        records.push(record(StatParameter::Placement, module, devices.join(",").into()));
    }
    records.push(record(StatParameter::FinishTime, &report.strategy, report.finish_time.into()));

    records
}

/// Writes the report as `;`-separated CSV with a header row.
pub fn write_report<W: Write>(writer: W, run_id: &str, report: &SimulationReport) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    for record in report_records(run_id, report) {
        csv_wtr.serialize(record)?;
    }
    csv_wtr.flush()?;
    Ok(())
}

pub fn write_report_file(path: &Path, run_id: &str, report: &SimulationReport) -> Result<()> {
    let file = File::create(path)?;
    write_report(file, run_id, report)?;
    log::info!("Statistics written to '{}'.", path.display());
    Ok(())
}
