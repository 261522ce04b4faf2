//! # Tick source
//!
//! Replays recorded ticks for offline runs of the agent. Each tick is a row
//! of a CSV file with the header `lat,lon,steer,throttle,brake`, holding the
//! position fix from the localisation feed and the raw control demand from
//! the inference stage.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

// Internal
use crate::agent::InputData;
use route_if::{ControlTriple, PositionFix};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single recorded tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TickRecord {
    pub lat: f64,
    pub lon: f64,
    pub steer: f64,
    pub throttle: f64,
    pub brake: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while reading ticks.
#[derive(Debug, thiserror::Error)]
pub enum TickSrcError {
    #[error("Cannot read the tick file: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl From<TickRecord> for InputData {
    fn from(t: TickRecord) -> Self {
        InputData {
            position: PositionFix::new(t.lat, t.lon),
            raw_control: ControlTriple::new(t.steer, t.throttle, t.brake),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Read all ticks from a CSV file.
pub fn read_ticks_file<P: AsRef<Path>>(path: P) -> Result<Vec<TickRecord>, TickSrcError> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    let ticks = collect_ticks(reader)?;

    debug!("Read {} ticks from {:?}", ticks.len(), path.as_ref());

    Ok(ticks)
}

/// Read all ticks from any CSV source.
pub fn read_ticks<R: Read>(source: R) -> Result<Vec<TickRecord>, TickSrcError> {
    collect_ticks(csv::Reader::from_reader(source))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn collect_ticks<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TickRecord>, TickSrcError> {
    let mut ticks: Vec<TickRecord> = Vec::new();

    for record in reader.deserialize::<TickRecord>() {
        ticks.push(record?);
    }

    Ok(ticks)
}
