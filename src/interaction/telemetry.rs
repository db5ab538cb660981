//! Telemetry storage for resolved interact events.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use super::dispatch::InteractionOutcome;

/// Rolling log of interaction outcomes for debugging overlays.
#[derive(Resource, Debug)]
pub struct InteractionTelemetry {
    capacity: usize,
    records: VecDeque<InteractionRecord>,
}

impl InteractionTelemetry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: InteractionRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    #[allow(dead_code)]
    pub fn records(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter()
    }

    #[allow(dead_code)]
    pub fn latest(&self) -> Option<&InteractionRecord> {
        self.records.back()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InteractionRecord {
    pub occurred_at_seconds: f64,
    pub character: Entity,
    pub outcome: InteractionOutcome,
}

/// Appends interaction records to a JSON-lines file.
#[derive(Resource, Debug)]
pub struct InteractionTelemetryLog {
    output_path: PathBuf,
    pending: Vec<InteractionRecord>,
}

impl InteractionTelemetryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &InteractionRecord) {
        self.pending.push(record.clone());
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in std::mem::take(&mut self.pending) {
            let serialisable = SerializableInteractionRecord::from(&record);
            serde_json::to_writer(&mut file, &serialisable)?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }
}

/// Flushes pending records to disk, logging a warning if persistence fails.
pub fn flush_interaction_telemetry_log(mut log: ResMut<InteractionTelemetryLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist interaction telemetry to {:?}: {}",
            log.path(),
            err
        );
    }
}

#[derive(Serialize)]
struct SerializableInteractionRecord {
    occurred_at_seconds: f64,
    character: String,
    outcome: &'static str,
    category: Option<&'static str>,
    target: Option<String>,
}

impl From<&InteractionRecord> for SerializableInteractionRecord {
    fn from(value: &InteractionRecord) -> Self {
        Self {
            occurred_at_seconds: value.occurred_at_seconds,
            character: value.character.to_string(),
            outcome: value.outcome.label(),
            category: value.outcome.category().map(|category| category.label()),
            target: value.outcome.target().map(|target| target.to_string()),
        }
    }
}
