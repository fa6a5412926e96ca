//! Run storage API.

use crate::summary::{write_interval_summary, write_spell_map};
use crate::table::write_timeseries;
use crate::{ResultsError, ResultsResult};
use bf_sim::{SimulationConfig, YearRecord};
use bf_spells::{IntervalSummary, SpellCatalog};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub name: String,
    /// Trace file the run was driven by, as given.
    pub trace: String,
    pub timestamp: String,
    pub engine_version: String,
    pub simulation: SimulationConfig,
}

impl RunManifest {
    pub fn new(
        run_id: String,
        name: &str,
        trace: &str,
        engine_version: &str,
        simulation: SimulationConfig,
    ) -> Self {
        Self {
            run_id,
            name: name.to_string(),
            trace: trace.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: engine_version.to_string(),
            simulation,
        }
    }
}

/// One directory per run under a root: manifest.json, timeseries.csv, and
/// a curtailments.csv with spell and interval summaries.
#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[YearRecord],
        catalog: &SpellCatalog,
        intervals: &IntervalSummary,
    ) -> ResultsResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let mut timeseries = Vec::new();
        write_timeseries(&mut timeseries, records)?;
        fs::write(run_dir.join("timeseries.csv"), timeseries)?;

        let mut curtailments = Vec::new();
        {
            use std::io::Write;
            writeln!(curtailments, "Outputs for {}", manifest.name)?;
            writeln!(curtailments, "Discrete spell events")?;
            write_spell_map(&mut curtailments, &catalog.independent, None)?;
            writeln!(curtailments, "Nested spells")?;
            write_spell_map(&mut curtailments, &catalog.nested, None)?;
            write_interval_summary(&mut curtailments, intervals)?;
        }
        fs::write(run_dir.join("curtailments.csv"), curtailments)?;

        Ok(run_dir)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
