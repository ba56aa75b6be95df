//! On-disk run cache.
//!
//! ```text
//! <root>/<run_id>/timeseries.jsonl   one TimeseriesRecord per line
//! <root>/<run_id>/manifest.json      written last, via rename
//! ```
//!
//! A run directory without a manifest is an interrupted save and does not
//! count as cached.

use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store under `.pgc/runs` next to the plant file.
    pub fn for_plant(plant_path: &Path) -> ResultsResult<Self> {
        let plant_dir = plant_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: format!("{} has no parent directory", plant_path.display()),
            })?;
        Self::new(plant_dir.join(".pgc").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn file(&self, run_id: &str, name: &str) -> PathBuf {
        self.root_dir.join(run_id).join(name)
    }

    fn existing(&self, run_id: &str, name: &str) -> ResultsResult<PathBuf> {
        let path = self.file(run_id, name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.file(run_id, MANIFEST_FILE).is_file()
    }

    /// Write a run. Saving over an existing id replaces it.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.root_dir.join(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let mut out = BufWriter::new(File::create(run_dir.join(TIMESERIES_FILE))?);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        let staged = run_dir.join(format!("{MANIFEST_FILE}.tmp"));
        fs::write(&staged, serde_json::to_vec_pretty(manifest)?)?;
        fs::rename(&staged, run_dir.join(MANIFEST_FILE))?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.existing(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_slice(&fs::read(path)?)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let path = self.existing(run_id, TIMESERIES_FILE)?;
        let mut records = Vec::new();
        for (idx, line) in BufReader::new(File::open(path)?).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| ResultsError::BadRecord {
                run_id: run_id.to_string(),
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Cached runs of one plant, oldest first. Unreadable runs are skipped.
    pub fn list_runs(&self, plant_name: &str) -> ResultsResult<Vec<RunManifest>> {
        if !self.root_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            match self.load_manifest(&run_id) {
                Ok(m) if m.plant_name == plant_name => runs.push(m),
                _ => {}
            }
        }
        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.root_dir.join(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
