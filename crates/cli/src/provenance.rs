//! Provenance sidecars: how a result file came about (code revision, solver settings,
//! input shape, command parameters).

use anyhow::{Context, Result};
use miniball::api::{MiniballCfg, PointSet};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct SolverSettings {
    pub eps: f64,
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct InputShape {
    pub points: usize,
    pub dimension: usize,
}

/// Contents of `<stem>.provenance.json`.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub miniball_version: &'static str,
    pub command: Value,
    pub solver: SolverSettings,
    pub input: InputShape,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new<P: PointSet + ?Sized>(command: Value, cfg: &MiniballCfg, pts: &P) -> Self {
        Self {
            code_rev: git_rev(),
            miniball_version: miniball::VERSION,
            command,
            solver: SolverSettings {
                eps: cfg.eps,
                max_iterations: cfg.max_iterations,
            },
            input: InputShape {
                points: pts.size(),
                dimension: pts.dimension(),
            },
            outputs: Vec::new(),
        }
    }

    /// Records `artifact` as the output and writes the sidecar beside it.
    pub fn write_next_to(mut self, artifact: &Path) -> Result<PathBuf> {
        self.outputs.push(artifact.to_string_lossy().into_owned());
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `out/ball.json` → `out/ball.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map_or_else(|| "result".into(), |s| s.to_os_string());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time) or `git rev-parse HEAD`; "unknown" otherwise.
fn git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
