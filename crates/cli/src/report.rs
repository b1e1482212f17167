//! Human-readable and JSON renderings of a computed miniball.

use anyhow::{Context, Result};
use miniball::api::{Miniball, PointSet, Quality};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const RULE: &str = "====================================================";

#[derive(Debug, Serialize)]
pub struct QualityReport {
    pub qr_inconsistency: f64,
    pub min_convex_coefficient: f64,
    pub max_overlength: f64,
    pub max_underlength: f64,
    pub iterations: usize,
    pub support_size: usize,
}

impl From<Quality> for QualityReport {
    fn from(q: Quality) -> Self {
        Self {
            qr_inconsistency: q.qr_inconsistency(),
            min_convex_coefficient: q.min_convex_coefficient(),
            max_overlength: q.max_overlength(),
            max_underlength: q.max_underlength(),
            iterations: q.iterations(),
            support_size: q.support_size(),
        }
    }
}

/// JSON document written by `--out`. `None` fields mean the point set was empty.
#[derive(Debug, Serialize)]
pub struct BallReport {
    pub points: usize,
    pub dimension: usize,
    pub center: Option<Vec<f64>>,
    pub radius: Option<f64>,
    pub squared_radius: Option<f64>,
    pub support: Vec<usize>,
    pub elapsed_secs: f64,
    pub quality: Option<QualityReport>,
}

impl BallReport {
    pub fn new<P: PointSet + ?Sized>(mb: &Miniball<'_, P>, elapsed: Duration) -> Self {
        let solved = !mb.is_empty();
        Self {
            points: mb.size(),
            dimension: mb.dimension(),
            center: solved.then(|| mb.center().to_vec()),
            radius: solved.then(|| mb.radius()),
            squared_radius: solved.then(|| mb.squared_radius()),
            support: mb.support(),
            elapsed_secs: elapsed.as_secs_f64(),
            quality: solved.then(|| mb.verify().into()),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }
}

/// The classic driver printout: timing, radius, center, quality.
pub fn print_console<P: PointSet + ?Sized>(mb: &Miniball<'_, P>, elapsed: Duration) {
    println!("Running time: {}s", elapsed.as_secs_f64());
    if mb.is_empty() {
        println!("Empty point set: the miniball is empty.");
        println!("{RULE}");
        return;
    }
    println!(
        "Radius = {} (squared: {})",
        mb.radius(),
        mb.squared_radius()
    );
    println!("Center:");
    for x in mb.center() {
        println!("  {x}");
    }
    println!("{RULE}");
    print!("{}", mb.verify().console_fmt());
    println!("{RULE}");
}

pub fn print_banner() {
    println!("{RULE}");
    println!("Starting computation...");
    println!("{RULE}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniball::api::ArrayPointSet;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn json_report_has_ball_and_quality() {
        let pts = ArrayPointSet::from_rows(&[vec![1.0, 2.0], vec![5.0, 2.0]]).unwrap();
        let mb = Miniball::new(&pts);
        let report = BallReport::new(&mb, Duration::from_millis(3));
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ball.json");
        report.write_json(&path).unwrap();

        let parsed: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["points"], 2);
        assert!((parsed["radius"].as_f64().unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(parsed["support"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["quality"]["support_size"], 2);
    }

    #[test]
    fn empty_report_has_no_center() {
        let pts = ArrayPointSet::new(2, 0);
        let mb = Miniball::new(&pts);
        let report = BallReport::new(&mb, Duration::ZERO);
        assert!(report.center.is_none());
        assert!(report.quality.is_none());
        assert!(report.support.is_empty());
    }
}
