//! Loading point sets from files: the dense text format, CSV (via Polars), or Parquet.

use anyhow::{bail, Context, Result};
use miniball::api::{read_points, ArrayPointSet};
use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Dispatch on the file extension; anything that is not `.csv`/`.parquet` is read as the
/// dense text format (`N D` header, then one point per line).
pub fn load_points(path: &Path) -> Result<ArrayPointSet> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()
                .and_then(|lf| lf.collect())
                .with_context(|| format!("reading csv {}", path.display()))?;
            frame_to_points(&df)
        }
        Some("parquet") => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let df = ParquetReader::new(file)
                .finish()
                .with_context(|| format!("reading parquet {}", path.display()))?;
            frame_to_points(&df)
        }
        _ => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_points(BufReader::new(file))
                .with_context(|| format!("parsing points from {}", path.display()))
        }
    }
}

/// Every column is one coordinate, every row one point. Columns must be numeric and
/// free of nulls.
pub fn frame_to_points(df: &DataFrame) -> Result<ArrayPointSet> {
    let (n, d) = df.shape();
    let mut pts = ArrayPointSet::new(d, n);
    for (j, series) in df.get_columns().iter().enumerate() {
        let cast = series
            .cast(&DataType::Float64)
            .with_context(|| format!("column `{}` is not numeric", series.name()))?;
        for (i, value) in cast.f64()?.into_iter().enumerate() {
            match value {
                Some(x) if x.is_finite() => pts.set(i, j, x),
                Some(x) => bail!("column `{}`, row {i}: {x} is not finite", series.name()),
                None => bail!("column `{}`, row {i}: missing value", series.name()),
            }
        }
    }
    tracing::info!(points = n, dimension = d, "loaded table");
    Ok(pts)
}
