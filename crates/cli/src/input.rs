//! Loading labeled vector lists from CSV, Parquet or JSON files.
//!
//! Columns / fields: `x`, `y`, optional `z` (default 0), optional `name` and
//! `color`. Name and color are display metadata only; they are carried to the
//! output untouched and never reach the geometry routines.

use anyhow::{bail, Context, Result};
use nalgebra::Vector3;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One vector as the host knows it: components plus display identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl VectorRecord {
    pub fn components(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// JSON accepts bare `[x, y, z]` triples and full records in the same array.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonVector {
    Triple([f64; 3]),
    Record(VectorRecord),
}

impl From<JsonVector> for VectorRecord {
    fn from(v: JsonVector) -> Self {
        match v {
            JsonVector::Triple([x, y, z]) => VectorRecord {
                name: None,
                color: None,
                x,
                y,
                z,
            },
            JsonVector::Record(r) => r,
        }
    }
}

pub fn load_vectors(path: &Path) -> Result<Vec<VectorRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => {
            let df = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            records_from_frame(&df)
        }
        Some("parquet") => {
            let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            records_from_frame(&df)
        }
        Some("json") => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            parse_json_vectors(&bytes).with_context(|| format!("decoding {}", path.display()))
        }
        _ => bail!(
            "unsupported vector file {} (expected .csv, .parquet or .json)",
            path.display()
        ),
    }
}

pub fn parse_json_vectors(bytes: &[u8]) -> Result<Vec<VectorRecord>> {
    let raw: Vec<JsonVector> = serde_json::from_slice(bytes)?;
    Ok(raw.into_iter().map(VectorRecord::from).collect())
}

fn records_from_frame(df: &DataFrame) -> Result<Vec<VectorRecord>> {
    let xs = float_column(df, "x")?;
    let ys = float_column(df, "y")?;
    let zs = if df.column("z").is_ok() {
        float_column(df, "z")?
    } else {
        vec![0.0; df.height()]
    };
    let names = text_column(df, "name")?;
    let colors = text_column(df, "color")?;

    Ok((0..df.height())
        .map(|i| VectorRecord {
            name: names.as_ref().and_then(|c| c[i].clone()),
            color: colors.as_ref().and_then(|c| c[i].clone()),
            x: xs[i],
            y: ys[i],
            z: zs[i],
        })
        .collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column '{name}'"))?
        .cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("row {row}: empty '{name}'")))
        .collect()
}

fn text_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    if df.column(name).is_err() {
        return Ok(None);
    }
    let series = df.column(name)?.cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(Some(values))
}
