use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use graphcalc::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod report;

use provenance::Payload;
use report::{CurveReport, VectorReport};

#[derive(Parser)]
#[command(name = "graphcalc")]
#[command(about = "Evaluate and sample formulas, and summarize vector paths")]
struct Cmd {
    /// Log at debug level (logs go to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate a formula at a single x
    Eval {
        #[arg(long)]
        expr: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
    },
    /// Sample a formula over a domain and emit the point series as JSON
    Sample {
        #[arg(long)]
        expr: String,
        #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
        x_min: f64,
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        x_max: f64,
        #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
        step: f64,
        #[arg(long, value_enum, default_value_t = PolicyArg::Zero)]
        policy: PolicyArg,
        #[arg(long, default_value_t = graphcalc::cfg::DEFAULT_MAX_POINTS)]
        max_points: usize,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Resultant, head-to-tail segments and enclosed area of a vector list
    Vectors {
        /// .csv / .parquet (columns x,y[,z][,name][,color]) or .json
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Cartesian to polar (degrees)
    Polar {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Polar (degrees) to Cartesian
    Cartesian {
        #[arg(long, allow_negative_numbers = true)]
        r: f64,
        #[arg(long, allow_negative_numbers = true)]
        theta: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Command-line spelling of `DegeneratePolicy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Snap non-finite samples to y = 0
    Zero,
    /// Drop non-finite samples
    Skip,
    /// Keep them (emitted as null)
    Keep,
}

impl From<PolicyArg> for DegeneratePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Zero => DegeneratePolicy::ZeroFill,
            PolicyArg::Skip => DegeneratePolicy::Skip,
            PolicyArg::Keep => DegeneratePolicy::Keep,
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cmd.action {
        Action::Eval { expr, x } => eval(&expr, x),
        Action::Sample {
            expr,
            x_min,
            x_max,
            step,
            policy,
            max_points,
            out,
        } => {
            let domain = Domain::new(x_min, x_max, step);
            let cfg = SampleCfg {
                policy: policy.into(),
                max_points,
            };
            sample_cmd(&expr, domain, cfg, out.as_deref())
        }
        Action::Vectors { input, out } => vectors(&input, out.as_deref()),
        Action::Polar { x, y } => {
            let p = to_polar(x, y);
            print_json(&json!({ "r": p.r, "theta_deg": p.theta_deg }))
        }
        Action::Cartesian { r, theta } => {
            let v = from_polar(r, theta);
            print_json(&json!({ "x": v.x, "y": v.y }))
        }
        Action::Report => print_json(&provenance::header()),
    }
}

fn eval(text: &str, x: f64) -> Result<()> {
    let expr = parse(text).with_context(|| format!("parsing {text:?}"))?;
    let y = expr.eval(x);
    tracing::info!(expr = %expr, x, y, "eval");
    println!("{y}");
    Ok(())
}

fn sample_cmd(text: &str, domain: Domain, cfg: SampleCfg, out: Option<&Path>) -> Result<()> {
    tracing::info!(expr = text, ?domain, policy = ?cfg.policy, "sample");
    let expr = parse(text).with_context(|| format!("parsing {text:?}"))?;
    let series = sample_with(&expr, domain, &cfg).context("sampling")?;
    if series.degenerate_count() > 0 {
        tracing::info!(
            degenerate = series.degenerate_count(),
            "non-finite samples handled by policy"
        );
    }
    let rep = CurveReport::new(text, &expr, domain, cfg.policy, series);
    let payload = Payload::new(
        "sample",
        json!({
            "expr": text,
            "x_min": domain.x_min,
            "x_max": domain.x_max,
            "step": domain.step,
            "policy": format!("{:?}", cfg.policy),
        }),
    );
    emit(&rep, out, payload)
}

fn vectors(path: &Path, out: Option<&Path>) -> Result<()> {
    tracing::info!(input = %path.display(), "vectors");
    let records = input::load_vectors(path)?;
    tracing::info!(count = records.len(), "loaded vectors");
    let rep = VectorReport::new(records);
    let payload = Payload::new("vectors", json!({ "count": rep.vectors.len() }))
        .with_input(path.to_string_lossy());
    emit(&rep, out, payload)
}

#[track_caller]
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let Some(out_path) = out else {
        return print_json(value);
    };
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out_path.display()))?;
    let prov = provenance::write_sidecar(out_path, payload)?;
    tracing::info!(out = %out_path.display(), provenance = %prov.display(), "wrote");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
