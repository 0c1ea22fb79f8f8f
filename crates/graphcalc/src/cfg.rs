//! Tolerance and limit defaults (internal).
//!
//! Policy
//! - Fixed constants keep call sites free of tolerance plumbing. Runtime knobs
//!   that hosts actually tune live on `SampleCfg` instead.

/// Longest formula (in characters) the parser accepts.
pub const MAX_INPUT_CHARS: usize = 4096;
/// Deepest nesting of parentheses, calls, negations and `^` chains.
pub const MAX_NESTING: usize = 128;
/// Slack added to `(x_max - x_min) / step` before flooring, so spans that are
/// exact multiples in decimal (e.g. `20 / 0.1`) keep their final sample.
pub const STEP_SLACK: f64 = 1e-9;
/// Default cap on the number of points in one sample series.
pub const DEFAULT_MAX_POINTS: usize = 1_000_000;
/// Max-abs tolerance for resultant vs. last segment head.
pub const RESULTANT_EPS: f64 = 1e-9;
