use crate::config::Config;
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use awesome_ptr_core::projector::project;
use awesome_ptr_core::tension::damped_height;
use awesome_ptr_core::PullToRefreshConfig;
use serde::Serialize;
use tabled::Tabled;

/// Most rows a single curve may produce
pub const MAX_CURVE_ROWS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub raw: f64,
    pub height: f64,
    pub progress: f64,
    pub trigger_ready: bool,
}

#[derive(Tabled)]
struct CurveRow {
    raw: String,
    height: String,
    progress: String,
    ready: String,
}

impl From<&CurvePoint> for CurveRow {
    fn from(p: &CurvePoint) -> Self {
        Self {
            raw: format!("{:.1}", p.raw),
            height: format!("{:.2}", p.height),
            progress: format!("{:.3}", p.progress),
            ready: if p.trigger_ready { "yes".into() } else { "".into() },
        }
    }
}

/// Sample the damped drag curve from `step` to `max`. Samples the core
/// would drop (non-positive heights) are skipped.
pub fn sample_curve(config: &PullToRefreshConfig, max: f64, step: f64) -> Result<Vec<CurvePoint>> {
    if !(step > 0.0 && step.is_finite()) {
        bail!("step must be a positive number, got {}", step);
    }
    if !max.is_finite() {
        bail!("max must be finite");
    }
    let rows = (max / step).floor();
    if rows > f64::from(MAX_CURVE_ROWS) {
        bail!(
            "max {} with step {} gives {} rows, at most {} are allowed",
            max,
            step,
            rows,
            MAX_CURVE_ROWS
        );
    }

    let mut points = Vec::new();
    for index in 1..=MAX_CURVE_ROWS {
        let raw = step * f64::from(index);
        if raw > max {
            break;
        }
        if let Some(height) = damped_height(raw, config.tension) {
            let projection = project(height, config);
            points.push(CurvePoint {
                raw,
                height,
                progress: projection.progress,
                trigger_ready: projection.trigger_ready,
            });
        }
    }
    Ok(points)
}

pub fn handle_curve_command(
    exponent: Option<f64>,
    max: f64,
    step: f64,
    config: &Config,
    output_format: &str,
) -> Result<()> {
    let mut pull = config.pull.clone();
    if let Some(exponent) = exponent {
        pull.tension = exponent;
    }
    pull.validate()?;

    let points = sample_curve(&pull, max, step)?;
    let format = OutputFormat::from_str(output_format);
    let rows: Vec<CurveRow> = points.iter().map(CurveRow::from).collect();
    output::print_output(rows, &points, format)?;

    if format == OutputFormat::Table {
        match points.iter().find(|p| p.trigger_ready) {
            Some(p) => output::print_info(&format!(
                "trigger height {} reached at {:.1}px of drag (tension {})",
                pull.trigger_height, p.raw, pull.tension
            )),
            None => output::print_warning(&format!(
                "trigger height {} not reached within {}px",
                pull.trigger_height, max
            )),
        }
    }

    Ok(())
}
