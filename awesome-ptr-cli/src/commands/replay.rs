use crate::config::Config;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use awesome_ptr_core::sim::{Recorded, SimHost};
use awesome_ptr_core::PullToRefreshConfig;
use serde::Deserialize;
use std::path::Path;
use tabled::Tabled;

/// A recorded interaction: optional configuration and the host events
#[derive(Debug, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub config: Option<PullToRefreshConfig>,
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TraceEvent {
    #[serde(rename_all = "camelCase")]
    Mount {
        #[serde(default)]
        is_refreshing: bool,
    },
    TouchStart {
        y: f64,
    },
    /// `top` and `scrollY` update the simulated layout before the move
    #[serde(rename_all = "camelCase")]
    TouchMove {
        y: f64,
        #[serde(default)]
        top: Option<f64>,
        #[serde(default)]
        scroll_y: Option<f64>,
    },
    TouchEnd,
    Refreshing {
        value: bool,
    },
    Disabled {
        value: bool,
    },
    Advance {
        ms: u64,
    },
    Settle,
}

#[derive(Tabled)]
struct EffectRow {
    at: String,
    effect: String,
}

impl From<&Recorded> for EffectRow {
    fn from(r: &Recorded) -> Self {
        Self {
            at: output::format_ms(r.at_ms),
            effect: r.effect.to_string(),
        }
    }
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed trace")
    }

    /// Run every event through a simulated host. A trace that does not
    /// start with `mount` is mounted idle first.
    pub fn run(&self, fallback: &PullToRefreshConfig) -> Result<SimHost> {
        let config = self.config.clone().unwrap_or_else(|| fallback.clone());
        let mut host = SimHost::new(config).context("trace configuration rejected")?;

        if !matches!(self.events.first(), Some(TraceEvent::Mount { .. })) {
            host.mount(false);
        }

        for event in &self.events {
            tracing::trace!(?event, at_ms = host.now_ms(), "replaying");
            match *event {
                TraceEvent::Mount { is_refreshing } => host.mount(is_refreshing),
                TraceEvent::TouchStart { y } => host.touch_start(y),
                TraceEvent::TouchMove { y, top, scroll_y } => {
                    if let Some(top) = top {
                        host.surface.target_top = Some(top);
                    }
                    if let Some(scroll_y) = scroll_y {
                        host.surface.scroll_y = scroll_y;
                    }
                    host.touch_move(y);
                }
                TraceEvent::TouchEnd => host.touch_end(),
                TraceEvent::Refreshing { value } => host.set_refreshing(value),
                TraceEvent::Disabled { value } => host.set_disabled(value),
                TraceEvent::Advance { ms } => host.advance(ms),
                TraceEvent::Settle => host.settle(),
            }
        }

        Ok(host)
    }
}

pub fn handle_replay_command(
    file: &Path,
    callbacks_only: bool,
    config: &Config,
    output_format: &str,
) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read trace {}", file.display()))?;
    let trace = Trace::from_json(&json)?;
    let host = trace.run(&config.pull)?;

    let records: Vec<&Recorded> = host
        .log()
        .iter()
        .filter(|r| !callbacks_only || r.effect.is_callback())
        .collect();

    let format = OutputFormat::from_str(output_format);
    let rows: Vec<EffectRow> = records.iter().map(|r| EffectRow::from(*r)).collect();
    output::print_output(rows, &records, format)?;

    if format == OutputFormat::Table {
        output::print_info(&format!(
            "{} events replayed, final state '{}' at {}",
            trace.events.len(),
            host.state(),
            output::format_ms(host.now_ms())
        ));
        if host.pending_timers() > 0 {
            output::print_warning(&format!("{} timers still pending", host.pending_timers()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use awesome_ptr_core::{Effect, PullState};

    const TRACE: &str = r#"{
        "config": { "tension": 1.0, "completeDelayMs": 200 },
        "events": [
            { "type": "touchStart", "y": 100 },
            { "type": "touchMove", "y": 150 },
            { "type": "touchMove", "y": 190 },
            { "type": "touchEnd" },
            { "type": "refreshing", "value": true },
            { "type": "advance", "ms": 1000 },
            { "type": "refreshing", "value": false },
            { "type": "settle" }
        ]
    }"#;

    #[test]
    fn test_parse_trace_events() {
        let trace = Trace::from_json(TRACE).unwrap();
        assert_eq!(trace.events.len(), 8);
        assert_eq!(trace.events[0], TraceEvent::TouchStart { y: 100.0 });
        assert_eq!(trace.events[7], TraceEvent::Settle);
        assert_eq!(trace.config.unwrap().complete_delay_ms, 200);
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let trace = Trace::from_json(
            r#"{ "events": [
                { "type": "mount", "isRefreshing": true },
                { "type": "touchMove", "y": 10, "top": 4, "scrollY": 2.5 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(trace.events[0], TraceEvent::Mount { is_refreshing: true });
        assert_eq!(
            trace.events[1],
            TraceEvent::TouchMove {
                y: 10.0,
                top: Some(4.0),
                scroll_y: Some(2.5)
            }
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(Trace::from_json(r#"{ "events": [ { "type": "wiggle" } ] }"#).is_err());
    }

    #[test]
    fn test_replay_full_cycle() {
        let trace = Trace::from_json(TRACE).unwrap();
        let host = trace.run(&PullToRefreshConfig::default()).unwrap();

        assert_eq!(host.state(), PullState::Idle);
        assert_eq!(host.count(&Effect::Refresh), 1);
        assert_eq!(host.state_at(PullState::Complete), Some(1_000));
        assert_eq!(host.state_at(PullState::Refreshing), Some(0));
        assert_eq!(host.pulls(), vec![50.0 / 80.0, 1.0]);
    }

    #[test]
    fn test_implicit_mount() {
        let trace = Trace::from_json(r#"{ "events": [ { "type": "settle" } ] }"#).unwrap();
        let host = trace.run(&PullToRefreshConfig::default()).unwrap();
        assert_eq!(host.states(), vec![PullState::Idle]);
    }

    #[test]
    fn test_invalid_trace_config_is_an_error() {
        let trace =
            Trace::from_json(r#"{ "config": { "triggerHeight": 0 }, "events": [] }"#).unwrap();
        assert!(trace.run(&PullToRefreshConfig::default()).is_err());
    }
}
