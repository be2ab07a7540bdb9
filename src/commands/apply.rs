//! Apply command handler
//!
//! Replays lifecycle events reported by the host package manager. Each
//! non-blank input line is one JSON event; the whole stream is parsed before
//! anything runs. Installs still deferred when the stream ends are flushed as
//! if a `commit` event had arrived.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::debug;

use asset_manager::application::LifecycleEvent;

use super::context::Context;
use super::output::report_outcomes;

pub fn cmd_apply(ctx: &Context, events: &Path) -> Result<()> {
    let input = if events == Path::new("-") {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read events from stdin")?;
        input
    } else {
        fs::read_to_string(events)
            .with_context(|| format!("failed to read events from {}", events.display()))?
    };
    let events = parse_events(&input)?;

    let loaded = ctx.settings()?;
    let mut orchestrator = ctx.orchestrator(&loaded);

    let mut outcomes = Vec::new();
    for event in events {
        outcomes.extend(orchestrator.handle(event));
    }
    if orchestrator.pending() > 0 {
        debug!(
            pending = orchestrator.pending(),
            "event stream ended without commit"
        );
        outcomes.extend(orchestrator.flush());
    }

    report_outcomes(&outcomes, ctx.json, ctx.verbose)
}

fn parse_events(input: &str) -> Result<Vec<LifecycleEvent>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("invalid lifecycle event on line {}", index + 1))
        })
        .collect()
}
