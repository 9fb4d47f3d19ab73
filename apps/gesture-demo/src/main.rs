mod trace;

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tactile_core::{Clock, ManualClock};
use tactile_foundation::{
    GestureEngine, GestureEvent, GestureProvider, HoldOptions, MoveGuardRegistration,
};
use trace::{parse_trace, TraceEntry, DEFAULT_TRACE};

const FRAME_MILLIS: u64 = 16;
/// Frames keep running this long after the last entry so pending work settles.
const SETTLE_MILLIS: u64 = 1_000;

struct Replay {
    engine: GestureEngine,
    clock: ManualClock,
    next_frame: u64,
    guards: Vec<MoveGuardRegistration>,
}

impl Replay {
    fn new() -> Result<Self> {
        let clock = ManualClock::new();
        let engine = GestureProvider::new()
            .with_hold(HoldOptions::new(500, 8.0))
            .with_clock(Rc::new(clock.clone()))
            .build()
            .context("building gesture engine")?;

        Ok(Self {
            engine,
            clock,
            next_frame: FRAME_MILLIS,
            guards: Vec::new(),
        })
    }

    /// Runs every display frame due up to `time_ms`, then moves the clock there.
    fn run_until(&mut self, time_ms: u64) {
        while self.next_frame <= time_ms {
            self.clock.set(self.next_frame);
            self.engine.frame_clock().drain_frame(self.next_frame);
            self.next_frame += FRAME_MILLIS;
        }
        self.clock.set(time_ms.max(self.clock.now_millis()));
    }

    fn apply(&mut self, entry: &TraceEntry) {
        match entry {
            TraceEntry::Register { target, gestures } => {
                let guard = self.engine.register(*target, gestures);
                if guard.is_active() {
                    log::info!("target {target}: move prevention armed for {gestures:?}");
                    self.guards.push(guard);
                } else {
                    log::warn!("target {target}: none of {gestures:?} reacts to moves");
                }
            }
            TraceEntry::Input { time_ms, .. } => {
                self.run_until(*time_ms);
                let Some(event) = entry.to_event() else {
                    return;
                };
                let disposition = self.engine.handle_event(&event);
                log::debug!(
                    "{time_ms:>6}ms {:<12} target {} -> {disposition:?}",
                    event.event_type.name(),
                    event.target
                );
                if event.is_default_prevented() {
                    log::info!(
                        "{time_ms:>6}ms {} on target {}: default prevented",
                        event.event_type,
                        event.target
                    );
                }
            }
        }
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading trace {path}"))?
        }
        None => DEFAULT_TRACE.to_owned(),
    };
    let entries = parse_trace(&text)?;

    let mut replay = Replay::new()?;
    let summary = Rc::new(RefCell::new(BTreeMap::<&'static str, usize>::new()));
    {
        let clock = replay.clock.clone();
        let summary = Rc::clone(&summary);
        replay
            .engine
            .dispatcher()
            .subscribe(move |event: &GestureEvent| {
                log::info!(
                    "{:>6}ms {:<10} target {} at ({:.0}, {:.0})",
                    clock.now_millis(),
                    event.kind.name(),
                    event.target,
                    event.position.x,
                    event.position.y
                );
                *summary.borrow_mut().entry(event.kind.name()).or_default() += 1;
            });
    }

    for entry in &entries {
        replay.apply(entry);
    }
    let end = replay.clock.now_millis() + SETTLE_MILLIS;
    replay.run_until(end);

    log::info!(
        "replayed {} trace entries with {} move guard(s) armed",
        entries.len(),
        replay.guards.len()
    );
    for (kind, count) in summary.borrow().iter() {
        log::info!("  {kind:<10} x{count}");
    }
    Ok(())
}
