//! Plain-text input traces.
//!
//! One entry per line, `#` starts a comment:
//!
//! ```text
//! <time_ms> <event_type> <target> <x> <y>
//! register <target> <gesture> [<gesture> ...]
//! ```
//!
//! Times are milliseconds since the trace started and must not decrease.
//! `register` lines arm move prevention on a target from that point on.

use anyhow::{anyhow, bail, Context, Result};
use tactile_core::Point;
use tactile_foundation::{InputEvent, InputEventType, TargetId, TouchPoint};

#[derive(Clone, Debug, PartialEq)]
pub enum TraceEntry {
    Input {
        time_ms: u64,
        event_type: InputEventType,
        target: TargetId,
        position: Point,
    },
    Register {
        target: TargetId,
        gestures: String,
    },
}

impl TraceEntry {
    /// Builds the native event for an input entry. Touch events carry their
    /// position as a single contact, the way a browser reports them.
    pub fn to_event(&self) -> Option<InputEvent> {
        let TraceEntry::Input {
            event_type,
            target,
            position,
            ..
        } = self
        else {
            return None;
        };

        let event = InputEvent::new(*event_type, *target, *position);
        let contact = [TouchPoint::new(0, *position)];
        Some(match event_type {
            InputEventType::TouchStart | InputEventType::TouchMove => {
                event.with_touches(&contact)
            }
            InputEventType::TouchEnd | InputEventType::TouchCancel => {
                event.with_changed_touches(&contact)
            }
            _ => event,
        })
    }
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>> {
    let mut entries = Vec::new();
    let mut last_time = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let entry = parse_line(line).with_context(|| format!("trace line {}", index + 1))?;
        if let TraceEntry::Input { time_ms, .. } = entry {
            if time_ms < last_time {
                bail!(
                    "trace line {}: time {time_ms}ms is before {last_time}ms",
                    index + 1
                );
            }
            last_time = time_ms;
        }
        entries.push(entry);
    }

    Ok(entries)
}

fn parse_line(line: &str) -> Result<TraceEntry> {
    let mut fields = line.split_whitespace();
    let head = fields.next().ok_or_else(|| anyhow!("empty entry"))?;

    if head == "register" {
        let target = parse_field(fields.next(), "target")?;
        let gestures = fields.collect::<Vec<_>>().join(" ");
        if gestures.is_empty() {
            bail!("register needs at least one gesture name");
        }
        return Ok(TraceEntry::Register { target, gestures });
    }

    let time_ms = head
        .parse::<u64>()
        .with_context(|| format!("invalid time {head:?}"))?;
    let event_type: InputEventType = fields
        .next()
        .ok_or_else(|| anyhow!("missing event type"))?
        .parse()?;
    let target = parse_field(fields.next(), "target")?;
    let x = parse_field(fields.next(), "x")?;
    let y = parse_field(fields.next(), "y")?;
    if let Some(extra) = fields.next() {
        bail!("unexpected field {extra:?}");
    }

    Ok(TraceEntry::Input {
        time_ms,
        event_type,
        target,
        position: Point::new(x, y),
    })
}

fn parse_field<T>(field: Option<&str>, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let field = field.ok_or_else(|| anyhow!("missing {name}"))?;
    field
        .parse()
        .with_context(|| format!("invalid {name} {field:?}"))
}

/// Trace replayed when no file is given: a tap, the emulated mouse sequence a
/// phone fires after it, a horizontal drag, a vertical scroll, a swipe and a
/// long press.
pub const DEFAULT_TRACE: &str = "\
register 2 drag swipe
# tap, then the platform's emulated mouse events
0     touchstart  1  40  40
90    touchend    1  41  40
380   mousedown   1  41  40
390   mouseup     1  41  40
392   click       1  41  40
# horizontal drag on the list
1000  touchstart  2  100 200
1016  touchmove   2  103 201
1032  touchmove   2  112 202
1040  touchmove   2  130 202
1048  touchmove   2  150 203
1064  touchmove   2  175 203
1080  touchend    2  180 203
# vertical scroll on the list
2000  touchstart  2  100 200
2016  touchmove   2  101 209
2032  touchmove   2  102 240
2048  touchmove   2  130 280
2064  touchend    2  130 300
# swipe with the mouse
3000  mousedown   3  300 50
3040  mousemove   3  260 52
3060  mouseup     3  240 52
# long press
4000  pointerdown 4  10  10
4700  pointerup   4  11  10
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trace_parses() {
        let entries = parse_trace(DEFAULT_TRACE).expect("built-in trace is valid");
        assert_eq!(
            entries[0],
            TraceEntry::Register {
                target: 2,
                gestures: "drag swipe".into()
            }
        );
        assert!(entries
            .iter()
            .skip(1)
            .all(|entry| matches!(entry, TraceEntry::Input { .. })));
    }

    #[test]
    fn touch_end_reports_changed_contact() {
        let entries = parse_trace("5 touchend 9 3 4").expect("valid");
        let event = entries[0].to_event().expect("input entry");
        assert!(event.touches.is_empty());
        assert_eq!(event.point(), Point::new(3.0, 4.0));
    }

    #[test]
    fn errors_name_the_line() {
        let error = parse_trace("0 mousedown 1 0 0\n\n5 mousewheel 1 0 0")
            .expect_err("unknown event type");
        assert!(format!("{error:#}").contains("trace line 3"));

        let error = parse_trace("10 mousedown 1 0 0\n5 mouseup 1 0 0").expect_err("time order");
        assert!(error.to_string().contains("before 10ms"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let entries = parse_trace("# header\n\n  0 click 1 2 3 # trailing\n").expect("valid");
        assert_eq!(entries.len(), 1);
    }
}
