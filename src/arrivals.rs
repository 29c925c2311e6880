extern crate chrono;

use crate::result;

use chrono::{DateTime, Duration, FixedOffset, Utc};

// Soonest-slot ETAs above this are flagged as delayed.
pub const DELAY_THRESHOLD_MINUTES: i64 = 12;

// The feed's arrival_time wall clock runs five hours behind UTC. We strip the
// feed's own offset and shift our clock by the same fixed amount, rather than
// doing a real timezone conversion. Deliberately preserved as-is; see
// DESIGN.md before touching.
pub const FEED_CLOCK_OFFSET_HOURS: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalView {
    pub minutes: Option<i64>,
    pub stopped: bool,
    pub delayed: bool,
}

impl ArrivalView {
    /// Text for the board slot, or None for a stopped record (the stopped
    /// style signal carries that state instead).
    pub fn display_text(&self) -> Option<String> {
        match self.minutes {
            None => {
                return None;
            },
            Some(minutes) if minutes > 0 => {
                return Some(format!(" {} minutes", minutes));
            },
            Some(_) => {
                return Some(" Arriving".to_string());
            },
        }
    }
}

/// Reinterprets the feed timestamp's wall-clock digits as UTC: the trailing
/// 6-character offset is discarded and replaced with a literal "+00:00".
pub fn parse_arrival_time(raw: &str) -> result::GreendashResult<DateTime<FixedOffset>> {
    let wall_clock = raw.get(..raw.len().saturating_sub(6))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| result::make_error(&format!(
            "arrival_time too short to carry an offset: '{}'", raw)))?;

    return Ok(DateTime::parse_from_rfc3339(&format!("{}+00:00", wall_clock))?);
}

/// Classifies one prediction record. Pure function of its inputs; `slot` is 0
/// for the station's soonest record.
pub fn classify(status: &str, arrival_time: &str, slot: usize, now: DateTime<Utc>) -> result::GreendashResult<ArrivalView> {
    if !status.is_empty() {
        return Ok(ArrivalView{
            minutes: None,
            stopped: true,
            delayed: false,
        });
    }

    let arrival = parse_arrival_time(arrival_time)?;
    let reference_now = now - Duration::hours(FEED_CLOCK_OFFSET_HOURS);
    let delta = arrival.with_timezone(&Utc) - reference_now;
    // Floor division so a vehicle 30 seconds out already reads as "Arriving".
    let minutes = delta.num_seconds().div_euclid(60);

    return Ok(ArrivalView{
        minutes: Some(minutes),
        stopped: false,
        delayed: slot == 0 && minutes > DELAY_THRESHOLD_MINUTES,
    });
}
