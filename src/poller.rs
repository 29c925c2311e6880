extern crate chrono;

use crate::arrivals;
use crate::mbta;
use crate::result;

use std::sync::mpsc;

pub const STYLE_NORMAL: &str = "color: #303030;";
pub const STYLE_ALERT: &str = "color: #FF4444;";

pub const REFRESH_SECONDS: u32 = 60;

/// One-way updates pushed to whatever is rendering the board. The poller
/// never reads anything back from the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum StationUpdate {
    ArrivalText{ station: usize, slot: usize, text: String },
    StoppedStyle{ station: usize, style: &'static str },
    DelayedStyle{ station: usize, style: &'static str },
    CountdownTick(u32),
}

/// Fetches and classifies all three stations once, emitting updates in
/// station order. A failed fetch or a bad record logs and skips the rest of
/// that station for this cycle, leaving the consumer's previous values stale.
pub fn run_cycle(sender: &mpsc::Sender<StationUpdate>) -> result::GreendashResult<()> {
    return run_cycle_ext(sender, mbta::fetch_predictions, chrono::Utc::now());
}

fn run_cycle_ext(sender: &mpsc::Sender<StationUpdate>,
                 fetch_fn: fn(&mbta::StationEndpoint) -> result::GreendashResult<Vec<mbta::PredictionRecord>>,
                 now: chrono::DateTime<chrono::Utc>) -> result::GreendashResult<()> {
    for (station, endpoint) in mbta::STATIONS.iter().enumerate() {
        let records = match fetch_fn(endpoint) {
            Ok(records) => records,
            Err(err) => {
                error!("{}: fetch failed, display stays stale: {}", endpoint.name, err);
                continue;
            }
        };

        for (slot, record) in records.iter().enumerate() {
            let view = match arrivals::classify(&record.status, &record.arrival_time, slot, now) {
                Ok(view) => view,
                Err(err) => {
                    error!("{}: bad record in slot {}: {}", endpoint.name, slot, err);
                    break;
                }
            };

            if view.stopped {
                sender.send(StationUpdate::StoppedStyle{ station, style: STYLE_ALERT })?;
                continue;
            }

            sender.send(StationUpdate::StoppedStyle{ station, style: STYLE_NORMAL })?;
            if let Some(text) = view.display_text() {
                sender.send(StationUpdate::ArrivalText{ station, slot, text })?;
            }
            if view.minutes.unwrap_or(0) > 0 {
                // Reset first so a recovered delay clears the alert.
                sender.send(StationUpdate::DelayedStyle{ station, style: STYLE_NORMAL })?;
                if view.delayed {
                    sender.send(StationUpdate::DelayedStyle{ station, style: STYLE_ALERT })?;
                }
            }
        }
    }

    return Ok(());
}

/// Ticks out the seconds until the next fetch cycle, 60 down to 1.
pub fn run_countdown(sender: &mpsc::Sender<StationUpdate>) -> result::GreendashResult<()> {
    return run_countdown_ext(sender, real_sleep_fn);
}

fn run_countdown_ext(sender: &mpsc::Sender<StationUpdate>,
                     sleep_fn: fn(std::time::Duration)) -> result::GreendashResult<()> {
    let mut remaining = REFRESH_SECONDS;
    while remaining > 0 {
        sender.send(StationUpdate::CountdownTick(remaining))?;
        remaining -= 1;
        sleep_fn(std::time::Duration::from_secs(1));
    }
    return Ok(());
}

fn real_sleep_fn(duration: std::time::Duration) {
    std::thread::sleep(duration);
}

/// Runs fetch cycles and countdowns until the receiver hangs up.
pub fn run_forever(sender: mpsc::Sender<StationUpdate>) {
    loop {
        if let Err(err) = run_cycle(&sender) {
            info!("Poller stopping: {}", err);
            return;
        }
        if let Err(err) = run_countdown(&sender) {
            info!("Poller stopping: {}", err);
            return;
        }
    }
}
