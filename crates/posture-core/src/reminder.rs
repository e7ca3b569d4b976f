use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const REMINDER_MESSAGE: &str = "Look at something 20 feet away for 20 seconds!";

/// Shortest accepted reminder period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fired once per reminder interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderEvent;

impl ReminderEvent {
    pub fn message(&self) -> &'static str {
        REMINDER_MESSAGE
    }
}

impl fmt::Display for ReminderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eye Reminder: {REMINDER_MESSAGE}")
    }
}

/// Start the eye-rest timer on the current tokio runtime.
///
/// `emit` is called once every `interval`, the first time one full interval
/// after the call. If the task falls behind, the next reminder is pushed back
/// instead of firing a burst of missed ones. The task runs until the runtime
/// shuts down or the handle is aborted; dropping the handle detaches it.
///
/// Use a multi-threaded runtime when the caller blocks (e.g. inside a model
/// call), so the timer keeps its own worker.
pub fn spawn_reminder<F>(interval: Duration, mut emit: F) -> JoinHandle<()>
where
    F: FnMut(ReminderEvent) + Send + 'static,
{
    let period = if interval < MIN_INTERVAL {
        log::warn!("reminder interval {interval:?} too short, using {MIN_INTERVAL:?}");
        MIN_INTERVAL
    } else {
        interval
    };

    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut fired: u64 = 0;
        loop {
            ticker.tick().await;
            fired += 1;
            log::debug!("reminder #{fired} after {period:?}");
            emit(ReminderEvent);
        }
    })
}

/// Default reminder sink: console banner plus an info log line.
pub fn announce(event: ReminderEvent) {
    println!("\n{event}\n");
    log::info!("{event}");
}
