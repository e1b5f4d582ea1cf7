use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use super::{AttemptService, SubmitOutcome, TickOutcome};

/// Drives the countdown with one tick per second. The task reads the
/// session through its service handle on every tick, so there is no
/// state to go stale, and it exits as soon as the session stops
/// accepting ticks.
pub fn start(service: AttemptService) {
    tokio::task::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of an interval completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match service.tick().await {
                TickOutcome::Running { remaining_seconds: 60 } => {
                    attempt_print!("One minute remaining.");
                }
                TickOutcome::Running { .. } => {}
                TickOutcome::Expired(outcome) => {
                    match outcome {
                        SubmitOutcome::Completed => {
                            attempt_print!("Time is up. Your attempt was submitted automatically. Use `review` to see the results.");
                        }
                        SubmitOutcome::Failed(message) => {
                            attempt_print!("Time is up, but submitting the attempt failed: {}\nUse `submit` to try again.", message);
                        }
                        _ => attempt_print!("Time is up."),
                    }
                    break;
                }
                TickOutcome::Stop => break,
            }
        }
        debug!("countdown stopped");
    });
}
