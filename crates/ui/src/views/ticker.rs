use std::time::Duration;

use quizera_core::session::TimerEpoch;

/// Drive one countdown: every `period`, deliver a tick for `epoch` while it is still live.
///
/// `live` is consulted before each delivery, so a countdown whose question
/// was answered, left or timed out stops without sending anything.
pub(crate) async fn run_countdown<L, S>(period: Duration, epoch: TimerEpoch, mut live: L, mut send: S)
where
    L: FnMut(TimerEpoch) -> bool,
    S: FnMut(TimerEpoch),
{
    loop {
        tokio::time::sleep(period).await;
        if !live(epoch) {
            break;
        }
        send(epoch);
    }
}
