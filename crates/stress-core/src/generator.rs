//! Statement generator task.

use crate::selector::WeightedChoice;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Spawn the generator task feeding the bounded statement queue.
///
/// Each iteration draws one statement and attempts a non-blocking enqueue.
/// When the queue is full the drawn statement is dropped and the task parks
/// until capacity frees up (drawing is cheap relative to execution, so
/// falling behind is fine; parking replaces the busy re-check). The task
/// exits promptly on cancellation or once the consumer side is gone, without
/// draining the queue.
pub fn spawn_generator(
    mut selector: WeightedChoice,
    tx: mpsc::Sender<String>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if token.is_cancelled() {
                break;
            }
            let statement = selector.draw().to_string();
            match tx.try_send(statement) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    debug!("statement queue full, dropping draw");
                    tokio::select! {
                        _ = token.cancelled() => break,
                        permit = tx.reserve() => match permit {
                            Ok(permit) => permit.send(selector.draw().to_string()),
                            Err(_) => break,
                        },
                    }
                }
                Err(TrySendError::Closed(_)) => break,
            }
        }
        debug!("statement generator stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fixed_selector() -> WeightedChoice {
        WeightedChoice::load(vec![("select 1".to_string(), 1)]).unwrap()
    }

    #[tokio::test]
    async fn fills_queue_and_keeps_producing() {
        let (tx, mut rx) = mpsc::channel(4);
        let token = CancellationToken::new();
        let handle = spawn_generator(fixed_selector(), tx, token.clone());

        // Far more receives than the queue holds; the generator must refill.
        for _ in 0..32 {
            let stmt = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("generator stalled")
                .expect("generator closed the queue");
            assert_eq!(stmt, "select 1");
        }

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("generator did not stop on cancellation")
            .unwrap();
    }

    #[tokio::test]
    async fn exits_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(2);
        let token = CancellationToken::new();
        let handle = spawn_generator(fixed_selector(), tx, token);
        drop(rx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("generator did not notice closed queue")
            .unwrap();
    }

    #[tokio::test]
    async fn exits_on_cancellation_without_draining() {
        let (tx, rx) = mpsc::channel(2);
        let token = CancellationToken::new();
        let handle = spawn_generator(fixed_selector(), tx, token.clone());

        // Let it fill the queue, then cancel while it is parked on a full queue.
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("generator did not stop on cancellation")
            .unwrap();
        drop(rx);
    }
}
