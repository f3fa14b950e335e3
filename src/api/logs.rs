/// Server-sent run log stream
///
/// GET /api/runs/{run_id}/logs
///
/// Relays step-progress lines for one run as a server-sent event stream. The
/// stream is a finite lazy sequence driven by an interval timer: one line per
/// second, a fixed number of lines, then a clean end. An early consumer
/// disconnect drops the stream, which releases the timer - the explicit
/// cancellation hook lives in the Drop impl.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::extract::Path;
use axum::response::sse::{Event, Sse};
use futures::Stream;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Lines emitted before the stream ends
const LOG_LINE_COUNT: u32 = 5;

/// Pause between consecutive lines
const LOG_LINE_PERIOD: Duration = Duration::from_secs(1);

/// Finite timer-driven stream of step-progress events for one run
pub struct RunLogStream {
    run_id: String,
    emitted: u32,
    ticker: Interval,
}

impl RunLogStream {
    pub fn new(run_id: String) -> Self {
        // First line after one full period, not immediately.
        let mut ticker = interval_at(Instant::now() + LOG_LINE_PERIOD, LOG_LINE_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            run_id,
            emitted: 0,
            ticker,
        }
    }
}

impl Stream for RunLogStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.emitted >= LOG_LINE_COUNT {
            return Poll::Ready(None);
        }

        match this.ticker.poll_tick(cx) {
            Poll::Ready(_) => {
                this.emitted += 1;
                let line = format!("Step {} completed for run {}", this.emitted, this.run_id);
                Poll::Ready(Some(Ok(Event::default().data(line))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for RunLogStream {
    fn drop(&mut self) {
        // Dropping the interval stops the timer; log early disconnects.
        if self.emitted < LOG_LINE_COUNT {
            tracing::debug!(
                "🔌 Log stream for run {} closed after {} lines, timer released",
                self.run_id,
                self.emitted
            );
        }
    }
}

/// Stream step-progress lines for one run
pub async fn stream_run_logs(Path(run_id): Path<String>) -> Sse<RunLogStream> {
    tracing::info!("📡 Opening log stream for run: {}", run_id);
    Sse::new(RunLogStream::new(run_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn stream_emits_fixed_line_count_then_ends() {
        let mut stream = RunLogStream::new("run-1".to_string());

        let mut lines = 0;
        while let Some(event) = stream.next().await {
            assert!(event.is_ok());
            lines += 1;
        }

        assert_eq!(lines, LOG_LINE_COUNT);
    }

    #[tokio::test(start_paused = true)]
    async fn lines_are_spaced_by_the_timer_period() {
        let mut stream = RunLogStream::new("run-2".to_string());

        let started = Instant::now();
        stream.next().await.unwrap().unwrap();
        assert_eq!(started.elapsed(), LOG_LINE_PERIOD);

        stream.next().await.unwrap().unwrap();
        assert_eq!(started.elapsed(), LOG_LINE_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn early_drop_is_clean() {
        let mut stream = RunLogStream::new("run-3".to_string());
        stream.next().await.unwrap().unwrap();
        drop(stream); // releases the interval without emitting the rest
    }
}
