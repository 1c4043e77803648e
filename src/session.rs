//! Interactive console session composing the line reader with timers.
//!
//! Greets the user, echoes every line as it completes, keeps a
//! session-owned line count, reports the count on a periodic tick, and
//! nudges after a stretch of silence. All events — arriving chunks, ticks,
//! the idle timer — are handled one at a time on the current task; nothing
//! here needs a second thread.

use crate::reader::LineReader;
use bytes::BytesMut;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{self, Instant};
use tracing::debug;

/// Read buffer size for console chunks.
const READ_BUFFER_SIZE: usize = 4 * 1024;

/// Session timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Interval between tick reports.
    pub tick_interval: Duration,
    /// Silence window before nudging the user.
    pub idle_window: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3),
            idle_window: Duration::from_millis(3500),
        }
    }
}

/// Final counts for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Lines read before end of input (including a final partial line).
    pub lines: u64,
    /// Ticks that fired.
    pub ticks: u64,
    /// Idle nudges that fired.
    pub nudges: u64,
}

/// Run a session over `source` until end of input.
///
/// The line counter lives in the session, shared between the line callback
/// and the tick report; the reader itself carries no counting state.
pub async fn run<R>(mut source: R, options: SessionOptions) -> std::io::Result<SessionReport>
where
    R: AsyncRead + Unpin,
{
    let line_count = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&line_count);
    let mut reader = LineReader::new(move |line: &str| {
        counter.set(counter.get() + 1);
        println!("You typed {line:?}.");
    });

    let mut chunk = BytesMut::with_capacity(READ_BUFFER_SIZE);
    let mut ticks = 0u64;
    let mut nudges = 0u64;

    let mut tick = time::interval_at(
        Instant::now() + options.tick_interval,
        options.tick_interval,
    );
    tick.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
    let idle = time::sleep(options.idle_window);
    tokio::pin!(idle);

    println!("Hi, please type and press Enter.");

    loop {
        chunk.clear();
        tokio::select! {
            _ = tick.tick() => {
                ticks += 1;
                println!("Tick {} with {} lines.", ticks, line_count.get());
            }
            _ = &mut idle => {
                nudges += 1;
                println!("Come on, type something, I'm getting bored.");
                idle.as_mut().reset(Instant::now() + options.idle_window);
            }
            read = source.read_buf(&mut chunk) => {
                let n = read?;
                if n == 0 {
                    reader.finish();
                    break;
                }
                reader.push(&chunk);
                idle.as_mut().reset(Instant::now() + options.idle_window);
            }
        }
    }

    println!("End of input.");
    debug!(lines = line_count.get(), ticks, nudges, "session finished");

    Ok(SessionReport {
        lines: line_count.get(),
        ticks,
        nudges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_timers() -> SessionOptions {
        SessionOptions {
            tick_interval: Duration::from_secs(1000),
            idle_window: Duration::from_secs(1000),
        }
    }

    #[tokio::test]
    async fn test_session_counts_lines_and_final_partial() {
        let source = tokio_test::io::Builder::new()
            .read(b"one\ntwo\n")
            .read(b"three")
            .build();

        let report = run(source, quiet_timers()).await.unwrap();

        assert_eq!(
            report,
            SessionReport {
                lines: 3,
                ticks: 0,
                nudges: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_session_empty_input() {
        let source = tokio_test::io::Builder::new().build();

        let report = run(source, quiet_timers()).await.unwrap();

        assert_eq!(report.lines, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ticks_during_silence() {
        let source = tokio_test::io::Builder::new()
            .wait(Duration::from_secs(10))
            .read(b"hello\n")
            .build();
        let options = SessionOptions {
            tick_interval: Duration::from_secs(3),
            idle_window: Duration::from_secs(1000),
        };

        let report = run(source, options).await.unwrap();

        // Ticks at 3s, 6s, 9s before the input lands at 10s.
        assert_eq!(report.ticks, 3);
        assert_eq!(report.lines, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_nudges_until_input_arrives() {
        let source = tokio_test::io::Builder::new()
            .wait(Duration::from_secs(5))
            .read(b"x\n")
            .build();
        let options = SessionOptions {
            tick_interval: Duration::from_secs(1000),
            idle_window: Duration::from_secs(2),
        };

        let report = run(source, options).await.unwrap();

        // Nudges at 2s and 4s; the 5s input resets the idle timer, then
        // end of input follows before it can fire again.
        assert_eq!(report.nudges, 2);
        assert_eq!(report.lines, 1);
        assert_eq!(report.ticks, 0);
    }
}
