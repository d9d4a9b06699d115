use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use log::{debug, error, info};
use crate::drivers::{AcquireError, LinePattern, LineSource, SerialLineSource};
use crate::types::{Sample, SensorKind};
/// Minimum spacing between progress log lines.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
/// Exit status used when Ctrl+C arrives outside a capture (128 + SIGINT).
pub const INTERRUPT_EXIT_STATUS: i32 = 130;
/// What a Ctrl+C should do at the moment it arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// A capture is running: end it and keep the samples.
    StopCapture,
    /// No capture is listening, or it was already asked to stop.
    Exit,
}
#[derive(Debug, Default)]
struct StopState {
    stopped: AtomicBool,
    capturing: AtomicBool,
}
/// Cooperative cancellation flag checked at the top of every read iteration.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<StopState>);
impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }
    #[cfg(test)]
    pub fn stop(&self) {
        self.0.stopped.store(true, Ordering::SeqCst);
    }
    pub fn is_stopped(&self) -> bool {
        self.0.stopped.load(Ordering::SeqCst)
    }
    /// Marks a capture as listening until the returned guard drops.
    fn arm(&self) -> Armed<'_> {
        self.0.capturing.store(true, Ordering::SeqCst);
        Armed(self)
    }
    fn disarm(&self) {
        self.0.capturing.store(false, Ordering::SeqCst);
    }
    /// Handles one Ctrl+C: the first press during a capture stops it, any
    /// other press asks for the process to exit.
    pub fn interrupt(&self) -> Interrupt {
        let capturing = self.0.capturing.load(Ordering::SeqCst);
        if capturing && !self.0.stopped.swap(true, Ordering::SeqCst) {
            Interrupt::StopCapture
        } else {
            Interrupt::Exit
        }
    }
    /// Routes Ctrl+C through [`StopToken::interrupt`]. May be installed once per process.
    pub fn install_ctrlc(&self) -> Result<(), AcquireError> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            if token.interrupt() == Interrupt::Exit {
                std::process::exit(INTERRUPT_EXIT_STATUS);
            }
        })?;
        Ok(())
    }
}
struct Armed<'a>(&'a StopToken);
impl Drop for Armed<'_> {
    fn drop(&mut self) {
        self.0.disarm();
    }
}
/// Why the read loop ended.
#[derive(Debug)]
pub enum SessionEnd {
    Interrupted,
    /// The port failed mid-session; samples gathered before the failure are kept.
    ReadFailed(AcquireError),
}
/// Samples gathered between port open and loop termination.
#[derive(Debug)]
pub struct CaptureSession {
    pub samples: Vec<Sample>,
    pub end: SessionEnd,
}
/// Rate limiter for progress messages.
struct ProgressThrottle {
    interval: Duration,
    last: Instant,
}
impl ProgressThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
    fn ready(&mut self) -> bool {
        if self.last.elapsed() > self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}
/// Reads lines until `stop` is tripped, appending a [`Sample`] for every line
/// that matches `pattern`.
///
/// Lines that do not match are skipped. A read error ends the loop early but
/// still returns what was collected. Ctrl+C only stops the loop while it runs;
/// once this returns, [`StopToken::interrupt`] reports [`Interrupt::Exit`].
pub fn capture<S: LineSource>(
    source: &mut S,
    pattern: &LinePattern,
    kind: SensorKind,
    stop: &StopToken,
    progress_interval: Duration,
) -> CaptureSession {
    let _armed = stop.arm();
    let start = Instant::now();
    let mut progress = ProgressThrottle::new(progress_interval);
    let mut samples: Vec<Sample> = Vec::new();
    let end = loop {
        if stop.is_stopped() {
            info!("Got keyboard interrupt. Exiting...");
            break SessionEnd::Interrupted;
        }
        let line = match source.next_line() {
            Ok(line) => line,
            Err(e) => {
                error!("Serial read failed, ending capture: {e}");
                break SessionEnd::ReadFailed(e);
            }
        };
        let parsed = line.as_deref().and_then(|l| pattern.parse(l));
        match parsed {
            Some(value) => {
                samples.push(Sample {
                    timestamp: start.elapsed().as_secs_f64(),
                    value,
                });
                if kind == SensorKind::Capacitance && progress.ready() {
                    info!(
                        "Read {} samples so far. Last value: {:>8} pF (at {:.1} sec)...",
                        samples.len(),
                        value,
                        start.elapsed().as_secs_f64()
                    );
                }
            }
            None if kind.logs_unmatched() => {
                // Timeouts surface as an empty line, same as a blank report.
                debug!("Received: {}", line.as_deref().unwrap_or(""));
            }
            None => {}
        }
        if kind == SensorKind::Adc && progress.ready() {
            info!(
                "Read {} samples so far ({:.1} sec)...",
                samples.len(),
                start.elapsed().as_secs_f64()
            );
        }
    };
    CaptureSession { samples, end }
}
/// Opens `port_name`, then installs the Ctrl+C handler and captures until the user
/// interrupts. The port is closed before this returns.
pub fn capture_from_port(
    port_name: &str,
    baud_rate: u32,
    read_timeout: Duration,
    kind: SensorKind,
) -> Result<CaptureSession, AcquireError> {
    let mut source = SerialLineSource::open(port_name, baud_rate, read_timeout)?;
    debug!(
        "opened {} at {} baud, read timeout {:?}",
        source.port_name(),
        baud_rate,
        read_timeout
    );
    let stop = StopToken::new();
    stop.install_ctrlc()?;
    info!("Starting reading data. Press Ctrl+C to stop...");
    let pattern = LinePattern::for_sensor(kind);
    Ok(capture(&mut source, pattern, kind, &stop, PROGRESS_INTERVAL))
}
