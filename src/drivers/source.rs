#[cfg(test)]
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::time::Duration;
use serialport::SerialPort;
use crate::drivers::AcquireError;
#[cfg(test)]
use crate::drivers::StopToken;
/// Trait representing something that yields text lines on demand.
///
/// `Ok(None)` means no complete line arrived before the read timeout.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>, AcquireError>;
}
/// Serial connection opened for one capture session. The port closes when
/// this value is dropped.
pub struct SerialLineSource<R = Box<dyn SerialPort>> {
    port_name: String,
    reader: BufReader<R>,
    pending: Vec<u8>,
}
impl SerialLineSource {
    pub fn open(port_name: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self, AcquireError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|source| AcquireError::Open {
                port: port_name.to_string(),
                source,
            })?;
        Ok(Self::from_reader(port_name, port))
    }
}
impl<R: Read> SerialLineSource<R> {
    /// Reads lines from any byte stream whose reads time out like a serial port.
    pub fn from_reader(port_name: &str, reader: R) -> Self {
        Self {
            port_name: port_name.to_string(),
            reader: BufReader::new(reader),
            pending: Vec::new(),
        }
    }
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}
impl<R: Read> LineSource for SerialLineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, AcquireError> {
        // Bytes read before a timeout stay in `pending` and are completed on the next call.
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(None),
            Ok(_) => {
                let line = decode_line(&self.pending);
                self.pending.clear();
                Ok(Some(line))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(AcquireError::Io(e)),
        }
    }
}
impl<R> Drop for SerialLineSource<R> {
    fn drop(&mut self) {
        log::debug!("closing serial port {}", self.port_name);
    }
}
/// Decodes raw line bytes, dropping invalid UTF-8 and surrounding whitespace.
pub fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect::<String>()
        .trim()
        .to_string()
}
#[cfg(test)]
enum Scripted {
    Line(String),
    Timeout,
    Fail(ErrorKind),
}
/// In-memory source for deterministic playback in tests.
#[cfg(test)]
pub struct ManualSource {
    queue: VecDeque<Scripted>,
    stop_when_drained: Option<StopToken>,
}
#[cfg(test)]
impl ManualSource {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            queue: lines.into_iter().map(|l| Scripted::Line(l.into())).collect(),
            stop_when_drained: None,
        }
    }
    pub fn then_timeout(mut self) -> Self {
        self.queue.push_back(Scripted::Timeout);
        self
    }
    pub fn then_line(mut self, line: impl Into<String>) -> Self {
        self.queue.push_back(Scripted::Line(line.into()));
        self
    }
    pub fn then_fail(mut self, kind: ErrorKind) -> Self {
        self.queue.push_back(Scripted::Fail(kind));
        self
    }
    /// Trips `token` once every scripted event has been consumed, the way a
    /// user pressing Ctrl+C would.
    pub fn stop_when_drained(mut self, token: StopToken) -> Self {
        self.stop_when_drained = Some(token);
        self
    }
}
#[cfg(test)]
impl LineSource for ManualSource {
    fn next_line(&mut self) -> Result<Option<String>, AcquireError> {
        let next = self.queue.pop_front();
        if self.queue.is_empty() {
            if let Some(token) = &self.stop_when_drained {
                token.stop();
            }
        }
        match next {
            Some(Scripted::Line(line)) => Ok(Some(decode_line(line.as_bytes()))),
            Some(Scripted::Timeout) | None => Ok(None),
            Some(Scripted::Fail(kind)) => Err(AcquireError::Io(kind.into())),
        }
    }
}
