// src/port_select.rs
use std::io::{self, BufRead, Write};
use log::info;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(#[from] serialport::Error),
    #[error("No serial ports found")]
    NoPorts,
    #[error("No port selected")]
    NoneChosen,
}
/// Lists the serial ports currently present.
pub trait PortEnumerator {
    fn ports(&self) -> Result<Vec<String>, SelectError>;
}
/// Asks the user to pick one of several ports. `None` means they declined.
pub trait PortChooser {
    fn choose(&mut self, options: &[String]) -> Option<String>;
}
pub struct SystemPorts;
impl PortEnumerator for SystemPorts {
    fn ports(&self) -> Result<Vec<String>, SelectError> {
        Ok(serialport::available_ports()?
            .into_iter()
            .map(|p| p.port_name)
            .collect())
    }
}
/// Numbered menu on stdout, answer read from `input`.
pub struct ConsoleChooser<R> {
    input: R,
}
impl ConsoleChooser<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}
#[cfg(test)]
impl<R: BufRead> ConsoleChooser<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}
impl<R: BufRead> PortChooser for ConsoleChooser<R> {
    fn choose(&mut self, options: &[String]) -> Option<String> {
        println!("Select the serial port:");
        for (i, name) in options.iter().enumerate() {
            println!("  [{}] {}", i + 1, name);
        }
        print!("Port number (empty to cancel): ");
        io::stdout().flush().ok();
        let mut answer = String::new();
        self.input.read_line(&mut answer).ok()?;
        parse_choice(answer.trim(), options)
    }
}
/// Accepts a 1-based index or an exact port name.
fn parse_choice(answer: &str, options: &[String]) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    if let Ok(idx) = answer.parse::<usize>() {
        return idx.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }
    options.iter().find(|o| o.as_str() == answer).cloned()
}
/// Picks the port to capture from: the only one present, or whichever the
/// chooser returns when there are several.
pub fn select_port(
    enumerator: &dyn PortEnumerator,
    chooser: &mut dyn PortChooser,
) -> Result<String, SelectError> {
    let ports = enumerator.ports()?;
    info!("Available ports: {ports:?}");
    match ports.as_slice() {
        [] => Err(SelectError::NoPorts),
        [only] => {
            info!("Only one port found: {only}");
            Ok(only.clone())
        }
        _ => chooser.choose(&ports).ok_or(SelectError::NoneChosen),
    }
}
