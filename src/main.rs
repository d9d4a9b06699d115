// src/main.rs
mod cli;
mod drivers;
mod gui;
mod port_select;
mod types;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use cli::Cli;
use drivers::{capture_from_port, render_table_png, transform, PlotStyle, SessionEnd};
use port_select::{select_port, ConsoleChooser, PortChooser, PortEnumerator, SystemPorts};
fn run(cli: &Cli, ports: &dyn PortEnumerator, chooser: &mut dyn PortChooser) -> Result<()> {
    // 1. 选择串口
    let port = match &cli.port {
        Some(port) => port.clone(),
        None => select_port(ports, chooser)?,
    };
    info!("Selected port: {port}");
    // 2. 采集，直到 Ctrl+C
    let session = capture_from_port(&port, cli.baud, cli.read_timeout(), cli.sensor)
        .with_context(|| format!("capture on {port} failed"))?;
    if let SessionEnd::ReadFailed(e) = &session.end {
        warn!("Capture ended early ({e}); plotting the {} samples read so far.", session.samples.len());
    }
    // 3. 后处理
    let table = transform(cli.sensor, &session.samples);
    info!("Done reading {} data: {table}", cli.sensor.label());
    // 4. 绘图
    if let Some(path) = &cli.png {
        match render_table_png(&table, PlotStyle::default()) {
            Ok(png) => {
                std::fs::write(path, png)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Saved charts to {}", path.display());
            }
            Err(e) => error!("Could not render PNG: {e}"),
        }
    }
    if !cli.no_gui {
        gui::render(&table).map_err(|e| anyhow::anyhow!("plot window failed: {e}"))?;
    }
    Ok(())
}
/// Logs how the session ended and returns the process exit status.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => {
            info!("All done.");
            0
        }
        Err(e) => {
            error!("{e:#}. Exiting...");
            1
        }
    }
}
// 入口函数
fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_level()),
    )
    .init();
    info!("serial-plotter v{}", env!("CARGO_PKG_VERSION"));
    let result = run(&cli, &SystemPorts, &mut ConsoleChooser::stdin());
    ExitCode::from(exit_status(&result))
}
#[cfg(test)]
mod tests {
    use super::*;
    use drivers::AcquireError;
    use port_select::SelectError;
    struct NoPorts;
    impl PortEnumerator for NoPorts {
        fn ports(&self) -> Result<Vec<String>, SelectError> {
            Ok(Vec::new())
        }
    }
    struct TwoPorts;
    impl PortEnumerator for TwoPorts {
        fn ports(&self) -> Result<Vec<String>, SelectError> {
            Ok(vec!["COM3".into(), "COM4".into()])
        }
    }
    #[derive(Default)]
    struct Decline {
        asked: usize,
    }
    impl PortChooser for Decline {
        fn choose(&mut self, _options: &[String]) -> Option<String> {
            self.asked += 1;
            None
        }
    }
    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("serial-plotter").chain(args.iter().copied()))
    }
    #[test]
    fn success_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }
    #[test]
    fn no_ports_exits_one_without_prompting() {
        let mut chooser = Decline::default();
        let result = run(&cli(&["--no-gui"]), &NoPorts, &mut chooser);
        let err = result.as_ref().unwrap_err();
        assert!(matches!(err.downcast_ref::<SelectError>(), Some(SelectError::NoPorts)));
        assert_eq!(chooser.asked, 0);
        assert_eq!(exit_status(&result), 1);
    }
    #[test]
    fn declined_prompt_exits_one() {
        let mut chooser = Decline::default();
        let result = run(&cli(&["capacitance", "--no-gui"]), &TwoPorts, &mut chooser);
        assert!(matches!(
            result.as_ref().unwrap_err().downcast_ref::<SelectError>(),
            Some(SelectError::NoneChosen)
        ));
        assert_eq!(chooser.asked, 1);
        assert_eq!(exit_status(&result), 1);
    }
    #[test]
    fn port_that_cannot_open_exits_one() {
        let mut chooser = Decline::default();
        let args = ["--port", "/nonexistent/serial-plotter-tty", "--no-gui"];
        let result = run(&cli(&args), &NoPorts, &mut chooser);
        let err = result.as_ref().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AcquireError>(),
            Some(AcquireError::Open { .. })
        ));
        assert!(format!("{err:#}").contains("/nonexistent/serial-plotter-tty"));
        assert_eq!(chooser.asked, 0);
        assert_eq!(exit_status(&result), 1);
    }
}
