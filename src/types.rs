// src/types.rs
use clap::ValueEnum;

/// Over-range reading reported by the capacitance firmware.
pub const CAP_OVER_RANGE_SENTINEL: u64 = 0xFFFF_FFFF - 6;
/// ADC reference voltage and full-scale count (10-bit).
pub const ADC_REF_VOLTS: f64 = 3.3;
pub const ADC_FULL_SCALE: f64 = 1023.0;

// 单个采样点
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Seconds since capture start.
    pub timestamp: f64,
    pub value: u64,
}

// 传感器类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SensorKind {
    /// `ADC Value: <n>` lines, converted to volts.
    Adc,
    /// `REPORT_CAP_pF=<n>` lines, plotted on a log scale.
    Capacitance,
}

impl SensorKind {
    pub fn label(self) -> &'static str {
        match self {
            SensorKind::Adc => "ADC",
            SensorKind::Capacitance => "cap",
        }
    }
    pub fn value_column(self) -> &'static str {
        match self {
            SensorKind::Adc => "adc_value",
            SensorKind::Capacitance => "cap_value",
        }
    }
    pub fn derived_column(self) -> &'static str {
        match self {
            SensorKind::Adc => "adc_voltage",
            SensorKind::Capacitance => "cap_value_log",
        }
    }
    /// Unmatched lines are echoed at debug level only for the capacitance board,
    /// which interleaves status text with its reports.
    pub fn logs_unmatched(self) -> bool {
        matches!(self, SensorKind::Capacitance)
    }
    /// The two charts to draw, top first.
    pub fn charts(self) -> [ChartSpec; 2] {
        match self {
            SensorKind::Adc => [
                ChartSpec {
                    column: Column::Value,
                    title: "ADC Value vs. Time",
                    y_label: "ADC Value (0-1023)",
                    y_range: Some((0.0, ADC_FULL_SCALE)),
                },
                ChartSpec {
                    column: Column::Derived,
                    title: "ADC Voltage vs. Time",
                    y_label: "ADC Voltage (V)",
                    y_range: Some((0.0, ADC_REF_VOLTS)),
                },
            ],
            SensorKind::Capacitance => [
                ChartSpec {
                    column: Column::Derived,
                    title: "log_10(Capacitance) vs. Time",
                    y_label: "log_10(Capacitance Value) [log_10(F)]",
                    y_range: None,
                },
                ChartSpec {
                    column: Column::Value,
                    title: "Capacitance (pF) vs. Time",
                    y_label: "Capacitance Value (pF)",
                    y_range: None,
                },
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Value,
    Derived,
}

/// One line chart over a table column against time.
#[derive(Clone, Copy, Debug)]
pub struct ChartSpec {
    pub column: Column,
    pub title: &'static str,
    pub y_label: &'static str,
    /// Fixed y range; `None` means fit to data.
    pub y_range: Option<(f64, f64)>,
}

pub const TIME_AXIS_LABEL: &str = "Time (s)";
