use std::fmt;
use crate::types::{Column, Sample, SensorKind, ADC_FULL_SCALE, ADC_REF_VOLTS, CAP_OVER_RANGE_SENTINEL};
/// Preview rows shown at each end of a table's `Display` output.
const PREVIEW_ROWS: usize = 5;
/// Columnar view of a capture session plus the sensor's derived column.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedTable {
    pub kind: SensorKind,
    pub timestamp: Vec<f64>,
    pub value: Vec<u64>,
    pub derived: Vec<f64>,
}
impl DerivedTable {
    pub fn columns(&self) -> [&'static str; 3] {
        ["timestamp", self.kind.value_column(), self.kind.derived_column()]
    }
    pub fn len(&self) -> usize {
        self.timestamp.len()
    }
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }
    /// `(time, y)` pairs for one column. Non-finite points are dropped.
    pub fn series(&self, column: Column) -> Vec<(f64, f64)> {
        let ys: Box<dyn Iterator<Item = f64> + '_> = match column {
            Column::Value => Box::new(self.value.iter().map(|v| *v as f64)),
            Column::Derived => Box::new(self.derived.iter().copied()),
        };
        self.timestamp
            .iter()
            .copied()
            .zip(ys)
            .filter(|(t, y)| t.is_finite() && y.is_finite())
            .collect()
    }
}
/// Converts a raw ADC count to volts.
pub fn adc_voltage(value: u64) -> f64 {
    value as f64 * ADC_REF_VOLTS / ADC_FULL_SCALE
}
/// Replaces the over-range sentinel with zero.
pub fn clean_capacitance(value: u64) -> u64 {
    if value == CAP_OVER_RANGE_SENTINEL {
        0
    } else {
        value
    }
}
/// Applies the sensor's post-processing. `log10(0)` stays `-inf`.
pub fn transform(kind: SensorKind, samples: &[Sample]) -> DerivedTable {
    let timestamp = samples.iter().map(|s| s.timestamp).collect();
    let (value, derived): (Vec<u64>, Vec<f64>) = match kind {
        SensorKind::Adc => samples
            .iter()
            .map(|s| (s.value, adc_voltage(s.value)))
            .unzip(),
        SensorKind::Capacitance => samples
            .iter()
            .map(|s| {
                let v = clean_capacitance(s.value);
                (v, (v as f64).log10())
            })
            .unzip(),
    };
    DerivedTable {
        kind,
        timestamp,
        value,
        derived,
    }
}
impl fmt::Display for DerivedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.columns();
        writeln!(f, "shape: ({}, {})", self.len(), cols.len())?;
        writeln!(f, "{:>12} {:>14} {:>14}", cols[0], cols[1], cols[2])?;
        let row = |f: &mut fmt::Formatter<'_>, i: usize| {
            writeln!(
                f,
                "{:>12.4} {:>14} {:>14.6}",
                self.timestamp[i], self.value[i], self.derived[i]
            )
        };
        if self.len() <= PREVIEW_ROWS * 2 {
            for i in 0..self.len() {
                row(f, i)?;
            }
        } else {
            for i in 0..PREVIEW_ROWS {
                row(f, i)?;
            }
            writeln!(f, "{:>12} {:>14} {:>14}", "…", "…", "…")?;
            for i in self.len() - PREVIEW_ROWS..self.len() {
                row(f, i)?;
            }
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn samples(values: &[u64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample {
                timestamp: i as f64 * 0.1,
                value: *v,
            })
            .collect()
    }
    #[test]
    fn adc_voltage_matches_formula() {
        let table = transform(SensorKind::Adc, &samples(&[0, 512, 1023, 2048]));
        assert_eq!(table.columns(), ["timestamp", "adc_value", "adc_voltage"]);
        assert_eq!(table.value, vec![0, 512, 1023, 2048]);
        for (v, volts) in table.value.iter().zip(&table.derived) {
            assert!((volts - *v as f64 * 3.3 / 1023.0).abs() < 1e-12);
        }
        assert!((table.derived[1] - 1.651_612).abs() < 1e-6);
        assert!((table.derived[2] - 3.3).abs() < 1e-12);
    }
    #[test]
    fn capacitance_sentinel_becomes_zero() {
        let table = transform(
            SensorKind::Capacitance,
            &samples(&[4_294_967_289, 100, 4_294_967_288, 4_294_967_295]),
        );
        assert_eq!(table.columns(), ["timestamp", "cap_value", "cap_value_log"]);
        assert_eq!(table.value, vec![0, 100, 4_294_967_288, 4_294_967_295]);
        assert_eq!(table.derived[0], f64::NEG_INFINITY);
        assert!((table.derived[1] - 2.0).abs() < 1e-12);
    }
    #[test]
    fn series_skips_non_finite_points() {
        let table = transform(SensorKind::Capacitance, &samples(&[0, 10, 1000]));
        let logs = table.series(Column::Derived);
        assert_eq!(logs.len(), 2);
        assert!((logs[0].0 - 0.1).abs() < 1e-12 && (logs[0].1 - 1.0).abs() < 1e-12);
        assert!((logs[1].1 - 3.0).abs() < 1e-12);
        assert_eq!(table.series(Column::Value).len(), 3);
    }
    #[test]
    fn empty_session_gives_empty_table() {
        let table = transform(SensorKind::Adc, &[]);
        assert!(table.is_empty());
        assert!(table.to_string().starts_with("shape: (0, 3)"));
    }
    #[test]
    fn display_elides_middle_rows() {
        let table = transform(SensorKind::Adc, &samples(&(0..50).collect::<Vec<_>>()));
        let text = table.to_string();
        assert!(text.starts_with("shape: (50, 3)"));
        assert_eq!(text.lines().count(), 2 + PREVIEW_ROWS * 2 + 1);
        assert!(text.contains('…'));
    }
}
