use once_cell::sync::Lazy;
use regex::Regex;
use crate::drivers::AcquireError;
use crate::types::SensorKind;
// `[0-9]` rather than `\d`: Unicode digits match `\d` but do not parse as u64.
static ADC_PATTERN: Lazy<LinePattern> = Lazy::new(|| LinePattern::builtin(r"ADC Value: ([0-9]+)"));
static CAP_PATTERN: Lazy<LinePattern> =
    Lazy::new(|| LinePattern::builtin(r"REPORT_CAP_pF=([0-9]+)"));
/// A regex with a single capture group holding an unsigned decimal reading.
#[derive(Clone, Debug)]
pub struct LinePattern {
    regex: Regex,
}
impl LinePattern {
    pub fn new(pattern: &str) -> Result<Self, AcquireError> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(AcquireError::PatternGroups(groups));
        }
        Ok(Self { regex })
    }
    fn builtin(pattern: &str) -> Self {
        match Self::new(pattern) {
            Ok(p) => p,
            Err(e) => unreachable!("built-in pattern {pattern:?} is invalid: {e}"),
        }
    }
    pub fn for_sensor(kind: SensorKind) -> &'static LinePattern {
        match kind {
            SensorKind::Adc => &ADC_PATTERN,
            SensorKind::Capacitance => &CAP_PATTERN,
        }
    }
    /// Searches `line` for the pattern and returns the captured reading.
    ///
    /// Lines that do not match, or whose digits overflow `u64`, yield `None`.
    /// The built-in patterns only accept ASCII digits.
    pub fn parse(&self, line: &str) -> Option<u64> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn adc_line_parses_digits() {
        let p = LinePattern::for_sensor(SensorKind::Adc);
        assert_eq!(p.parse("ADC Value: 512"), Some(512));
        assert_eq!(p.parse("ADC Value: 0007"), Some(7));
        assert_eq!(p.parse("[12.5] ADC Value: 1023 (raw)"), Some(1023));
    }
    #[test]
    fn cap_line_parses_sentinel() {
        let p = LinePattern::for_sensor(SensorKind::Capacitance);
        assert_eq!(p.parse("REPORT_CAP_pF=4294967289"), Some(4_294_967_289));
    }
    #[test]
    fn unrelated_lines_do_not_match() {
        let adc = LinePattern::for_sensor(SensorKind::Adc);
        let cap = LinePattern::for_sensor(SensorKind::Capacitance);
        for line in ["noise", "", "ADC Value: ", "ADC Value: -3", "REPORT_CAP_pF="] {
            assert_eq!(adc.parse(line), None, "{line:?}");
            assert_eq!(cap.parse(line), None, "{line:?}");
        }
        assert_eq!(adc.parse("REPORT_CAP_pF=10"), None);
        assert_eq!(cap.parse("ADC Value: 10"), None);
    }
    #[test]
    fn overflowing_reading_is_ignored() {
        let p = LinePattern::for_sensor(SensorKind::Adc);
        assert_eq!(p.parse("ADC Value: 99999999999999999999999"), None);
    }
    #[test]
    fn non_ascii_digits_are_not_readings() {
        let adc = LinePattern::for_sensor(SensorKind::Adc);
        let cap = LinePattern::for_sensor(SensorKind::Capacitance);
        assert_eq!(adc.parse("ADC Value: \u{665}\u{661}\u{662}"), None);
        assert_eq!(cap.parse("REPORT_CAP_pF=\u{ff17}"), None);
        // The reading stops at the first non-ASCII digit.
        assert_eq!(adc.parse("ADC Value: 12\u{663}"), Some(12));
    }
    #[test]
    fn pattern_needs_exactly_one_group() {
        assert!(matches!(
            LinePattern::new(r"ADC Value: \d+"),
            Err(AcquireError::PatternGroups(0))
        ));
        assert!(matches!(
            LinePattern::new(r"(\w+)=(\d+)"),
            Err(AcquireError::PatternGroups(2))
        ));
        assert!(matches!(LinePattern::new(r"(\d+"), Err(AcquireError::Pattern(_))));
        assert!(LinePattern::new(r"T=(\d+)").is_ok());
    }
}
