use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::AcquireError;
use crate::drivers::DerivedTable;
use crate::types::{ChartSpec, TIME_AXIS_LABEL};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    /// Height of each chart; the image holds two stacked charts.
    pub chart_height: u32,
    pub background: RGBColor,
    pub palette: [RGBColor; 2],
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            chart_height: 400,
            background: RGBColor(10, 10, 10),
            palette: [BLUE, RED],
        }
    }
}
/// Y axis bounds for a chart: the fixed range if the chart has one, otherwise
/// the data range padded by 10%.
pub fn y_bounds(spec: &ChartSpec, points: &[(f64, f64)]) -> (f64, f64) {
    if let Some(range) = spec.y_range {
        return range;
    }
    if points.is_empty() {
        return (0.0, 1.0);
    }
    let (min, max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    // Avoid a zero-height axis.
    let pad = ((max - min) * 0.1).max(1e-3);
    (min - pad, max + pad)
}
fn x_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let max = points.iter().map(|(t, _)| *t).fold(0.0f64, f64::max);
    (0.0, max.max(1e-3))
}
/// Renders the table's two charts stacked in a single PNG.
pub fn render_table_png(table: &DerivedTable, style: PlotStyle) -> Result<Vec<u8>, AcquireError> {
    if table.is_empty() {
        return Err(AcquireError::Plot("table has no rows".into()));
    }
    let height = style.chart_height * 2;
    let mut buffer = vec![0u8; (style.width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, height)).into_drawing_area();
        root.fill(&style.background)?;
        let areas = root.split_evenly((2, 1));
        for ((area, spec), color) in areas
            .iter()
            .zip(table.kind.charts().iter())
            .zip(style.palette.iter())
        {
            let points = table.series(spec.column);
            let (x_min, x_max) = x_bounds(&points);
            let (y_min, y_max) = y_bounds(spec, &points);
            let mut chart = ChartBuilder::on(area)
                .margin(10)
                .caption(spec.title, ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 60)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
            chart
                .configure_mesh()
                .x_desc(TIME_AXIS_LABEL)
                .y_desc(spec.y_label)
                .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
                .label_style(("sans-serif", 12).into_font().color(&WHITE))
                .light_line_style(&WHITE.mix(0.1))
                .draw()?;
            chart.draw_series(LineSeries::new(points, color))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AcquireError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AcquireError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::transform;
    use crate::types::{Sample, SensorKind};
    fn table(kind: SensorKind, values: &[u64]) -> DerivedTable {
        let samples: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample {
                timestamp: i as f64 * 0.25,
                value: *v,
            })
            .collect();
        transform(kind, &samples)
    }
    #[test]
    fn adc_charts_use_fixed_ranges() {
        let t = table(SensorKind::Adc, &[1, 2, 3]);
        let [value, volts] = SensorKind::Adc.charts();
        assert_eq!(y_bounds(&value, &t.series(value.column)), (0.0, 1023.0));
        assert_eq!(y_bounds(&volts, &t.series(volts.column)), (0.0, 3.3));
    }
    #[test]
    fn capacitance_charts_fit_data() {
        let t = table(SensorKind::Capacitance, &[100, 200]);
        let [_, raw] = SensorKind::Capacitance.charts();
        let (lo, hi) = y_bounds(&raw, &t.series(raw.column));
        assert!(lo < 100.0 && lo > 80.0);
        assert!(hi > 200.0 && hi < 220.0);
        let (lo, hi) = y_bounds(&raw, &[(0.0, 5.0)]);
        assert!(lo < 5.0 && hi > 5.0);
    }
    #[test]
    fn empty_table_is_rejected() {
        let t = table(SensorKind::Adc, &[]);
        assert!(matches!(
            render_table_png(&t, PlotStyle::default()),
            Err(AcquireError::Plot(_))
        ));
    }
    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_png_bytes() {
        let t = table(SensorKind::Capacitance, &[0, 10, 4_294_967_289, 1000]);
        let png = render_table_png(&t, PlotStyle::default()).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
