// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};
use log::{info, warn};
use crate::drivers::DerivedTable;
use crate::types::{ChartSpec, TIME_AXIS_LABEL};

const LINE_COLORS: [Color32; 2] = [Color32::from_rgb(0, 200, 255), Color32::from_rgb(255, 90, 90)];

/// One chart's points, converted once up front.
struct ChartData {
    spec: ChartSpec,
    points: Vec<[f64; 2]>,
}

pub struct PlotViewerApp {
    title: String,
    rows: usize,
    charts: Vec<ChartData>,
}

impl PlotViewerApp {
    pub fn new(table: &DerivedTable) -> Self {
        let charts = table
            .kind
            .charts()
            .into_iter()
            .map(|spec| ChartData {
                spec,
                points: table
                    .series(spec.column)
                    .into_iter()
                    .map(|(t, y)| [t, y])
                    .collect(),
            })
            .collect();
        Self {
            title: format!("{} capture", table.kind.label()),
            rows: table.len(),
            charts,
        }
    }
}

impl eframe::App for PlotViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        egui::TopBottomPanel::top("summary").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.title);
                ui.label(format!("{} samples", self.rows));
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            // 两张图上下排列，平分高度
            let chart_height = (ui.available_height() / 2.0 - 30.0).max(100.0);
            for (idx, chart) in self.charts.iter().enumerate() {
                ui.label(chart.spec.title);
                let mut plot = Plot::new(format!("chart_{idx}"))
                    .height(chart_height)
                    .x_axis_label(TIME_AXIS_LABEL)
                    .y_axis_label(chart.spec.y_label);
                if let Some((lo, hi)) = chart.spec.y_range {
                    plot = plot.include_y(lo).include_y(hi);
                }
                plot.show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::new(chart.points.clone()))
                            .name(chart.spec.title)
                            .color(LINE_COLORS[idx % LINE_COLORS.len()]),
                    );
                });
            }
        });
    }
}

/// Opens a window with the table's two charts and blocks until it is closed.
pub fn render(table: &DerivedTable) -> Result<(), eframe::Error> {
    if table.is_empty() {
        warn!("No samples captured; charts will be empty.");
    }
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1000.0, 800.0])
        .with_min_inner_size([600.0, 480.0])
        .with_title("serial-plotter");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app = PlotViewerApp::new(table);
    info!("Showing plotted data.");
    eframe::run_native("serial-plotter", options, Box::new(move |_cc| Box::new(app)))
}
