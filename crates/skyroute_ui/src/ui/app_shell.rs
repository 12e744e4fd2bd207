use std::time::{Duration, Instant};

use eframe::egui;

use crate::app::SkyRouteApp;
use crate::ui::controls::render_control_bar;
use crate::ui::dashboard::render_dashboard;

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 820.0)),
        ..Default::default()
    };
    eframe::run_native(
        "SkyRoute UAV Simulator",
        options,
        Box::new(|_cc| Ok(Box::new(SkyRouteApp::new()))),
    )
}

impl eframe::App for SkyRouteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Single writer: oracle replies and playback ticks both apply here,
        // replies first, so an install always beats a same-frame tick.
        self.controller.poll(Instant::now());
        if self.controller.state().is_running() || self.controller.requests_inflight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            render_control_bar(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_dashboard(ui, self);
        });
    }
}
