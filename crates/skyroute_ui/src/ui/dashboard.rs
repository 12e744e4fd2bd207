//! Live metrics panel and the grid view.

use eframe::egui;

use crate::app::SkyRouteApp;
use crate::ui::rendering::{render_grid, render_legend};

pub fn render_dashboard(ui: &mut egui::Ui, app: &mut SkyRouteApp) {
    ui.horizontal_top(|ui| {
        render_metrics_panel(ui, app);
        ui.separator();
        ui.vertical(|ui| {
            render_grid(ui, &mut app.controller);
            ui.add_space(8.0);
            render_legend(ui);
        });
    });
}

fn render_metrics_panel(ui: &mut egui::Ui, app: &SkyRouteApp) {
    let state = app.controller.state();
    ui.vertical(|ui| {
        ui.heading("Live metrics");
        egui::Grid::new("metrics")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Mode");
                ui.strong(state.mode().label());
                ui.end_row();

                ui.label("Speed");
                ui.strong(state.speed().label());
                ui.end_row();

                ui.label("Steps");
                ui.strong(state.cursor().to_string());
                ui.end_row();

                ui.label("Path length");
                ui.strong(state.route().len().to_string());
                ui.end_row();

                ui.label("Re-routes");
                ui.strong(state.reroute_count().to_string());
                ui.end_row();
            });
        ui.add_space(8.0);
        ui.label(format!("Oracle: {}", app.oracle_endpoint));
    });
}
