//! Control bar: routing mode, playback speed, start/pause, scenarios.

use std::time::Instant;

use eframe::egui;

use skyroute_core::scenario::ScenarioKind;
use skyroute_core::state::{PlaybackSpeed, RoutingMode, RunStatus};

use crate::app::SkyRouteApp;

pub fn render_control_bar(ui: &mut egui::Ui, app: &mut SkyRouteApp) {
    let now = Instant::now();

    ui.horizontal(|ui| {
        ui.label("Route");
        let mut mode = app.controller.state().mode();
        egui::ComboBox::from_id_salt("routing_mode")
            .selected_text(mode.label())
            .show_ui(ui, |ui| {
                for candidate in RoutingMode::ALL {
                    ui.selectable_value(&mut mode, candidate, candidate.label());
                }
            });
        if mode != app.controller.state().mode() {
            app.controller.select_mode(mode);
        }

        ui.separator();
        ui.label("Speed");
        let mut speed = app.controller.state().speed();
        egui::ComboBox::from_id_salt("playback_speed")
            .selected_text(speed.label())
            .show_ui(ui, |ui| {
                for candidate in PlaybackSpeed::ALL {
                    ui.selectable_value(
                        &mut speed,
                        candidate,
                        format!("{} ({} ms)", candidate.label(), candidate.interval_ms()),
                    );
                }
            });
        app.controller.select_speed(speed, now);

        ui.separator();
        match app.controller.state().run_status() {
            RunStatus::Running => {
                if ui.button("Pause").clicked() {
                    app.controller.pause();
                }
            }
            _ => {
                if ui.button("Start").clicked() {
                    app.controller.start(now);
                }
            }
        }

        ui.separator();
        for kind in ScenarioKind::ALL {
            if ui.button(kind.label()).clicked() {
                app.controller.load_scenario(kind);
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.strong(status_label(app.controller.state().run_status()));
        if app.controller.requests_inflight() > 0 {
            ui.spinner();
        }
        if let Some(error) = app.controller.state().last_error() {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
        }
    });
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Running => "Running",
        RunStatus::Completed => "Completed",
        RunStatus::Paused | RunStatus::Idle => "Paused",
    }
}
