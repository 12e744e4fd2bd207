//! Grid painting and cell interaction.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, Vec2};

use skyroute_core::controller::SimulationController;
use skyroute_core::grid::{Coord, CELL_OBSTACLE};
use skyroute_core::state::SimulationState;

use crate::ui::constants::{
    CELL_SIZE, COLOR_DESTINATION, COLOR_FREE, COLOR_GRID_LINE, COLOR_OBSTACLE, COLOR_START,
    COLOR_TRAIL, COLOR_VEHICLE,
};

/// Paint the occupancy grid, the traversed trail, and the vehicle marker.
/// Clicking a cell forwards an obstacle-toggle intent to the controller.
pub fn render_grid(ui: &mut egui::Ui, controller: &mut SimulationController) {
    let size = controller.state().grid().size();
    let desired = Vec2::splat(CELL_SIZE * size as f32);
    let (response, painter) = ui.allocate_painter(desired, Sense::click());
    let origin = response.rect.min;

    for (x, row) in controller.state().grid().rows().iter().enumerate() {
        for (y, &value) in row.iter().enumerate() {
            let cell = Coord::new(x, y);
            painter.rect_filled(
                cell_rect(origin, cell),
                0.0,
                cell_color(controller.state(), cell, value),
            );
        }
    }

    let stroke = Stroke::new(1.0, COLOR_GRID_LINE);
    let extent = CELL_SIZE * size as f32;
    for line in 0..=size {
        let offset = line as f32 * CELL_SIZE;
        painter.line_segment(
            [
                egui::pos2(origin.x, origin.y + offset),
                egui::pos2(origin.x + extent, origin.y + offset),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(origin.x + offset, origin.y),
                egui::pos2(origin.x + offset, origin.y + extent),
            ],
            stroke,
        );
    }

    if let Some(position) = controller.state().current_position() {
        let center = cell_rect(origin, position).center();
        painter.circle_filled(center, CELL_SIZE * 0.3, COLOR_VEHICLE);
    }

    if response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            if let Some(cell) = cell_at(origin, size, pointer) {
                controller.toggle_cell(cell);
            }
        }
    }
}

pub fn render_legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        legend_item(ui, COLOR_START, "Start");
        legend_item(ui, COLOR_DESTINATION, "Destination");
        legend_item(ui, COLOR_VEHICLE, "UAV");
        legend_item(ui, COLOR_TRAIL, "Path");
        legend_item(ui, COLOR_OBSTACLE, "Obstacle");
        legend_item(ui, COLOR_FREE, "Free");
    });
}

fn legend_item(ui: &mut egui::Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(14.0, 14.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.label(label);
}

/// Row `x` maps to the vertical axis, column `y` to the horizontal one.
fn cell_rect(origin: Pos2, cell: Coord) -> Rect {
    let min = egui::pos2(
        origin.x + cell.y as f32 * CELL_SIZE,
        origin.y + cell.x as f32 * CELL_SIZE,
    );
    Rect::from_min_size(min, Vec2::splat(CELL_SIZE))
}

fn cell_at(origin: Pos2, size: usize, pointer: Pos2) -> Option<Coord> {
    let dx = pointer.x - origin.x;
    let dy = pointer.y - origin.y;
    if dx < 0.0 || dy < 0.0 {
        return None;
    }
    let y = (dx / CELL_SIZE) as usize;
    let x = (dy / CELL_SIZE) as usize;
    (x < size && y < size).then_some(Coord::new(x, y))
}

fn cell_color(state: &SimulationState, cell: Coord, value: u8) -> Color32 {
    // Same precedence as the metrics the operator sees: traversed trail on
    // top, then the fixed corners, then occupancy.
    if state.route()[..state.cursor()].contains(&cell) {
        return COLOR_TRAIL;
    }
    if cell == state.grid().start() {
        return COLOR_START;
    }
    if cell == state.grid().destination() {
        return COLOR_DESTINATION;
    }
    if value == CELL_OBSTACLE {
        return COLOR_OBSTACLE;
    }
    COLOR_FREE
}
