//! Constants used throughout the UI.

use eframe::egui::Color32;

/// Rendered size of one grid cell in points.
pub const CELL_SIZE: f32 = 36.0;

pub const COLOR_FREE: Color32 = Color32::WHITE;
pub const COLOR_OBSTACLE: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
pub const COLOR_START: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const COLOR_DESTINATION: Color32 = Color32::from_rgb(0xf1, 0xc4, 0x0f);
pub const COLOR_TRAIL: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
pub const COLOR_VEHICLE: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
pub const COLOR_GRID_LINE: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
