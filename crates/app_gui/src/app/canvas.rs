//! Mapping between screen positions and the image surface inside the scroll
//! area. The surface origin moves with scrolling, so offsets from it are
//! content coordinates.

use eframe::egui;
use labeler_core::{OverlayStyle, Point, Rect};

pub fn to_content(origin: egui::Pos2, pointer: egui::Pos2) -> Point {
    let d = pointer - origin;
    Point::new(widen(d.x), widen(d.y))
}

/// Widens through the shortest decimal form so `10.4f32` becomes `10.4`
/// rather than `10.399999618530273`.
fn widen(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

pub fn to_screen(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

pub fn screen_rect(origin: egui::Pos2, rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(to_screen(origin, rect.min()), to_screen(origin, rect.max()))
}

pub fn outline(style: &OverlayStyle) -> egui::Stroke {
    let [r, g, b] = style.color;
    egui::Stroke::new(style.stroke_width, egui::Color32::from_rgb(r, g, b))
}

/// Outlines `rect` without fill.
pub fn stroke_box(painter: &egui::Painter, origin: egui::Pos2, rect: Rect, stroke: egui::Stroke) {
    painter.rect_stroke(
        screen_rect(origin, rect),
        0.0,
        stroke,
        egui::StrokeKind::Middle,
    );
}
