use eframe::egui::ecolor::Hsva;
use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use ppi_explorer::layout::{DISK_CENTER, DISK_RADIUS};
use ppi_explorer::util::stable_pair;

use super::transform::ViewTransform;

pub(super) const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(150, 160, 175, 150);
pub(super) const PATH_COLOR: Color32 = Color32::from_rgb(250, 204, 21);
pub(super) const SELECTION_COLOR: Color32 = Color32::from_rgb(96, 205, 255);
const CENTER_COLOR: Color32 = Color32::from_rgb(236, 239, 244);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

/// Every protein keeps the same fully saturated hue across sessions.
pub(super) fn vertex_color(id: &str, is_center: bool) -> Color32 {
    if is_center {
        return CENTER_COLOR;
    }
    let (hue, brightness) = stable_pair(id);
    Color32::from(Hsva::new(hue, 1.0, 0.5 + brightness * 0.5, 1.0))
}

pub(super) fn vertex_radius(depth: f32, scale: f32) -> f32 {
    (11.0 + depth * 6.0) * scale.clamp(0.5, 2.0)
}

pub(super) fn edge_width(score: f32) -> f32 {
    1.0 + score.clamp(0.0, 1.0) * 5.0
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &ViewTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + transform.pan;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        y += step;
    }

    painter.circle_stroke(
        transform.to_screen(rect, DISK_CENTER),
        transform.length_to_screen(rect, DISK_RADIUS),
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 105, 120, 90)),
    );
}
