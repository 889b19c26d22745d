use eframe::egui::{Pos2, Rect, Vec2, pos2};

const SCALE_STEP: f32 = 0.1;
const MAX_SCALE: f32 = 8.0;
/// Share of the shorter canvas side the unit square occupies at scale 1.
const FILL: f32 = 0.85;

/// Display transform of the network. Only changes how the layout is drawn,
/// never the layout itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ViewTransform {
    pub(super) scale: f32,
    pub(super) pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub(super) fn increase_scale(&mut self) {
        self.scale = (self.scale + SCALE_STEP).min(MAX_SCALE);
    }

    /// Refuses to shrink once the scale is within one step of zero.
    pub(super) fn decrease_scale(&mut self) -> bool {
        if self.scale <= SCALE_STEP + 1e-4 {
            return false;
        }
        self.scale -= SCALE_STEP;
        true
    }

    pub(super) fn zoom_by(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(SCALE_STEP, MAX_SCALE);
    }

    pub(super) fn reset_scale(&mut self) {
        self.scale = 1.0;
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    fn canvas(&self, rect: Rect) -> Rect {
        let side = rect.width().min(rect.height()) * FILL * self.scale;
        Rect::from_center_size(rect.center() + self.pan, Vec2::splat(side))
    }

    /// Layout space has y pointing up; the screen has it pointing down.
    pub(super) fn to_screen(&self, rect: Rect, position: Vec2) -> Pos2 {
        let canvas = self.canvas(rect);
        pos2(
            canvas.left() + position.x * canvas.width(),
            canvas.bottom() - position.y * canvas.height(),
        )
    }

    pub(super) fn length_to_screen(&self, rect: Rect, length: f32) -> f32 {
        self.canvas(rect).width() * length
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))
    }

    #[test]
    fn decrease_stops_one_step_above_zero() {
        let mut transform = ViewTransform::default();
        let mut accepted = 0;
        for _ in 0..20 {
            if transform.decrease_scale() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 9);
        assert!((transform.scale - 0.1).abs() < 1e-4);
    }

    #[test]
    fn increase_and_reset_scale() {
        let mut transform = ViewTransform::default();
        transform.increase_scale();
        transform.increase_scale();
        assert!((transform.scale - 1.2).abs() < 1e-6);

        transform.pan = vec2(40.0, -12.0);
        transform.reset_scale();
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.pan, vec2(40.0, -12.0));

        transform.reset();
        assert_eq!(transform, ViewTransform::default());
    }

    #[test]
    fn disk_center_lands_on_the_panned_canvas_center() {
        let mut transform = ViewTransform::default();
        let centered = transform.to_screen(screen(), vec2(0.5, 0.5));
        assert!(centered.distance(pos2(400.0, 300.0)) < 1e-3);

        transform.pan = vec2(25.0, 10.0);
        let panned = transform.to_screen(screen(), vec2(0.5, 0.5));
        assert!(panned.distance(pos2(425.0, 310.0)) < 1e-3);
    }

    #[test]
    fn layout_y_axis_points_up_on_screen() {
        let transform = ViewTransform::default();
        let top = transform.to_screen(screen(), vec2(0.5, 1.0));
        let bottom = transform.to_screen(screen(), vec2(0.5, 0.0));
        assert!(top.y < bottom.y);
        assert!((bottom.y - top.y - 600.0 * FILL).abs() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut transform = ViewTransform::default();
        transform.zoom_by(0.0);
        assert_eq!(transform.scale, SCALE_STEP);
        transform.zoom_by(1_000.0);
        assert_eq!(transform.scale, MAX_SCALE);
    }
}
