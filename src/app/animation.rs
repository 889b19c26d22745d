use eframe::egui::Vec2;

use ppi_explorer::layout::DISK_CENTER;

/// Fraction of the remaining distance covered per second of frame time.
const LERP_RATE: f32 = 2.5;
const SETTLE_DISTANCE: f32 = 0.0001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Placement {
    pub(super) position: Vec2,
    pub(super) depth: f32,
}

impl Placement {
    const ORIGIN: Self = Self {
        position: DISK_CENTER,
        depth: 0.0,
    };

    fn distance(self, other: Self) -> f32 {
        (self.position - other.position)
            .length()
            .max((self.depth - other.depth).abs())
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position + (other.position - self.position) * t,
            depth: self.depth + (other.depth - self.depth) * t,
        }
    }
}

/// Moves the drawn vertices toward the latest layout one frame at a time.
#[derive(Debug, Default)]
pub(super) struct Interpolation {
    current: Vec<Placement>,
    targets: Vec<Placement>,
    moving: bool,
}

impl Interpolation {
    pub(super) fn retarget(&mut self, targets: &[Placement], restart_from_center: bool) {
        if restart_from_center || self.current.len() != targets.len() {
            self.current = vec![Placement::ORIGIN; targets.len()];
        }
        self.targets = targets.to_vec();
        self.moving = !targets.is_empty();
    }

    pub(super) fn positions(&self) -> &[Placement] {
        &self.current
    }

    pub(super) fn is_moving(&self) -> bool {
        self.moving
    }

    /// Advances every vertex by `dt` seconds. Returns true on the frame the
    /// whole network comes to rest.
    pub(super) fn tick(&mut self, dt: f32) -> bool {
        if !self.moving {
            return false;
        }

        let t = (dt * LERP_RATE).clamp(0.0, 1.0);
        let mut settled = true;
        for (current, target) in self.current.iter_mut().zip(&self.targets) {
            if current.distance(*target) < SETTLE_DISTANCE {
                *current = *target;
                continue;
            }

            *current = current.lerp(*target, t);
            settled = false;
        }

        if settled {
            self.moving = false;
        }
        settled
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn targets() -> Vec<Placement> {
        (0..10)
            .map(|index| Placement {
                position: vec2(0.1 + index as f32 * 0.08, 0.9 - index as f32 * 0.07),
                depth: if index == 0 { 0.0 } else { 0.3 },
            })
            .collect()
    }

    #[test]
    fn first_layout_starts_from_the_center() {
        let mut interpolation = Interpolation::default();
        interpolation.retarget(&targets(), false);

        assert!(interpolation.is_moving());
        assert!(
            interpolation
                .positions()
                .iter()
                .all(|placement| *placement == Placement::ORIGIN)
        );
    }

    #[test]
    fn ticking_converges_onto_the_targets() {
        let mut interpolation = Interpolation::default();
        let goal = targets();
        interpolation.retarget(&goal, false);

        let mut frames = 0;
        while !interpolation.tick(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 2_000, "interpolation never settled");
        }

        assert!(!interpolation.is_moving());
        assert_eq!(interpolation.positions(), goal.as_slice());
        assert!(!interpolation.tick(1.0 / 60.0));
    }

    #[test]
    fn later_layouts_continue_from_current_positions() {
        let mut interpolation = Interpolation::default();
        let first = targets();
        interpolation.retarget(&first, false);
        interpolation.tick(10.0);
        interpolation.tick(10.0);
        assert_eq!(interpolation.positions(), first.as_slice());

        let second = first
            .iter()
            .map(|placement| Placement {
                position: placement.position * 0.5,
                depth: placement.depth,
            })
            .collect::<Vec<_>>();
        interpolation.retarget(&second, false);
        assert_eq!(interpolation.positions(), first.as_slice());

        interpolation.retarget(&second, true);
        assert!(
            interpolation
                .positions()
                .iter()
                .all(|placement| *placement == Placement::ORIGIN)
        );
    }

    #[test]
    fn zero_frame_time_does_not_move_anything() {
        let mut interpolation = Interpolation::default();
        interpolation.retarget(&targets(), false);
        assert!(!interpolation.tick(0.0));
        assert!(
            interpolation
                .positions()
                .iter()
                .skip(1)
                .all(|placement| *placement == Placement::ORIGIN)
        );
    }
}
