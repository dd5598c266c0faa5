use glam::{Mat4, Vec2, Vec3};

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, PAN_STEP, ZOOM_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    In,
    Out,
}

/// Direction keys. The mapping onto the eye offset is deliberately
/// mirrored: the keys move the camera, not the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Offset applied to the eye for one frame of this key being held.
    pub fn delta(self) -> Vec2 {
        match self {
            PanDirection::Up => Vec2::new(0.0, -PAN_STEP),
            PanDirection::Down => Vec2::new(0.0, PAN_STEP),
            PanDirection::Left => Vec2::new(PAN_STEP, 0.0),
            PanDirection::Right => Vec2::new(-PAN_STEP, 0.0),
        }
    }
}

/// Pan offset and zoom of the displayed quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub eye: Vec2,
    pub zoom: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            eye: Vec2::ZERO,
            zoom: Vec2::splat(DEFAULT_ZOOM),
        }
    }
}

impl ViewTransform {
    /// Apply one wheel notch. Both axes share one bound check, so an axis
    /// at its limit blocks the other.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let min = Vec2::splat(MIN_ZOOM);
        let max = Vec2::splat(MAX_ZOOM);
        match direction {
            ScrollDirection::In if self.zoom.cmplt(max).all() => {
                self.zoom = (self.zoom + Vec2::splat(ZOOM_STEP)).clamp(min, max);
            }
            ScrollDirection::Out if self.zoom.cmpgt(min).all() => {
                self.zoom = (self.zoom - Vec2::splat(ZOOM_STEP)).clamp(min, max);
            }
            _ => {}
        }
    }

    pub fn pan(&mut self, direction: PanDirection) {
        self.eye += direction.delta();
    }

    pub fn reset(&mut self) {
        self.zoom = Vec2::splat(DEFAULT_ZOOM);
        self.eye = Vec2::ZERO;
    }

    /// `projection * view * model` for a viewport of the given aspect ratio.
    ///
    /// Zoom and image scale are not part of this matrix; the vertex shader
    /// applies them before it.
    pub fn compose_matrix(&self, aspect: f32) -> Mat4 {
        let projection =
            Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0 / aspect, 1.0 / aspect, 0.1, 20.0);
        let view = Mat4::from_translation(Vec3::new(self.eye.x, self.eye.y, -1.0));
        let model = Mat4::IDENTITY;
        projection * view * model
    }
}

/// Width over height, falling back to 1 for a collapsed viewport.
pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        1.0
    } else {
        width / height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn in_range(v: &ViewTransform) -> bool {
        v.zoom.cmpge(Vec2::splat(MIN_ZOOM)).all() && v.zoom.cmple(Vec2::splat(MAX_ZOOM)).all()
    }

    #[test]
    fn starts_centered_at_unit_zoom() {
        let v = ViewTransform::default();
        assert_eq!(v.eye, Vec2::ZERO);
        assert_eq!(v.zoom, Vec2::ONE);
    }

    #[test]
    fn single_notch_changes_zoom_by_step() {
        let mut v = ViewTransform::default();
        v.scroll(ScrollDirection::In);
        assert!((v.zoom.x - 1.1).abs() < 1e-6);
        v.scroll(ScrollDirection::Out);
        v.scroll(ScrollDirection::Out);
        assert!((v.zoom.x - 0.9).abs() < 1e-6);
        assert_eq!(v.zoom.x, v.zoom.y);
    }

    #[test]
    fn zoom_never_leaves_range() {
        let mut v = ViewTransform::default();
        for _ in 0..1000 {
            v.scroll(ScrollDirection::In);
            assert!(in_range(&v), "{:?}", v.zoom);
        }
        assert!((v.zoom.x - MAX_ZOOM).abs() < 0.11);

        for _ in 0..1000 {
            v.scroll(ScrollDirection::Out);
            assert!(in_range(&v), "{:?}", v.zoom);
        }
        assert!((v.zoom.x - MIN_ZOOM).abs() < 0.11);

        // Interleaved sequence driven by a small LCG.
        let mut seed = 0x2545_f491_u32;
        for _ in 0..10_000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let dir = if seed >> 31 == 0 {
                ScrollDirection::In
            } else {
                ScrollDirection::Out
            };
            v.scroll(dir);
            assert!(in_range(&v), "{:?}", v.zoom);
        }
    }

    #[test]
    fn blocked_axis_blocks_both() {
        let mut v = ViewTransform {
            eye: Vec2::ZERO,
            zoom: Vec2::new(MAX_ZOOM, 1.0),
        };
        v.scroll(ScrollDirection::In);
        assert_eq!(v.zoom, Vec2::new(MAX_ZOOM, 1.0));

        v.zoom = Vec2::new(MIN_ZOOM, 1.0);
        v.scroll(ScrollDirection::Out);
        assert_eq!(v.zoom, Vec2::new(MIN_ZOOM, 1.0));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut v = ViewTransform::default();
        for _ in 0..37 {
            v.scroll(ScrollDirection::In);
            v.pan(PanDirection::Up);
            v.pan(PanDirection::Left);
        }
        v.reset();
        assert_eq!(v, ViewTransform::default());
    }

    #[test]
    fn holding_right_moves_eye_per_frame() {
        let mut v = ViewTransform::default();
        let frames = 25;
        for _ in 0..frames {
            v.pan(PanDirection::Right);
        }
        assert!((v.eye.x - (-PAN_STEP * frames as f32)).abs() < 1e-5);
        assert_eq!(v.eye.y, 0.0);

        // Released: nothing else moves it.
        let held = v.eye;
        v.scroll(ScrollDirection::In);
        assert_eq!(v.eye, held);
    }

    #[test]
    fn key_mapping_is_mirrored() {
        assert_eq!(PanDirection::Up.delta(), Vec2::new(0.0, -PAN_STEP));
        assert_eq!(PanDirection::Down.delta(), Vec2::new(0.0, PAN_STEP));
        assert_eq!(PanDirection::Left.delta(), Vec2::new(PAN_STEP, 0.0));
        assert_eq!(PanDirection::Right.delta(), Vec2::new(-PAN_STEP, 0.0));
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let mut v = ViewTransform::default();
        v.pan(PanDirection::Up);
        v.pan(PanDirection::Left);
        assert!(v.eye.length() > PAN_STEP);
    }

    #[test]
    fn matrix_maps_origin_to_eye() {
        let mut v = ViewTransform::default();
        v.eye = Vec2::new(0.3, -0.2);
        let clip = v.compose_matrix(1.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x - 0.3).abs() < 1e-6);
        assert!((clip.y + 0.2).abs() < 1e-6);
        // Inside the depth range.
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }

    #[test]
    fn wide_viewport_stretches_vertical_extent() {
        let v = ViewTransform::default();
        let top = v.compose_matrix(2.0) * Vec4::new(0.0, 0.5, 0.0, 1.0);
        // y range is [-1/2, 1/2] so 0.5 lands on the top edge.
        assert!((top.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn aspect_falls_back_for_collapsed_viewport() {
        assert_eq!(aspect_ratio(800.0, 0.0), 1.0);
        assert_eq!(aspect_ratio(0.0, 0.0), 1.0);
        assert_eq!(aspect_ratio(800.0, 400.0), 2.0);
    }
}
