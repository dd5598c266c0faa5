use eframe::egui::{self, Key};

use crate::view::transform::{PanDirection, ScrollDirection};

// ---------------------------------------------------------------------------
// Discrete events fed into the application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    Resized { width: f32, height: f32 },
    Scrolled(ScrollDirection),
    Pan(PanDirection),
    ResetView,
}

const PAN_KEYS: [(Key, PanDirection); 4] = [
    (Key::W, PanDirection::Up),
    (Key::S, PanDirection::Down),
    (Key::A, PanDirection::Left),
    (Key::D, PanDirection::Right),
];

// ---------------------------------------------------------------------------
// Raw per-frame input
// ---------------------------------------------------------------------------

/// What happened this frame, copied out of egui so translation stays pure.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Vertical delta of every wheel event, in arrival order.
    pub wheel: Vec<f32>,
    /// Pan keys currently held down.
    pub held: Vec<Key>,
    /// Size of the image viewport in points.
    pub viewport_size: egui::Vec2,
    /// Pointer is over the image and not over a panel.
    pub hovered: bool,
    /// Keys may drive the view (no text field focus, open panel closed).
    pub keyboard_enabled: bool,
}

impl FrameInput {
    pub fn gather(ctx: &egui::Context, viewport: &egui::Response, keyboard_enabled: bool) -> Self {
        let keyboard_enabled = keyboard_enabled && !ctx.wants_keyboard_input();
        ctx.input(|i| FrameInput {
            wheel: i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::MouseWheel { delta, .. } => Some(delta.y),
                    _ => None,
                })
                .collect(),
            held: PAN_KEYS
                .iter()
                .map(|(key, _)| *key)
                .filter(|key| i.key_down(*key))
                .collect(),
            viewport_size: viewport.rect.size(),
            hovered: viewport.hovered(),
            keyboard_enabled,
        })
    }

    /// Whether the loop must keep repainting to keep panning smooth.
    pub fn wants_continuous_repaint(&self) -> bool {
        self.keyboard_enabled && !self.held.is_empty()
    }
}

/// Translate a frame of input into view events.
///
/// `known_size` is the viewport size the state last saw; a difference is
/// reported as one `Resized`.
pub fn translate(input: &FrameInput, known_size: egui::Vec2) -> Vec<ViewerEvent> {
    let mut events = Vec::new();

    if input.viewport_size != known_size {
        events.push(ViewerEvent::Resized {
            width: input.viewport_size.x,
            height: input.viewport_size.y,
        });
    }

    if input.hovered {
        events.extend(
            input
                .wheel
                .iter()
                .filter_map(|&dy| wheel_direction(dy))
                .map(ViewerEvent::Scrolled),
        );
    }

    if input.keyboard_enabled {
        events.extend(
            PAN_KEYS
                .iter()
                .filter(|(key, _)| input.held.contains(key))
                .map(|(_, dir)| ViewerEvent::Pan(*dir)),
        );
    }

    events
}

fn wheel_direction(delta_y: f32) -> Option<ScrollDirection> {
    if delta_y > 0.0 {
        Some(ScrollDirection::In)
    } else if delta_y < 0.0 {
        Some(ScrollDirection::Out)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FrameInput {
        FrameInput {
            viewport_size: egui::vec2(600.0, 580.0),
            hovered: true,
            keyboard_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn quiet_frame_has_no_events() {
        let input = base();
        assert!(translate(&input, input.viewport_size).is_empty());
        assert!(!input.wants_continuous_repaint());
    }

    #[test]
    fn each_wheel_event_is_one_notch() {
        let mut input = base();
        input.wheel = vec![1.0, 0.0, -2.5, 30.0];
        let events = translate(&input, input.viewport_size);
        assert_eq!(
            events,
            vec![
                ViewerEvent::Scrolled(ScrollDirection::In),
                ViewerEvent::Scrolled(ScrollDirection::Out),
                ViewerEvent::Scrolled(ScrollDirection::In),
            ]
        );
    }

    #[test]
    fn wheel_outside_viewport_is_ignored() {
        let mut input = base();
        input.hovered = false;
        input.wheel = vec![1.0];
        assert!(translate(&input, input.viewport_size).is_empty());
    }

    #[test]
    fn held_keys_pan_every_frame() {
        let mut input = base();
        input.held = vec![Key::D, Key::W];
        let events = translate(&input, input.viewport_size);
        assert_eq!(
            events,
            vec![
                ViewerEvent::Pan(PanDirection::Up),
                ViewerEvent::Pan(PanDirection::Right),
            ]
        );
        assert!(input.wants_continuous_repaint());
    }

    #[test]
    fn keys_are_ignored_when_keyboard_is_taken() {
        let mut input = base();
        input.held = vec![Key::A];
        input.keyboard_enabled = false;
        assert!(translate(&input, input.viewport_size).is_empty());
        assert!(!input.wants_continuous_repaint());
    }

    #[test]
    fn size_change_is_reported_once() {
        let input = base();
        let events = translate(&input, egui::vec2(600.0, 600.0));
        assert_eq!(
            events,
            vec![ViewerEvent::Resized {
                width: 600.0,
                height: 580.0
            }]
        );
    }
}
