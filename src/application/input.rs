//! Per-frame input state.

use crate::math::prelude::Vector2;
use crate::utils::prelude::FastHashSet;
use crate::window::events::{Event, InputEvent, Key, WindowEvent};

/// The keyboard and mouse state of one frame, updated once per frame from the
/// polled events. Key presses are edges between the key state of the previous
/// frame and the current one.
#[derive(Debug)]
pub struct InputState {
    downs: FastHashSet<Key>,
    previous: FastHashSet<Key>,
    cursor: Option<(f32, f32)>,
    movement: Vector2<f32>,
    scroll: Vector2<f32>,
    resized: Option<Vector2<u32>>,
    close_requested: bool,
}

impl Default for InputState {
    fn default() -> Self {
        InputState {
            downs: FastHashSet::default(),
            previous: FastHashSet::default(),
            cursor: None,
            movement: Vector2::new(0.0, 0.0),
            scroll: Vector2::new(0.0, 0.0),
            resized: None,
            close_requested: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts a new frame, then applies `events` to it.
    pub fn update(&mut self, events: &[Event]) {
        self.previous.clone_from(&self.downs);
        self.movement = Vector2::new(0.0, 0.0);
        self.scroll = Vector2::new(0.0, 0.0);
        self.resized = None;

        for v in events {
            match *v {
                Event::InputDevice(InputEvent::KeyboardPressed { key }) => {
                    self.downs.insert(key);
                }

                Event::InputDevice(InputEvent::KeyboardReleased { key }) => {
                    self.downs.remove(&key);
                }

                Event::InputDevice(InputEvent::MouseMoved { position }) => {
                    // The first sample only establishes the reference.
                    if let Some(last) = self.cursor {
                        self.movement.x += position.0 - last.0;
                        self.movement.y += position.1 - last.1;
                    }

                    self.cursor = Some(position);
                }

                Event::InputDevice(InputEvent::MouseWheel { delta }) => {
                    self.scroll.x += delta.0;
                    self.scroll.y += delta.1;
                }

                Event::Window(WindowEvent::Resized(w, h)) => {
                    self.resized = Some(Vector2::new(w, h));
                }

                Event::Window(WindowEvent::Closed) => {
                    self.close_requested = true;
                }

                Event::Window(WindowEvent::LostFocus) => {
                    self.downs.clear();
                    self.cursor = None;
                }

                _ => {}
            }
        }
    }

    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.downs.contains(&key)
    }

    /// Returns true if the key went down during this frame.
    #[inline]
    pub fn is_key_press(&self, key: Key) -> bool {
        self.downs.contains(&key) && !self.previous.contains(&key)
    }

    #[inline]
    pub fn is_key_release(&self, key: Key) -> bool {
        !self.downs.contains(&key) && self.previous.contains(&key)
    }

    /// The cursor movement of this frame. Positive y is upwards.
    #[inline]
    pub fn movement(&self) -> Vector2<f32> {
        self.movement
    }

    #[inline]
    pub fn scroll(&self) -> Vector2<f32> {
        self.scroll
    }

    /// The last framebuffer size reported during this frame.
    #[inline]
    pub fn resized(&self) -> Option<Vector2<u32>> {
        self.resized
    }

    #[inline]
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn press(key: Key) -> Event {
        Event::InputDevice(InputEvent::KeyboardPressed { key })
    }

    fn release(key: Key) -> Event {
        Event::InputDevice(InputEvent::KeyboardReleased { key })
    }

    fn cursor(x: f32, y: f32) -> Event {
        Event::InputDevice(InputEvent::MouseMoved { position: (x, y) })
    }

    #[test]
    fn edges() {
        let mut input = InputState::new();

        input.update(&[press(Key::F)]);
        assert!(input.is_key_press(Key::F));
        assert!(input.is_key_down(Key::F));

        // Holding the key is not another press.
        input.update(&[press(Key::F)]);
        assert!(!input.is_key_press(Key::F));
        assert!(input.is_key_down(Key::F));

        input.update(&[release(Key::F)]);
        assert!(input.is_key_release(Key::F));
        assert!(!input.is_key_down(Key::F));

        input.update(&[]);
        assert!(!input.is_key_release(Key::F));
    }

    #[test]
    fn cursor_reference() {
        let mut input = InputState::new();

        input.update(&[cursor(100.0, 100.0)]);
        assert_eq!(input.movement(), Vector2::new(0.0, 0.0));

        input.update(&[cursor(110.0, 95.0), cursor(112.0, 90.0)]);
        assert_eq!(input.movement(), Vector2::new(12.0, -10.0));

        input.update(&[]);
        assert_eq!(input.movement(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn window_events() {
        let mut input = InputState::new();
        input.update(&[
            Event::Window(WindowEvent::Resized(10, 20)),
            Event::Window(WindowEvent::Resized(30, 40)),
        ]);
        assert_eq!(input.resized(), Some(Vector2::new(30, 40)));
        assert!(!input.close_requested());

        input.update(&[Event::Window(WindowEvent::Closed)]);
        assert_eq!(input.resized(), None);
        assert!(input.close_requested());
    }
}
