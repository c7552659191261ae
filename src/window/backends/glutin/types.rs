use glutin::dpi::LogicalSize;
use glutin::{ElementState, MouseScrollDelta, VirtualKeyCode};

use crate::window::events::{Event, InputEvent, Key, WindowEvent};

/// Translates a glutin event. `dpr` converts logical sizes into framebuffer
/// pixels, and `height` is the logical height used to flip cursor positions so
/// that they are relative to the bottom-left corner.
pub fn from_event(source: glutin::Event, dpr: f64, height: f64) -> Option<Event> {
    match source {
        glutin::Event::WindowEvent { event, .. } => from_window_event(event, dpr, height),
        glutin::Event::Suspended(true) => Some(Event::Window(WindowEvent::Suspended)),
        glutin::Event::Suspended(false) => Some(Event::Window(WindowEvent::Resumed)),
        _ => None,
    }
}

fn from_window_event(source: glutin::WindowEvent, dpr: f64, height: f64) -> Option<Event> {
    let event = match source {
        glutin::WindowEvent::CloseRequested | glutin::WindowEvent::Destroyed => {
            Event::Window(WindowEvent::Closed)
        }

        glutin::WindowEvent::Focused(true) => Event::Window(WindowEvent::GainFocus),
        glutin::WindowEvent::Focused(false) => Event::Window(WindowEvent::LostFocus),

        glutin::WindowEvent::Resized(size) => {
            let (w, h) = physical(size, dpr);
            Event::Window(WindowEvent::Resized(w, h))
        }

        glutin::WindowEvent::CursorMoved { position, .. } => {
            Event::InputDevice(InputEvent::MouseMoved {
                position: (position.x as f32, (height - position.y) as f32),
            })
        }

        glutin::WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => (x, y),
                MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
            };

            Event::InputDevice(InputEvent::MouseWheel { delta })
        }

        glutin::WindowEvent::KeyboardInput { input, .. } => {
            let key = input.virtual_keycode.and_then(from_virtual_key_code)?;
            match input.state {
                ElementState::Pressed => Event::InputDevice(InputEvent::KeyboardPressed { key }),
                ElementState::Released => Event::InputDevice(InputEvent::KeyboardReleased { key }),
            }
        }

        _ => return None,
    };

    Some(event)
}

pub fn physical(size: LogicalSize, dpr: f64) -> (u32, u32) {
    let size = size.to_physical(dpr);
    (size.width.round() as u32, size.height.round() as u32)
}

fn from_virtual_key_code(key: VirtualKeyCode) -> Option<Key> {
    let key = match key {
        VirtualKeyCode::Key1 => Key::Key1,
        VirtualKeyCode::Key2 => Key::Key2,
        VirtualKeyCode::Key3 => Key::Key3,
        VirtualKeyCode::Key4 => Key::Key4,
        VirtualKeyCode::Key5 => Key::Key5,
        VirtualKeyCode::Key6 => Key::Key6,
        VirtualKeyCode::Key7 => Key::Key7,
        VirtualKeyCode::Key8 => Key::Key8,
        VirtualKeyCode::Key9 => Key::Key9,
        VirtualKeyCode::Key0 => Key::Key0,
        VirtualKeyCode::A => Key::A,
        VirtualKeyCode::B => Key::B,
        VirtualKeyCode::C => Key::C,
        VirtualKeyCode::D => Key::D,
        VirtualKeyCode::E => Key::E,
        VirtualKeyCode::F => Key::F,
        VirtualKeyCode::G => Key::G,
        VirtualKeyCode::H => Key::H,
        VirtualKeyCode::I => Key::I,
        VirtualKeyCode::J => Key::J,
        VirtualKeyCode::K => Key::K,
        VirtualKeyCode::L => Key::L,
        VirtualKeyCode::M => Key::M,
        VirtualKeyCode::N => Key::N,
        VirtualKeyCode::O => Key::O,
        VirtualKeyCode::P => Key::P,
        VirtualKeyCode::Q => Key::Q,
        VirtualKeyCode::R => Key::R,
        VirtualKeyCode::S => Key::S,
        VirtualKeyCode::T => Key::T,
        VirtualKeyCode::U => Key::U,
        VirtualKeyCode::V => Key::V,
        VirtualKeyCode::W => Key::W,
        VirtualKeyCode::X => Key::X,
        VirtualKeyCode::Y => Key::Y,
        VirtualKeyCode::Z => Key::Z,
        VirtualKeyCode::Escape => Key::Escape,
        VirtualKeyCode::Space => Key::Space,
        VirtualKeyCode::Return => Key::Return,
        VirtualKeyCode::Tab => Key::Tab,
        VirtualKeyCode::LShift => Key::LShift,
        VirtualKeyCode::RShift => Key::RShift,
        VirtualKeyCode::LControl => Key::LControl,
        VirtualKeyCode::RControl => Key::RControl,
        VirtualKeyCode::Left => Key::Left,
        VirtualKeyCode::Up => Key::Up,
        VirtualKeyCode::Right => Key::Right,
        VirtualKeyCode::Down => Key::Down,
        _ => return None,
    };

    Some(key)
}
