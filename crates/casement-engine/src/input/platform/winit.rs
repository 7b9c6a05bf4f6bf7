use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::input::{Key, MouseButton};
use crate::window::{DELETE_CHAR, NativeMessage, SizeMode, SysCommand};

/// Wheel units per notch.
pub const WHEEL_DELTA: f32 = 120.0;

/// Maximized/minimized flags sampled from the window when an event arrives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowShape {
    pub maximized: bool,
    pub minimized: bool,
}

impl WindowShape {
    pub fn of(window: &Window) -> Self {
        Self {
            maximized: window.is_maximized(),
            minimized: window.is_minimized().unwrap_or(false),
        }
    }
}

/// Turns winit window events into native window messages.
///
/// winit folds several native notifications into one event (and omits some),
/// so this keeps the little state needed to reconstruct them: modifiers for
/// system keys, the previous window shape for restore commands, and the
/// sizing run used to place the drag-end marker.
#[derive(Debug, Default)]
pub struct WinitMessageSource {
    modifiers: ModifiersState,
    shape: WindowShape,
    sized_this_pump: bool,
    /// A run of pumps with resizes is in progress.
    sizing: bool,
}

impl WinitMessageSource {
    /// Appends the messages for `event` to `out`, in native order.
    pub fn translate(&mut self, event: &WindowEvent, shape: WindowShape, out: &mut Vec<NativeMessage>) {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = m.state();
            }

            WindowEvent::Focused(true) => out.push(NativeMessage::SetFocus),
            WindowEvent::Focused(false) => out.push(NativeMessage::KillFocus),

            WindowEvent::CloseRequested => out.push(NativeMessage::Close),

            WindowEvent::Resized(size) => {
                let was = self.shape;
                self.shape = shape;

                // Leaving maximized or minimized is a restore; the size follows it.
                if (was.maximized && !shape.maximized) || (was.minimized && !shape.minimized) {
                    out.push(NativeMessage::SysCommand(SysCommand::Restore));
                }

                let mode = if shape.minimized {
                    SizeMode::Minimized
                } else if shape.maximized {
                    SizeMode::Maximized
                } else {
                    SizeMode::Restored
                };

                self.sized_this_pump = true;
                out.push(NativeMessage::Size {
                    width: size.width,
                    height: size.height,
                    mode,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_mouse_button(*button) else {
                    out.push(NativeMessage::Other);
                    return;
                };
                out.push(match state {
                    ElementState::Pressed => NativeMessage::ButtonDown(button),
                    ElementState::Released => NativeMessage::ButtonUp(button),
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * WHEEL_DELTA,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                out.push(NativeMessage::MouseWheel(dy));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                // Alt chords and F10 go through the system key path.
                let sys = self.modifiers.alt_key() || key == Key::F10;

                match event.state {
                    ElementState::Pressed => {
                        out.push(if sys {
                            NativeMessage::SysKeyDown(key)
                        } else {
                            NativeMessage::KeyDown(key)
                        });

                        if sys {
                            return;
                        }
                        if let Some(text) = &event.text {
                            for c in text.chars() {
                                // The translator injects Delete's character itself.
                                if key == Key::Delete && c as u32 == DELETE_CHAR {
                                    continue;
                                }
                                out.push(NativeMessage::Char(c as u32));
                            }
                        }
                    }
                    ElementState::Released => out.push(if sys {
                        NativeMessage::SysKeyUp(key)
                    } else {
                        NativeMessage::KeyUp(key)
                    }),
                }
            }

            WindowEvent::Ime(Ime::Commit(text)) => {
                out.extend(text.chars().map(|c| NativeMessage::Char(c as u32)));
            }

            _ => out.push(NativeMessage::Other),
        }
    }

    /// Called once the pump has drained the queue.
    ///
    /// A drag may span many pumps (or one, inside a modal size loop). The first
    /// pump without a resize after one or more that had them ends the drag.
    pub fn finish_pump(&mut self) -> Option<NativeMessage> {
        if std::mem::take(&mut self.sized_this_pump) {
            self.sizing = true;
            return None;
        }
        std::mem::take(&mut self.sizing).then_some(NativeMessage::ExitSizeMove)
    }
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Space => Key::Space,

            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,

            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,

            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
