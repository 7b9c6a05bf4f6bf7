use std::time::Instant;

use winit::dpi::PhysicalSize;

use crate::input::{InputEvent, InputKey, Key, MouseButton};

use super::message::{NativeMessage, SysCommand};
use super::state::{FocusState, WindowState};

/// Character injected alongside a Delete key press.
pub const DELETE_CHAR: u32 = 0x7f;

/// Translation switches that differ between window flavors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TranslateOptions {
    /// Deliver back/forward buttons even while the window is in the background.
    pub extra_buttons_ignore_focus: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            extra_buttons_ignore_focus: true,
        }
    }
}

/// Effect of one message, applied by the window core in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WindowAction {
    Input(InputEvent),
    /// Commit a size to the surface.
    Resize(PhysicalSize<u32>),
    Quit,
}

/// Result of translating a single native message.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub actions: Vec<WindowAction>,

    /// The message should also reach the platform's default handling.
    pub pass_through: bool,
}

impl Translation {
    fn handled(actions: Vec<WindowAction>) -> Self {
        Self { actions, pass_through: false }
    }

    fn forwarded(actions: Vec<WindowAction>) -> Self {
        Self { actions, pass_through: true }
    }
}

/// Maps one native message to its semantic effects.
///
/// Mutations are limited to `state`; everything else is returned as actions so
/// the caller decides where they go. `now` stamps physical key interactions.
pub fn translate(
    msg: &NativeMessage,
    state: &mut WindowState,
    opts: &TranslateOptions,
    now: Instant,
) -> Translation {
    match *msg {
        NativeMessage::ButtonDown(button) => {
            Translation::handled(gated_button(state, opts, button, InputEvent::Press))
        }
        NativeMessage::ButtonUp(button) => {
            Translation::handled(gated_button(state, opts, button, InputEvent::Release))
        }

        NativeMessage::KeyDown(key) => {
            let mut actions = key_actions(InputEvent::Press(key.into()), now);
            if key == Key::Delete {
                actions.push(WindowAction::Input(InputEvent::Char(DELETE_CHAR)));
            }
            Translation::handled(actions)
        }
        NativeMessage::KeyUp(key) => {
            Translation::handled(key_actions(InputEvent::Release(key.into()), now))
        }
        NativeMessage::SysKeyDown(key) => {
            Translation::handled(key_actions(InputEvent::Press(key.into()), now))
        }
        NativeMessage::SysKeyUp(key) => {
            Translation::handled(key_actions(InputEvent::Release(key.into()), now))
        }

        NativeMessage::Char(code) => {
            Translation::handled(vec![WindowAction::Input(InputEvent::Char(code))])
        }

        NativeMessage::MouseWheel(delta) => {
            if state.is_active() {
                state.scroll += delta;
            }
            Translation::handled(Vec::new())
        }

        NativeMessage::Close => {
            state.quit_requested = true;
            Translation::handled(vec![WindowAction::Quit])
        }

        NativeMessage::SetFocus => {
            state.focus = FocusState::Active;
            Translation::handled(Vec::new())
        }
        NativeMessage::KillFocus => {
            state.focus = FocusState::Background;
            Translation::handled(Vec::new())
        }

        NativeMessage::SysCommand(cmd) => match cmd {
            SysCommand::Restore => {
                // The size notification follows this command.
                state.resize.on_restore();
                Translation::forwarded(Vec::new())
            }
            // Swallowed so Alt does not open the window menu.
            SysCommand::KeyMenu => Translation::handled(Vec::new()),
            SysCommand::Other => Translation::forwarded(Vec::new()),
        },

        NativeMessage::Size { width, height, mode } => {
            let actions = state
                .resize
                .on_size(width, height, mode)
                .map(WindowAction::Resize)
                .into_iter()
                .collect();
            Translation::forwarded(actions)
        }

        NativeMessage::ExitSizeMove => {
            Translation::forwarded(vec![WindowAction::Resize(state.resize.on_exit_size_move())])
        }

        NativeMessage::Other => Translation::forwarded(Vec::new()),
    }
}

fn gated_button(
    state: &WindowState,
    opts: &TranslateOptions,
    button: MouseButton,
    event: fn(InputKey) -> InputEvent,
) -> Vec<WindowAction> {
    let always = button.is_extra() && opts.extra_buttons_ignore_focus;
    if always || state.is_active() {
        vec![WindowAction::Input(event(InputKey::Mouse(button)))]
    } else {
        // Still consumed, just not delivered.
        Vec::new()
    }
}

fn key_actions(event: InputEvent, now: Instant) -> Vec<WindowAction> {
    vec![
        WindowAction::Input(event),
        WindowAction::Input(InputEvent::PhysicalKey(now)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::message::SizeMode;

    fn run(msg: NativeMessage, state: &mut WindowState) -> Translation {
        translate(&msg, state, &TranslateOptions::default(), Instant::now())
    }

    fn background() -> WindowState {
        WindowState { focus: FocusState::Background, ..WindowState::default() }
    }

    fn inputs(t: &Translation) -> Vec<InputEvent> {
        t.actions
            .iter()
            .filter_map(|a| match a {
                WindowAction::Input(ev) => Some(*ev),
                _ => None,
            })
            .collect()
    }

    // ── mouse buttons ─────────────────────────────────────────────────────

    #[test]
    fn left_button_delivered_when_active() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::ButtonDown(MouseButton::Left), &mut s);
        assert_eq!(inputs(&t), vec![InputEvent::Press(MouseButton::Left.into())]);
        assert!(!t.pass_through);
    }

    #[test]
    fn primary_buttons_suppressed_in_background() {
        let mut s = background();
        for b in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            let down = run(NativeMessage::ButtonDown(b), &mut s);
            let up = run(NativeMessage::ButtonUp(b), &mut s);
            assert!(down.actions.is_empty());
            assert!(up.actions.is_empty());
            // Consumed, not forwarded.
            assert!(!down.pass_through);
        }
    }

    #[test]
    fn extra_buttons_ignore_focus() {
        for focus in [FocusState::Active, FocusState::Background] {
            let mut s = WindowState { focus, ..WindowState::default() };
            let t = run(NativeMessage::ButtonDown(MouseButton::Back), &mut s);
            assert_eq!(inputs(&t), vec![InputEvent::Press(MouseButton::Back.into())]);
            let t = run(NativeMessage::ButtonUp(MouseButton::Forward), &mut s);
            assert_eq!(inputs(&t), vec![InputEvent::Release(MouseButton::Forward.into())]);
        }
    }

    #[test]
    fn extra_buttons_can_be_focus_gated() {
        let mut s = background();
        let opts = TranslateOptions { extra_buttons_ignore_focus: false };
        let t = translate(&NativeMessage::ButtonDown(MouseButton::Back), &mut s, &opts, Instant::now());
        assert!(t.actions.is_empty());
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn key_down_marks_physical_interaction() {
        let mut s = WindowState::default();
        let now = Instant::now();
        let t = translate(&NativeMessage::KeyDown(Key::A), &mut s, &TranslateOptions::default(), now);
        assert_eq!(
            inputs(&t),
            vec![InputEvent::Press(Key::A.into()), InputEvent::PhysicalKey(now)]
        );
    }

    #[test]
    fn delete_press_then_delete_char() {
        let mut s = WindowState::default();
        let now = Instant::now();
        let t = translate(&NativeMessage::KeyDown(Key::Delete), &mut s, &TranslateOptions::default(), now);
        assert_eq!(
            inputs(&t),
            vec![
                InputEvent::Press(Key::Delete.into()),
                InputEvent::PhysicalKey(now),
                InputEvent::Char(DELETE_CHAR),
            ]
        );
    }

    #[test]
    fn sys_key_down_has_no_delete_char() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::SysKeyDown(Key::Delete), &mut s);
        assert_eq!(t.actions.len(), 2);
    }

    #[test]
    fn keys_delivered_in_background() {
        let mut s = background();
        let t = run(NativeMessage::KeyUp(Key::Escape), &mut s);
        assert_eq!(inputs(&t)[0], InputEvent::Release(Key::Escape.into()));
    }

    #[test]
    fn char_passes_raw_code() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::Char(0x263a), &mut s);
        assert_eq!(inputs(&t), vec![InputEvent::Char(0x263a)]);
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_accumulates_only_when_active() {
        let mut s = background();
        run(NativeMessage::MouseWheel(120.0), &mut s);
        assert_eq!(s.scroll, 0.0);

        s.focus = FocusState::Active;
        run(NativeMessage::MouseWheel(120.0), &mut s);
        assert_eq!(s.scroll, 120.0);
        run(NativeMessage::MouseWheel(-40.0), &mut s);
        assert_eq!(s.scroll, 80.0);
    }

    // ── focus + close ─────────────────────────────────────────────────────

    #[test]
    fn focus_messages_toggle_state() {
        let mut s = WindowState::default();
        run(NativeMessage::KillFocus, &mut s);
        assert_eq!(s.focus, FocusState::Background);
        run(NativeMessage::SetFocus, &mut s);
        assert_eq!(s.focus, FocusState::Active);
    }

    #[test]
    fn close_requests_quit() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::Close, &mut s);
        assert_eq!(t.actions, vec![WindowAction::Quit]);
        assert!(s.quit_requested);
    }

    // ── sizing + system commands ──────────────────────────────────────────

    #[test]
    fn size_is_forwarded_and_commits_when_armed() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::Size { width: 10, height: 20, mode: SizeMode::Restored }, &mut s);
        assert!(t.pass_through);
        assert_eq!(t.actions, vec![WindowAction::Resize(PhysicalSize::new(10, 20))]);
    }

    #[test]
    fn key_menu_is_swallowed() {
        let mut s = WindowState::default();
        let t = run(NativeMessage::SysCommand(SysCommand::KeyMenu), &mut s);
        assert!(!t.pass_through);
    }

    #[test]
    fn restore_rearms_and_forwards() {
        let mut s = WindowState::default();
        s.resize.check_resize = false;
        let t = run(NativeMessage::SysCommand(SysCommand::Restore), &mut s);
        assert!(t.pass_through);
        assert!(t.actions.is_empty());
        assert!(s.resize.check_resize);
    }

    #[test]
    fn unknown_messages_pass_through_untouched() {
        let mut s = WindowState::default();
        let before = s.clone();
        let t = run(NativeMessage::Other, &mut s);
        assert!(t.pass_through);
        assert!(t.actions.is_empty());
        assert_eq!(s, before);
    }
}
