use track_framework_common::input::{InputState, Key};

use super::Transition;

/// The title screen. Enter opens the editor, Escape quits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuScreen;

impl MenuScreen {
    #[must_use]
    pub fn update(&self, input: &dyn InputState) -> Transition {
        if input.is_key_just_pressed(Key::Escape) {
            Transition::Exit
        } else if input.is_key_just_pressed(Key::Enter) {
            Transition::ToEditor
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use track_framework_common::input::InputSnapshot;

    use super::*;

    #[test]
    fn keys_leave_the_menu() {
        let menu = MenuScreen;
        assert_eq!(menu.update(&InputSnapshot::empty()), Transition::Stay);
        assert_eq!(
            menu.update(&InputSnapshot::empty().with_key(Key::Enter)),
            Transition::ToEditor
        );
        assert_eq!(
            menu.update(&InputSnapshot::empty().with_key(Key::Escape)),
            Transition::Exit
        );
    }
}
