//! The screens of the editor and the switching between them.
//!
//! Exactly one screen is active at a time. The editor keeps its track while the menu or
//! the test drive is shown.

pub mod editor;
pub mod in_game;
pub mod menu;

use std::mem;

use log::{debug, info};
use track_framework_common::{
    event::ApplicationEvent, frame::FrameHandler, input::InputState, render::RenderBackend,
};

use crate::{config::EditorConfig, model::ModelCache, piece_factory::TrackPieceFactory};
use editor::EditorScreen;
use in_game::InGameScreen;
use menu::MenuScreen;

/// Models and piece templates shared by all screens.
#[derive(Debug)]
pub struct Assets {
    pub models: ModelCache,
    pub factory: TrackPieceFactory,
}

impl Assets {
    #[must_use]
    pub fn load() -> Self {
        let mut models = ModelCache::new();
        let factory = TrackPieceFactory::with_default_pieces(&mut models);
        debug!("{} models loaded", models.len());
        Self { models, factory }
    }
}

/// What a screen wants to happen after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    ToMenu,
    ToEditor,
    ToRace,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Menu,
    Editor,
    InGame,
}

#[derive(Debug)]
enum ActiveScreen {
    Menu(MenuScreen),
    Editor(EditorScreen),
    InGame(Box<InGameScreen>),
}

/// Owns the active screen and drives it from the application shell.
#[derive(Debug)]
pub struct ScreenManager {
    config: EditorConfig,
    assets: Assets,
    active: ActiveScreen,
    /// The editor while the menu is shown.
    parked_editor: Option<EditorScreen>,
    dimensions: (u32, u32),
}

impl ScreenManager {
    /// Starts on the menu.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            assets: Assets::load(),
            active: ActiveScreen::Menu(MenuScreen),
            parked_editor: None,
            dimensions: (1, 1),
        }
    }

    #[must_use]
    pub fn active(&self) -> ScreenKind {
        match self.active {
            ActiveScreen::Menu(_) => ScreenKind::Menu,
            ActiveScreen::Editor(_) => ScreenKind::Editor,
            ActiveScreen::InGame(_) => ScreenKind::InGame,
        }
    }

    /// The editor, wherever it currently is.
    #[must_use]
    pub fn editor(&self) -> Option<&EditorScreen> {
        match &self.active {
            ActiveScreen::Editor(editor) => Some(editor),
            ActiveScreen::InGame(in_game) => Some(in_game.editor()),
            ActiveScreen::Menu(_) => self.parked_editor.as_ref(),
        }
    }

    fn apply(&mut self, transition: Transition) {
        let active = mem::replace(&mut self.active, ActiveScreen::Menu(MenuScreen));
        self.active = match (active, transition) {
            (ActiveScreen::Menu(_), Transition::ToEditor) => {
                let editor = self.parked_editor.take().unwrap_or_else(|| {
                    EditorScreen::new(&self.config, &mut self.assets, self.dimensions)
                });
                ActiveScreen::Editor(editor)
            }
            (ActiveScreen::Editor(editor), Transition::ToMenu) => {
                self.parked_editor = Some(editor);
                ActiveScreen::Menu(MenuScreen)
            }
            (ActiveScreen::Editor(editor), Transition::ToRace) => {
                ActiveScreen::InGame(Box::new(InGameScreen::new(
                    editor,
                    &self.config,
                    self.dimensions,
                )))
            }
            (ActiveScreen::InGame(in_game), Transition::ToEditor) => {
                ActiveScreen::Editor(in_game.into_editor())
            }
            (active, _) => active,
        };
        info!("switched to {:?}", self.active());
    }
}

impl FrameHandler for ScreenManager {
    fn update(&mut self, delta_time: f32, input: &dyn InputState) -> Option<ApplicationEvent> {
        let transition = match &mut self.active {
            ActiveScreen::Menu(menu) => menu.update(input),
            ActiveScreen::Editor(editor) => editor.update(delta_time, input, &self.assets.factory),
            ActiveScreen::InGame(in_game) => in_game.update(delta_time, input),
        };
        match transition {
            Transition::Stay => None,
            Transition::Exit => {
                info!("leaving the editor");
                Some(ApplicationEvent::Exit)
            }
            _ => {
                self.apply(transition);
                None
            }
        }
    }

    fn render(&mut self, input: &dyn InputState, backend: &mut dyn RenderBackend) {
        match &mut self.active {
            ActiveScreen::Menu(_) => {}
            ActiveScreen::Editor(editor) => editor.render(input, backend),
            ActiveScreen::InGame(in_game) => in_game.render(backend),
        }
    }

    fn resize(&mut self, dimensions: (u32, u32)) {
        self.dimensions = dimensions;
        if let Some(editor) = self.parked_editor.as_mut() {
            editor.resize(dimensions);
        }
        match &mut self.active {
            ActiveScreen::Menu(_) => {}
            ActiveScreen::Editor(editor) => editor.resize(dimensions),
            ActiveScreen::InGame(in_game) => in_game.resize(dimensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use track_framework_common::input::{InputSnapshot, Key, MouseButton};

    use crate::testing::RecordingBackend;

    use super::*;

    fn press(manager: &mut ScreenManager, key: Key) -> Option<ApplicationEvent> {
        manager.update(0.016, &InputSnapshot::empty().with_key(key))
    }

    #[test]
    fn screens_follow_the_keys() {
        let mut manager = ScreenManager::new(EditorConfig::default());
        manager.resize((800, 600));
        assert_eq!(manager.active(), ScreenKind::Menu);
        assert!(manager.editor().is_none());

        assert_eq!(press(&mut manager, Key::Enter), None);
        assert_eq!(manager.active(), ScreenKind::Editor);

        let click = InputSnapshot::empty()
            .with_mouse_position(Vec2::new(410.0, 310.0))
            .with_button(MouseButton::Left);
        manager.update(0.016, &click);
        let occupied = |manager: &ScreenManager| {
            manager
                .editor()
                .map(|editor| editor.track().grid().occupied_count())
        };
        assert_eq!(occupied(&manager), Some(1));

        press(&mut manager, Key::Tab);
        assert_eq!(manager.active(), ScreenKind::InGame);
        assert_eq!(occupied(&manager), Some(1));

        press(&mut manager, Key::Escape);
        assert_eq!(manager.active(), ScreenKind::Editor);

        press(&mut manager, Key::Escape);
        assert_eq!(manager.active(), ScreenKind::Menu);
        assert_eq!(occupied(&manager), Some(1));

        press(&mut manager, Key::Enter);
        assert_eq!(manager.active(), ScreenKind::Editor);
        assert_eq!(occupied(&manager), Some(1));

        press(&mut manager, Key::Escape);
        assert_eq!(
            press(&mut manager, Key::Escape),
            Some(ApplicationEvent::Exit)
        );
    }

    #[test]
    fn menu_draws_nothing() {
        let mut manager = ScreenManager::new(EditorConfig::default());
        let mut backend = RecordingBackend::new((800, 600));
        manager.render(&InputSnapshot::empty(), &mut backend);
        assert!(backend.draws.is_empty());

        press(&mut manager, Key::Enter);
        manager.render(&InputSnapshot::empty(), &mut backend);
        assert!(!backend.draws.is_empty());
    }
}
