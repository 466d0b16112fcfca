use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{Direction, GameInput};
use crate::runtime::InputSource;

/// Keyboard input read from the crossterm event queue without blocking.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for KeyboardInput {
    fn drain(&mut self) -> io::Result<Vec<GameInput>> {
        let mut commands = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = map_key(key) {
                    commands.push(command);
                }
            }
        }

        Ok(commands)
    }
}

/// Maps a key press to a game command. Releases and repeats are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::TogglePause,
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => GameInput::ConfirmResume,
        KeyCode::Char('n' | 'N') => GameInput::DeclineResume,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::input::{Direction, GameInput};

    use super::map_key;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
    }

    #[test]
    fn pause_prompt_keys_resolve() {
        assert_eq!(map_key(press(KeyCode::Char('y'))), Some(GameInput::ConfirmResume));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(GameInput::DeclineResume));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::TogglePause));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }
}
