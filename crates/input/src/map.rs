//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Host-level commands for the non-Tetris demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoCommand {
    TogglePause,
    /// Advance exactly one step (useful while paused).
    Step,
    Reset,
    Randomize,
    Clear,
    CycleRules,
    ToggleWrap,
    /// Impulse on the controlled body, in unit directions.
    Push { dx: i8, dy: i8 },
}

/// Only presses and repeats; release events are ignored.
pub fn is_press(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Map keyboard input to Tetris actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Keys for the automaton demo.
pub fn handle_life_key(key: KeyEvent) -> Option<DemoCommand> {
    match key.code {
        KeyCode::Char(' ' | 'p' | 'P') => Some(DemoCommand::TogglePause),
        KeyCode::Char('n' | 'N') | KeyCode::Right => Some(DemoCommand::Step),
        KeyCode::Char('r' | 'R') => Some(DemoCommand::Randomize),
        KeyCode::Char('c' | 'C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(DemoCommand::Clear)
        }
        KeyCode::Tab | KeyCode::Char('m' | 'M') => Some(DemoCommand::CycleRules),
        KeyCode::Char('t' | 'T') => Some(DemoCommand::ToggleWrap),
        _ => None,
    }
}

/// Keys for the physics demo.
pub fn handle_bounce_key(key: KeyEvent) -> Option<DemoCommand> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'a') => Some(DemoCommand::Push { dx: -1, dy: 0 }),
        KeyCode::Right | KeyCode::Char('l' | 'd') => Some(DemoCommand::Push { dx: 1, dy: 0 }),
        KeyCode::Up | KeyCode::Char('k' | 'w') => Some(DemoCommand::Push { dx: 0, dy: -1 }),
        KeyCode::Down | KeyCode::Char('j' | 's') => Some(DemoCommand::Push { dx: 0, dy: 1 }),
        KeyCode::Char(' ' | 'p' | 'P') => Some(DemoCommand::TogglePause),
        KeyCode::Char('n' | 'N') => Some(DemoCommand::Step),
        KeyCode::Char('r' | 'R') => Some(DemoCommand::Reset),
        _ => None,
    }
}

/// Check if key should quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Rotate)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_demo_keys() {
        assert_eq!(
            handle_life_key(KeyEvent::from(KeyCode::Char('n'))),
            Some(DemoCommand::Step)
        );
        assert_eq!(
            handle_life_key(KeyEvent::from(KeyCode::Tab)),
            Some(DemoCommand::CycleRules)
        );
        assert_eq!(
            handle_life_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            handle_bounce_key(KeyEvent::from(KeyCode::Up)),
            Some(DemoCommand::Push { dx: 0, dy: -1 })
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_release_is_not_press() {
        let press = KeyEvent::from(KeyCode::Left);
        assert!(is_press(press));
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!is_press(release));
    }
}
