use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::canvas::Viewport;

/// What the scene reacts to, independent of the terminal's event types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyPressed(char),
    /// A pointer press, in world units.
    PointerClicked { x: f32, y: f32 },
}

/// Translate a terminal event. Events the scene has no use for map to `None`.
pub fn translate(event: &Event, viewport: Viewport) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            match key_event.code {
                KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char('q' | 'Q') => Some(InputEvent::Quit),
                KeyCode::Char(ch) => Some(InputEvent::KeyPressed(ch.to_ascii_lowercase())),
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            column,
            row,
            ..
        }) => {
            let (x, y) = viewport.cell_to_world(*column, *row);
            Some(InputEvent::PointerClicked { x, y })
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton};

    const VIEWPORT: Viewport = Viewport::new(120, 40);

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        for event in [
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(translate(&event, VIEWPORT), Some(InputEvent::Quit));
        }
    }

    #[test]
    fn plain_keys_are_forwarded_lowercased() {
        let event = key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(translate(&event, VIEWPORT), Some(InputEvent::KeyPressed(' ')));
        let event = key(KeyCode::Char('M'), KeyModifiers::SHIFT);
        assert_eq!(translate(&event, VIEWPORT), Some(InputEvent::KeyPressed('m')));
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(release), VIEWPORT), None);
    }

    #[test]
    fn clicks_map_to_world_coordinates() {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 30,
            row: 10,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(&event, VIEWPORT),
            Some(InputEvent::PointerClicked { x: 305.0, y: 210.0 })
        );
    }

    #[test]
    fn mouse_moves_and_resizes_are_ignored() {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(&event, VIEWPORT), None);
        assert_eq!(translate(&Event::Resize(10, 10), VIEWPORT), None);
    }
}
