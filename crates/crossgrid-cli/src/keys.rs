//! Scripted key syntax for `crossgrid play`.

use crossgrid_builder::candidate::parse_direction;
use crossgrid_core::{Direction, EntryKey, Position};
use crossgrid_game::{Action, Cycle};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum KeyError {
    #[display("unknown key {key:?}")]
    Unknown { key: String },
    #[display("bad cell {key:?}, expected @ROW,COL")]
    BadCell { key: String },
}

/// Parses every token into actions.
///
/// Plain tokens are typed letter by letter; `@R,C` selects a cell; `<...>` is a
/// named key or an entry such as `<3-down>`.
pub(crate) fn parse_keys<S>(tokens: &[S]) -> Result<Vec<Action>, KeyError>
where
    S: AsRef<str>,
{
    let mut actions = Vec::new();
    for token in tokens {
        parse_token(token.as_ref(), &mut actions)?;
    }
    Ok(actions)
}

fn parse_token(token: &str, actions: &mut Vec<Action>) -> Result<(), KeyError> {
    if let Some(cell) = token.strip_prefix('@') {
        let pos = parse_cell(cell).ok_or_else(|| KeyError::BadCell {
            key: token.to_owned(),
        })?;
        actions.push(Action::SelectCell(pos));
        return Ok(());
    }
    if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        let action = named_key(name)
            .or_else(|| parse_entry_key(name).map(Action::SelectEntry))
            .ok_or_else(|| KeyError::Unknown {
                key: token.to_owned(),
            })?;
        actions.push(action);
        return Ok(());
    }
    actions.extend(token.chars().map(Action::InputChar));
    Ok(())
}

fn named_key(name: &str) -> Option<Action> {
    let action = match name.to_ascii_lowercase().as_str() {
        "bs" | "backspace" => Action::Backspace,
        "up" => Action::Move { dr: -1, dc: 0 },
        "down" => Action::Move { dr: 1, dc: 0 },
        "left" => Action::Move { dr: 0, dc: -1 },
        "right" => Action::Move { dr: 0, dc: 1 },
        "tab" => Action::CycleEntry(Cycle::Forward),
        "s-tab" => Action::CycleEntry(Cycle::Backward),
        "space" => Action::ToggleDirection,
        "set-across" => Action::SetDirection(Direction::Across),
        "set-down" => Action::SetDirection(Direction::Down),
        "check" => Action::CheckBoard,
        "check-word" => Action::CheckWord,
        "reveal" => Action::RevealBoard,
        "reveal-word" => Action::RevealWord,
        "clear" => Action::ClearBoard,
        "clear-progress" => Action::ClearProgress,
        _ => return None,
    };
    Some(action)
}

fn parse_cell(text: &str) -> Option<Position> {
    let (row, col) = text.split_once(',')?;
    Some(Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn parse_entry_key(text: &str) -> Option<EntryKey> {
    let split = text.find(|ch: char| !ch.is_ascii_digit())?;
    let (number, direction) = text.split_at(split);
    let direction = parse_direction(direction.trim_start_matches('-'))?;
    Some(EntryKey::new(number.parse().ok()?, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_named_keys() {
        let actions = parse_keys(&["ca", "<bs>", "<TAB>", "<check-word>"]).unwrap();
        assert_eq!(
            actions,
            [
                Action::InputChar('c'),
                Action::InputChar('a'),
                Action::Backspace,
                Action::CycleEntry(Cycle::Forward),
                Action::CheckWord,
            ]
        );
    }

    #[test]
    fn test_cells_and_entries() {
        let actions = parse_keys(&["@2,3", "<3-down>", "<12a>"]).unwrap();
        assert_eq!(
            actions,
            [
                Action::SelectCell(Position::new(2, 3)),
                Action::SelectEntry(EntryKey::new(3, Direction::Down)),
                Action::SelectEntry(EntryKey::new(12, Direction::Across)),
            ]
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_keys(&["<nope>"]),
            Err(KeyError::Unknown { .. })
        ));
        assert!(matches!(
            parse_keys(&["@1"]),
            Err(KeyError::BadCell { .. })
        ));
        assert!(matches!(
            parse_keys(&["<3-sideways>"]),
            Err(KeyError::Unknown { .. })
        ));
    }
}
