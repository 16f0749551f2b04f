use crossgrid_core::{
    Crossword, Direction, Entry, EntryKey, Position,
    letters::{self, DiacriticPolicy},
};

use crate::{CheckReport, EntryLookup, PlayerBoard, Snapshot};

/// Result of a cell-level input operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputOperation {
    /// Nothing changed.
    NoOp,
    /// A letter was written.
    Set,
    /// A letter was erased.
    Removed,
    /// Only the cursor moved.
    Moved,
}

/// Which way [`Game::cycle_entry`] walks the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cycle {
    /// Next entry, wrapping to the first.
    Forward,
    /// Previous entry, wrapping to the last.
    Backward,
}

/// A crossword solving session.
///
/// Holds an immutable [`Crossword`] and the mutable state around it: the
/// [`PlayerBoard`], the cursor and the active direction. Every operation is total:
/// targeting a block or a position outside the grid does nothing.
///
/// # Example
///
/// ```
/// use crossgrid_core::{Crossword, DeriveOptions, Direction, Position};
/// use crossgrid_game::Game;
///
/// let crossword = Crossword::from_grid(
///     "Mini", "en", "CAT\nA#O\nBOW".parse().unwrap(),
///     &DeriveOptions::default(), |_, answer| format!("{answer}?"),
/// );
/// let mut game = Game::new(crossword);
/// assert_eq!(game.selection(), Some(Position::new(0, 0)));
///
/// for ch in "cat".chars() {
///     game.input_char(ch);
/// }
/// // The cursor stops at the edge instead of wrapping to the next word.
/// assert_eq!(game.selection(), Some(Position::new(0, 2)));
/// assert_eq!(game.check_word().wrong.len(), 0);
/// assert!(!game.is_solved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    crossword: Crossword,
    lookup: EntryLookup,
    board: PlayerBoard,
    selection: Option<Position>,
    direction: Direction,
    diacritics: DiacriticPolicy,
    solution_shown: bool,
}

impl Game {
    /// Starts a game with an empty board.
    ///
    /// The cursor starts on the first non-block cell, facing across unless only a
    /// down entry covers that cell. Typed accents are folded away unless the solution
    /// itself holds accented letters.
    #[must_use]
    pub fn new(crossword: Crossword) -> Self {
        let lookup = EntryLookup::new(&crossword);
        let board = PlayerBoard::new(crossword.grid());
        let selection = crossword
            .grid()
            .positions()
            .find(|&pos| !board.is_block(pos));
        let direction = match selection.map(|pos| lookup.at(pos)) {
            Some([None, Some(_)]) => Direction::Down,
            _ => Direction::Across,
        };
        let accented = crossword
            .grid()
            .positions()
            .filter_map(|pos| crossword.solution_at(pos))
            .any(|ch| letters::fold_diacritics(ch) != ch);
        let diacritics = if accented {
            DiacriticPolicy::Keep
        } else {
            DiacriticPolicy::Strip
        };
        Self {
            crossword,
            lookup,
            board,
            selection,
            direction,
            diacritics,
            solution_shown: false,
        }
    }

    /// The crossword being solved.
    #[must_use]
    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// The player's board.
    #[must_use]
    pub fn board(&self) -> &PlayerBoard {
        &self.board
    }

    /// The cursor.
    #[must_use]
    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// The active direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` once any answer has been revealed.
    #[must_use]
    pub fn is_solution_shown(&self) -> bool {
        self.solution_shown
    }

    /// Entry covering `pos` in `direction`.
    #[must_use]
    pub fn entry_at(&self, pos: Position, direction: Direction) -> Option<&Entry> {
        self.lookup
            .get(pos, direction)
            .map(|index| &self.crossword.entries()[index])
    }

    /// Entries covering `pos`, across first.
    pub fn entries_at(&self, pos: Position) -> impl Iterator<Item = &Entry> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.entry_at(pos, direction))
    }

    /// Entry under the cursor in the active direction.
    #[must_use]
    pub fn active_entry(&self) -> Option<&Entry> {
        self.entry_at(self.selection?, self.direction)
    }

    /// Entry under the cursor in the other direction.
    #[must_use]
    pub fn crossing_entry(&self) -> Option<&Entry> {
        self.entry_at(self.selection?, self.direction.other())
    }

    /// Returns `true` if `pos` is the first cell of both an across and a down entry.
    #[must_use]
    pub fn anchors_both(&self, pos: Position) -> bool {
        Direction::ALL
            .into_iter()
            .all(|direction| self.entry_at(pos, direction).is_some_and(|e| e.start() == pos))
    }

    /// Moves the cursor to `pos`.
    ///
    /// Selecting the current cell again toggles the direction when the cell anchors
    /// both an across and a down entry. Selecting a cell with no entry in the active
    /// direction but one in the other switches direction. Blocks are ignored.
    pub fn select_cell(&mut self, pos: Position) {
        if self.board.is_block(pos) {
            return;
        }
        if self.selection == Some(pos) {
            self.toggle_direction_at_cursor();
            return;
        }
        self.selection = Some(pos);
        if self.entry_at(pos, self.direction).is_none()
            && self.entry_at(pos, self.direction.other()).is_some()
        {
            self.direction = self.direction.other();
        }
    }

    /// Sets the active direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Switches direction if the cursor anchors both an across and a down entry.
    pub fn toggle_direction_at_cursor(&mut self) {
        if self.selection.is_some_and(|pos| self.anchors_both(pos)) {
            self.direction = self.direction.other();
        }
    }

    /// Moves the cursor to the first cell of `key` and faces its direction.
    ///
    /// Returns `false` if no such entry exists.
    pub fn select_entry(&mut self, key: EntryKey) -> bool {
        let Some(start) = self.crossword.entry(key).map(Entry::start) else {
            return false;
        };
        if self.board.is_block(start) {
            return false;
        }
        self.selection = Some(start);
        self.direction = key.direction;
        true
    }

    /// Types `ch` at the cursor and advances one cell along the active direction.
    ///
    /// `ch` must be a letter of the crossword's alphabet; it is uppercased, and its
    /// diacritics are folded when the solution has none. The cursor stops at the last
    /// cell before a block or the edge. Any other input, or a cursor on a block, is a
    /// no-op.
    pub fn input_char(&mut self, ch: char) -> InputOperation {
        let Some(pos) = self.selection else {
            return InputOperation::NoOp;
        };
        if self.board.is_block(pos) {
            return InputOperation::NoOp;
        }
        let Some(letter) = letters::canonical_letter(ch, self.crossword.alphabet(), self.diacritics)
        else {
            return InputOperation::NoOp;
        };
        self.board.set_letter(pos, letter);
        if let Some(next) = self.open_step(pos, self.direction) {
            self.selection = Some(next);
        }
        InputOperation::Set
    }

    /// Clears the cursor cell, or, if it is already empty, moves the cursor back one
    /// cell along the active direction without clearing that cell.
    pub fn backspace(&mut self) -> InputOperation {
        let Some(pos) = self.selection else {
            return InputOperation::NoOp;
        };
        if self.board.clear(pos) {
            return InputOperation::Removed;
        }
        let previous = pos
            .step_back(self.direction, self.board.size())
            .filter(|&prev| !self.board.is_block(prev));
        match previous {
            Some(prev) => {
                self.selection = Some(prev);
                InputOperation::Moved
            }
            None => InputOperation::NoOp,
        }
    }

    /// Moves the cursor by `(dr, dc)` steps, skipping blocks, to the first playable
    /// cell on that line. Stays put if there is none before the edge.
    pub fn move_by(&mut self, dr: isize, dc: isize) {
        let Some(start) = self.selection else {
            return;
        };
        if dr == 0 && dc == 0 {
            return;
        }
        let size = self.board.size();
        let target = std::iter::successors(start.offset(dr, dc, size), |pos| {
            pos.offset(dr, dc, size)
        })
        .find(|&pos| !self.board.is_block(pos));
        if let Some(pos) = target {
            self.selection = Some(pos);
        }
    }

    /// Jumps to the first cell of the next or previous entry in the active direction,
    /// wrapping at the ends. With no entry under the cursor, goes to the first (or
    /// last) entry.
    pub fn cycle_entry(&mut self, cycle: Cycle) {
        let keys: Vec<EntryKey> = self
            .crossword
            .entries_in(self.direction)
            .map(Entry::key)
            .collect();
        if keys.is_empty() {
            return;
        }
        let current = self
            .active_entry()
            .and_then(|entry| keys.iter().position(|&key| key == entry.key()));
        let len = keys.len();
        let next = match (current, cycle) {
            (Some(i), Cycle::Forward) => (i + 1) % len,
            (Some(i), Cycle::Backward) => (i + len - 1) % len,
            (None, Cycle::Forward) => 0,
            (None, Cycle::Backward) => len - 1,
        };
        self.select_entry(keys[next]);
    }

    /// Checks the active entry. Empty report without one.
    #[must_use]
    pub fn check_word(&self) -> CheckReport {
        match self.active_entry() {
            Some(entry) => CheckReport::compare(&self.crossword, &self.board, entry.positions()),
            None => CheckReport::default(),
        }
    }

    /// Checks every cell covered by an entry.
    #[must_use]
    pub fn check_board(&self) -> CheckReport {
        CheckReport::compare(&self.crossword, &self.board, self.lookup.covered())
    }

    /// Returns `true` if every covered cell holds the right letter.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.check_board().is_solved()
    }

    /// Writes the solution into the active entry. Returns `true` if the board changed.
    pub fn reveal_word(&mut self) -> bool {
        let Some(positions) = self
            .active_entry()
            .map(|entry| entry.positions().collect::<Vec<_>>())
        else {
            return false;
        };
        self.reveal(positions)
    }

    /// Writes the solution into every covered cell. Returns `true` if the board changed.
    pub fn reveal_board(&mut self) -> bool {
        let positions: Vec<_> = self.lookup.covered().collect();
        self.reveal(positions)
    }

    fn reveal(&mut self, positions: Vec<Position>) -> bool {
        if positions.is_empty() {
            return false;
        }
        self.solution_shown = true;
        let mut changed = false;
        for pos in positions {
            if let Some(letter) = self.crossword.solution_at(pos) {
                changed |= self.board.set_letter(pos, letter);
            }
        }
        changed
    }

    /// Empties every playable cell. Returns `true` if anything was typed.
    pub fn clear_board(&mut self) -> bool {
        self.board.clear_all()
    }

    /// Captures the board, cursor and direction.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.to_rows(),
            selection: self.selection,
            direction: self.direction,
        }
    }

    /// Restores a snapshot if its board has this crossword's shape.
    ///
    /// Returns `false`, changing nothing, otherwise. A stored cursor on a block or
    /// outside the grid is ignored.
    pub fn hydrate(&mut self, snapshot: &Snapshot) -> bool {
        if !self
            .board
            .restore_rows(&snapshot.board, self.crossword.alphabet())
        {
            return false;
        }
        if let Some(pos) = snapshot.selection
            && !self.board.is_block(pos)
        {
            self.selection = Some(pos);
        }
        self.direction = snapshot.direction;
        true
    }

    fn open_step(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction, self.board.size())
            .filter(|&next| !self.board.is_block(next))
    }
}

#[cfg(test)]
mod tests {
    use crossgrid_core::{DeriveOptions, Grid};
    use proptest::prelude::*;

    use super::*;

    // Entries: 1-across CAT, 6-across BOW, 1-down CAB, 3-down TOW.
    fn mini() -> Game {
        new_game("CAT\nA#O\nBOW", "en")
    }

    fn new_game(grid: &str, language: &str) -> Game {
        let grid: Grid = grid.parse().unwrap();
        Game::new(Crossword::from_grid(
            "Test",
            language,
            grid,
            &DeriveOptions::default(),
            |key, _| format!("clue {key}"),
        ))
    }

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn fill_solution(game: &mut Game) {
        let cells: Vec<_> = game
            .crossword()
            .entries()
            .iter()
            .flat_map(|e| e.cells().collect::<Vec<_>>())
            .collect();
        for (pos, ch) in cells {
            game.board.set_letter(pos, ch);
        }
    }

    #[test]
    fn test_default_selection() {
        let game = mini();
        assert_eq!(game.selection(), Some(pos(0, 0)));
        assert_eq!(game.direction(), Direction::Across);
        assert_eq!(game.active_entry().map(|e| e.answer.as_str()), Some("CAT"));
        assert_eq!(game.crossing_entry().map(|e| e.answer.as_str()), Some("CAB"));

        // First open cell only belongs to a down entry.
        let down_first = new_game("#A#\n#B#\n#C#", "en");
        assert_eq!(down_first.selection(), Some(pos(0, 1)));
        assert_eq!(down_first.direction(), Direction::Down);
    }

    #[test]
    fn test_select_same_anchor_toggles() {
        let mut game = mini();
        game.select_cell(pos(0, 0));
        assert_eq!(game.direction(), Direction::Down);
        game.select_cell(pos(0, 0));
        assert_eq!(game.direction(), Direction::Across);

        // (0, 2) anchors only 3-down: reselecting does not toggle.
        game.set_direction(Direction::Down);
        game.select_cell(pos(0, 2));
        game.select_cell(pos(0, 2));
        assert_eq!(game.direction(), Direction::Down);
    }

    #[test]
    fn test_select_switches_to_covering_direction() {
        let mut game = mini();
        game.select_cell(pos(1, 2));
        assert_eq!(game.selection(), Some(pos(1, 2)));
        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.active_entry().map(|e| e.answer.as_str()), Some("TOW"));
    }

    #[test]
    fn test_select_block_is_noop() {
        let mut game = mini();
        let before = game.clone();
        game.select_cell(pos(1, 1));
        game.select_cell(pos(9, 9));
        assert_eq!(game, before);
    }

    #[test]
    fn test_input_advances_without_wrapping() {
        let mut game = mini();
        assert_eq!(game.input_char('c'), InputOperation::Set);
        assert_eq!(game.selection(), Some(pos(0, 1)));
        game.input_char('a');
        game.input_char('t');
        assert_eq!(game.selection(), Some(pos(0, 2)));
        game.input_char('x');
        assert_eq!(game.board().letter(pos(0, 2)), Some('X'));
        assert_eq!(game.selection(), Some(pos(0, 2)));

        // Down from (0, 0): next cell is (1, 0), then (2, 0).
        game.select_cell(pos(0, 0));
        assert_eq!(game.direction(), Direction::Across);
        game.set_direction(Direction::Down);
        game.input_char('C');
        game.input_char('A');
        assert_eq!(game.selection(), Some(pos(2, 0)));
    }

    #[test]
    fn test_input_stops_before_block() {
        let mut game = new_game("AB#\nCDE\nFGH", "en");
        game.select_cell(pos(0, 1));
        assert_eq!(game.direction(), Direction::Across);
        game.input_char('B');
        assert_eq!(game.selection(), Some(pos(0, 1)));
    }

    #[test]
    fn test_input_on_block_is_noop() {
        let mut game = mini();
        game.selection = Some(pos(1, 1));
        let before = game.clone();
        assert_eq!(game.input_char('A'), InputOperation::NoOp);
        assert_eq!(game, before);
    }

    #[test]
    fn test_input_rejects_non_letters_and_folds_accents() {
        let mut game = mini();
        assert_eq!(game.input_char('1'), InputOperation::NoOp);
        assert_eq!(game.input_char(' '), InputOperation::NoOp);
        assert_eq!(game.input_char('ñ'), InputOperation::NoOp);
        assert_eq!(game.board().filled_count(), 0);

        let mut spanish = new_game("CAT\nA#O\nBOW", "es");
        spanish.input_char('ç');
        assert_eq!(spanish.board().filled_count(), 0);
        spanish.input_char('é');
        assert_eq!(spanish.board().letter(pos(0, 0)), Some('E'));
    }

    #[test]
    fn test_backspace() {
        let mut game = mini();
        game.input_char('C');
        game.input_char('A');
        assert_eq!(game.selection(), Some(pos(0, 2)));
        // (0, 2) is empty: move back without clearing (0, 1).
        assert_eq!(game.backspace(), InputOperation::Moved);
        assert_eq!(game.selection(), Some(pos(0, 1)));
        assert_eq!(game.board().letter(pos(0, 1)), Some('A'));
        assert_eq!(game.backspace(), InputOperation::Removed);
        assert_eq!(game.board().letter(pos(0, 1)), None);
        assert_eq!(game.selection(), Some(pos(0, 1)));
        game.backspace();
        assert_eq!(game.selection(), Some(pos(0, 0)));
        assert_eq!(game.backspace(), InputOperation::Removed);
        assert_eq!(game.backspace(), InputOperation::NoOp);
    }

    #[test]
    fn test_move_skips_blocks() {
        let mut game = mini();
        game.select_cell(pos(1, 0));
        game.move_by(0, 1);
        assert_eq!(game.selection(), Some(pos(1, 2)));
        game.move_by(0, 1);
        assert_eq!(game.selection(), Some(pos(1, 2)));
        game.move_by(-1, 0);
        assert_eq!(game.selection(), Some(pos(0, 2)));
        game.move_by(-1, 0);
        assert_eq!(game.selection(), Some(pos(0, 2)));

        let mut sparse = new_game("A##\n###\n##B", "en");
        sparse.move_by(1, 1);
        assert_eq!(sparse.selection(), Some(pos(2, 2)));
        sparse.move_by(0, -1);
        assert_eq!(sparse.selection(), Some(pos(2, 2)));
    }

    #[test]
    fn test_cycle_entry_wraps() {
        let mut game = mini();
        game.cycle_entry(Cycle::Forward);
        assert_eq!(game.active_entry().map(Entry::key), Some(EntryKey::new(6, Direction::Across)));
        game.cycle_entry(Cycle::Forward);
        assert_eq!(game.active_entry().map(Entry::key), Some(EntryKey::new(1, Direction::Across)));
        game.cycle_entry(Cycle::Backward);
        assert_eq!(game.selection(), Some(pos(2, 0)));

        game.set_direction(Direction::Down);
        // (2, 0) is covered by 1-down; backward wraps to 3-down.
        game.cycle_entry(Cycle::Backward);
        assert_eq!(game.active_entry().map(Entry::key), Some(EntryKey::new(3, Direction::Down)));
        assert_eq!(game.selection(), Some(pos(0, 2)));
    }

    #[test]
    fn test_select_entry() {
        let mut game = mini();
        assert!(game.select_entry(EntryKey::new(3, Direction::Down)));
        assert_eq!(game.selection(), Some(pos(0, 2)));
        assert_eq!(game.direction(), Direction::Down);
        assert!(!game.select_entry(EntryKey::new(2, Direction::Down)));
    }

    #[test]
    fn test_check_word_and_board() {
        let mut game = mini();
        for ch in "CUT".chars() {
            game.input_char(ch);
        }
        let word = game.check_word();
        assert_eq!(word.wrong.iter().copied().collect::<Vec<_>>(), [pos(0, 1)]);
        assert_eq!(word.missing, 0);

        let board = game.check_board();
        assert_eq!(board.wrong.len(), 1);
        assert_eq!(board.missing, 5);
        assert!(!board.is_solved());
        // Checks never mutate.
        assert_eq!(game.board().letter(pos(0, 1)), Some('U'));
    }

    #[test]
    fn test_correct_board_is_solved() {
        let mut game = mini();
        fill_solution(&mut game);
        let report = game.check_board();
        assert!(report.wrong.is_empty());
        assert_eq!(report.missing, 0);
        assert!(game.is_solved());
        assert!(!game.is_solution_shown());
    }

    #[test]
    fn test_reveal_word_leaves_other_cells() {
        let mut game = mini();
        game.select_cell(pos(2, 2));
        game.set_direction(Direction::Down);
        game.board.set_letter(pos(2, 0), 'X');
        assert!(game.reveal_word());
        assert!(game.is_solution_shown());
        assert_eq!(game.board().letter(pos(0, 2)), Some('T'));
        assert_eq!(game.board().letter(pos(2, 2)), Some('W'));
        assert_eq!(game.board().letter(pos(2, 0)), Some('X'));
        assert_eq!(game.board().filled_count(), 4);
    }

    #[test]
    fn test_reveal_board_then_clear() {
        let mut game = mini();
        assert!(game.reveal_board());
        assert!(game.is_solved());
        assert!(game.clear_board());
        assert_eq!(game.board().filled_count(), 0);
        assert!(game.is_solution_shown());
        assert!(!game.clear_board());
    }

    #[test]
    fn test_hydrate_round_trip() {
        let mut game = mini();
        game.input_char('C');
        game.select_cell(pos(1, 2));
        game.input_char('O');
        let snapshot = game.snapshot();

        let mut restored = mini();
        assert!(restored.hydrate(&snapshot));
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.selection(), game.selection());
        assert_eq!(restored.direction(), game.direction());
    }

    #[test]
    fn test_accented_solution_is_typeable() {
        let options = DeriveOptions::default().diacritics(DiacriticPolicy::Keep);
        let grid: Grid = "AÑO\nS#R\nAMO".parse().unwrap();
        let mut game = Game::new(Crossword::from_grid("Año", "es", grid, &options, |_, a| {
            a.to_owned()
        }));
        for ch in "añO".chars() {
            game.input_char(ch);
        }
        assert_eq!(game.board().letter(pos(0, 1)), Some('Ñ'));
        assert!(game.check_word().is_solved());
    }

    #[test]
    fn test_hydrate_keeps_accented_letters() {
        let options = DeriveOptions::default().diacritics(DiacriticPolicy::Keep);
        let grid: Grid = "AÑO\nS#R\nAMO".parse().unwrap();
        let crossword = Crossword::from_grid("Año", "es", grid, &options, |_, a| a.to_owned());
        let mut game = Game::new(crossword.clone());
        game.reveal_board();

        let mut restored = Game::new(crossword);
        assert!(restored.hydrate(&game.snapshot()));
        assert_eq!(restored.board().letter(pos(0, 1)), Some('Ñ'));
        assert_eq!(restored.board(), game.board());
        assert!(restored.is_solved());
    }

    #[test]
    fn test_hydrate_rejects_other_shape() {
        let other = new_game("ABCD\nE##F\nG##H\nIJKL", "en");
        let mut game = mini();
        let before = game.clone();
        assert!(!game.hydrate(&other.snapshot()));
        assert_eq!(game, before);
    }

    proptest! {
        #[test]
        fn cursor_never_rests_on_block(actions in prop::collection::vec(0u8..8, 0..60)) {
            let mut game = new_game("CAT#S\nA#OLE\nBOW#A\n#P#AT\nDIG##", "en");
            for action in actions {
                match action {
                    0 => { game.input_char('A'); }
                    1 => { game.backspace(); }
                    2 => game.move_by(0, 1),
                    3 => game.move_by(1, 0),
                    4 => game.move_by(0, -1),
                    5 => game.cycle_entry(Cycle::Forward),
                    6 => game.cycle_entry(Cycle::Backward),
                    _ => game.toggle_direction_at_cursor(),
                }
                let pos = game.selection().unwrap();
                prop_assert!(!game.board().is_block(pos));
            }
        }
    }
}
