//! Cell → owning entries table.

use crossgrid_core::{Crossword, Direction, Position};

/// For every cell, the index (into [`Crossword::entries`]) of the across and down
/// entry covering it.
///
/// Built once per loaded crossword so navigation never rescans the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLookup {
    size: usize,
    cells: Vec<[Option<usize>; 2]>,
}

impl EntryLookup {
    /// Builds the table. Entries running off the grid are skipped; if two entries of
    /// one direction overlap, the earlier keeps the cell.
    #[must_use]
    pub fn new(crossword: &Crossword) -> Self {
        let size = crossword.size();
        let mut cells = vec![[None; 2]; size * size];
        for (index, entry) in crossword.entries().iter().enumerate() {
            if !entry.fits_within(size) {
                log::warn!("entry {} runs off the grid; not navigable", entry.key());
                continue;
            }
            for pos in entry.positions() {
                let slot = &mut cells[pos.row * size + pos.col][entry.direction.index()];
                slot.get_or_insert(index);
            }
        }
        Self { size, cells }
    }

    /// Entry index covering `pos` in `direction`.
    #[must_use]
    pub fn get(&self, pos: Position, direction: Direction) -> Option<usize> {
        self.at(pos)[direction.index()]
    }

    /// Across and down entry indices covering `pos`.
    #[must_use]
    pub fn at(&self, pos: Position) -> [Option<usize>; 2] {
        if pos.is_within(self.size) {
            self.cells[pos.row * self.size + pos.col]
        } else {
            [None; 2]
        }
    }

    /// Returns `true` if some entry covers `pos`.
    #[must_use]
    pub fn is_covered(&self, pos: Position) -> bool {
        self.at(pos).iter().any(Option::is_some)
    }

    /// Iterates every covered position in row-major order.
    pub fn covered(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all(self.size).filter(|&pos| self.is_covered(pos))
    }
}
