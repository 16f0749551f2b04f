use std::{
    fmt::Write as _,
    fs,
    io::{self, Read as _},
    path::Path,
};

use crossgrid_builder::{BuildPolicy, Candidate, build_with_report};
use crossgrid_core::{
    Cell, Crossword, DeriveOptions, Direction, Grid, Numbering, ValidationPolicy, derive_entries,
    letters::Alphabet, parse_and_validate,
};
use crossgrid_game::{ActionOutcome, CheckReport, Game, MemoryStore, Session, SnapshotStore};

use crate::{error::CliError, keys, store::FileStore};

fn read_input(path: &Path) -> Result<String, CliError> {
    let read = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

pub(crate) fn build(input: &Path, policy: &BuildPolicy, report: bool) -> Result<(), CliError> {
    let candidate = Candidate::from_json_str(&read_input(input)?)?;
    let build = build_with_report(&candidate, policy)?;
    if report {
        let report = &build.report;
        eprintln!("accepted:  {}", report.accepted);
        for (reason, count) in &report.dropped {
            eprintln!("dropped:   {count} ({reason})");
        }
        eprintln!("conflicts: {}", report.conflicts);
        for key in &report.needs_review {
            eprintln!("review:    {key}");
        }
    }
    println!("{}", serde_json::to_string_pretty(&build.crossword)?);
    Ok(())
}

pub(crate) fn number(input: &Path, language: &str, policy: &BuildPolicy) -> Result<(), CliError> {
    let grid: Grid = read_input(input)?.parse()?;
    let numbering = Numbering::compute(&grid);
    let options = DeriveOptions::default()
        .min_len(policy.answer_len())
        .alphabet(Alphabet::for_language(language));
    let entries = derive_entries(&grid, &options);

    print!("{}", render_numbered(&grid, &numbering));
    for direction in Direction::ALL {
        println!("\n{direction}:");
        for entry in entries.iter().filter(|e| e.direction == direction) {
            println!("  {:>3}  {}  {}", entry.number, entry.start(), entry.answer);
        }
    }
    Ok(())
}

fn render_numbered(grid: &Grid, numbering: &Numbering) -> String {
    let mut out = String::new();
    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let number = numbering.number_at(crossgrid_core::Position::new(row, col));
            let _ = match (cell, number) {
                (Cell::Block, _) => write!(out, "  ## "),
                (Cell::Letter(ch), Some(n)) => write!(out, "{n:>3}{ch} "),
                (Cell::Letter(ch), None) => write!(out, "   {ch} "),
            };
        }
        out.push('\n');
    }
    out
}

pub(crate) fn validate(input: &Path, policy: &ValidationPolicy) -> Result<(), CliError> {
    let crossword = parse_and_validate(&read_input(input)?, policy)?;
    println!(
        "ok: \"{}\" ({}), {size}x{size}, {} entries",
        crossword.title(),
        crossword.language(),
        crossword.entries().len(),
        size = crossword.size(),
    );
    Ok(())
}

pub(crate) fn play(
    input: &Path,
    progress: Option<&Path>,
    keys: &[String],
    policy: &ValidationPolicy,
) -> Result<(), CliError> {
    let crossword = parse_and_validate(&read_input(input)?, policy)?;
    let actions = keys::parse_keys(keys)?;
    match progress {
        Some(path) => run_session(Session::new(FileStore::new(path)), crossword, actions),
        None => run_session(Session::new(MemoryStore::new()), crossword, actions),
    }
}

fn run_session<S>(
    mut session: Session<S>,
    crossword: Crossword,
    actions: Vec<crossgrid_game::Action>,
) -> Result<(), CliError>
where
    S: SnapshotStore,
    CliError: From<S::Error>,
{
    if session.load(crossword)? {
        log::info!("resumed saved progress");
    }
    let mut last_check = None;
    for action in actions {
        if let ActionOutcome::Checked(report) = session.handle(action)? {
            last_check = Some(report);
        }
    }
    session.persist()?;

    if let Some(game) = session.game() {
        print!("{}", render_game(game, last_check.as_ref()));
    }
    Ok(())
}

fn render_game(game: &Game, check: Option<&CheckReport>) -> String {
    let mut out = game.board().to_string();
    if let Some(pos) = game.selection() {
        let _ = writeln!(out, "\ncursor: {pos} {}", game.direction());
    }
    if let Some(entry) = game.active_entry() {
        let _ = writeln!(out, "{}: {}", entry.key(), entry.clue);
    }
    if let Some(report) = check {
        let _ = writeln!(
            out,
            "check: {} wrong, {} missing",
            report.wrong.len(),
            report.missing
        );
        for pos in &report.wrong {
            let _ = writeln!(out, "  wrong at {pos}");
        }
    }
    if game.is_solved() {
        out.push_str(if game.is_solution_shown() {
            "solved (with help)\n"
        } else {
            "solved\n"
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use crossgrid_game::Action;

    use super::*;

    fn mini() -> Crossword {
        Crossword::from_grid(
            "Mini",
            "en",
            "CAT\nA#O\nBOW".parse().unwrap(),
            &DeriveOptions::default(),
            |_, answer| format!("{answer}?"),
        )
    }

    #[test]
    fn test_render_numbered() {
        let grid: Grid = "CAT\nA#O\nBOW".parse().unwrap();
        let text = render_numbered(&grid, &Numbering::compute(&grid));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("  1C "));
        assert_eq!(text.lines().nth(1).unwrap(), "  4A   ##   5O ");
    }

    #[test]
    fn test_render_game_reports_check() {
        let mut game = Game::new(mini());
        for ch in "CUT".chars() {
            game.input_char(ch);
        }
        let text = render_game(&game, Some(&game.check_word()));
        assert!(text.starts_with("CUT\n.#.\n...\n"));
        assert!(text.contains("cursor: (0, 2) across"));
        assert!(text.contains("1-across: CAT?"));
        assert!(text.contains("check: 1 wrong, 0 missing"));
        assert!(!text.contains("solved"));
    }

    #[test]
    fn test_run_session_with_memory_store() {
        let actions = keys::parse_keys(&["<reveal>"]).unwrap();
        let session = Session::new(MemoryStore::new());
        run_session(session, mini(), actions).unwrap();

        let mut session = Session::new(MemoryStore::new());
        session.load(mini()).unwrap();
        assert_eq!(
            session.handle(Action::RevealBoard).unwrap(),
            ActionOutcome::Changed
        );
        assert!(session.game().unwrap().is_solved());
    }
}
