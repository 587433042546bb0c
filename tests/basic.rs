use kakuro::{logger::SolveLogger, Board, Pos};
use pretty_assertions::assert_eq;
use std::path::Path;

const SIMPLE: &str = include_str!("../boards/simple.txt");

#[test]
fn parse_counts_cells_and_runs() {
    let board = Board::parse(SIMPLE).unwrap();
    assert_eq!(board.rows(), 3);
    assert_eq!(board.cols(), 3);
    assert_eq!(board.cells().len(), 4);
    assert_eq!(board.across_runs().count(), 2);
    assert_eq!(board.down_runs().count(), 2);
    assert_eq!(board.runs().count(), 4);
}

#[test]
fn zero_and_dash_spell_the_same_board() {
    let board = Board::parse("X    4/0  6/0\n0/3  0    0\n0/7  .    .\n").unwrap();
    assert_eq!(board.cells().len(), 4);
    assert_eq!(board.runs().count(), 4);
}

#[test]
fn cell_lookup_by_position() {
    let board = Board::parse(SIMPLE).unwrap();
    assert!(board.cell_at(Pos { r: 1, c: 1 }).is_some());
    assert!(board.cell_at(Pos { r: 0, c: 0 }).is_none()); // blocked
    assert!(board.cell_at(Pos { r: 0, c: 1 }).is_none()); // clue
    assert!(board.cell_at(Pos { r: 9, c: 9 }).is_none()); // out of bounds
}

#[test]
fn membership_is_wired_both_ways() {
    let board = Board::parse(SIMPLE).unwrap();
    for id in board.cell_ids() {
        let across = board.run(board.across_run_of(id));
        let down = board.run(board.down_run_of(id));
        assert!(across.cells().contains(&id));
        assert!(down.cells().contains(&id));
    }
}

#[test]
fn rejects_cell_without_down_run() {
    let err = Board::parse("X  -/3  .  .\n").unwrap_err();
    assert!(err.to_string().contains("no down run"), "{err}");
}

#[test]
fn rejects_cell_without_across_run() {
    let err = Board::parse("X  3/-\nX  .\n").unwrap_err();
    assert!(err.to_string().contains("no across run"), "{err}");
}

#[test]
fn rejects_ragged_rows() {
    let err = Board::parse("X X\nX\n").unwrap_err();
    assert!(err.to_string().contains("expected 2"), "{err}");
}

#[test]
fn rejects_unknown_token() {
    let err = Board::parse("X ?\nX X\n").unwrap_err();
    assert!(err.to_string().contains("unknown token"), "{err}");
}

#[test]
fn rejects_clue_target_out_of_range() {
    let err = Board::parse("X  46/-\n-/9  .\n").unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");
}

#[test]
fn rejects_run_longer_than_nine_cells() {
    let err = Board::parse("-/45 . . . . . . . . . .\n").unwrap_err();
    assert!(err.to_string().contains("run of 10"), "{err}");
}

#[test]
fn rejects_blank_text() {
    assert!(Board::parse("").is_err());
    assert!(Board::parse("  \n \n").is_err());
}

#[test]
fn board_with_no_white_cells_parses() {
    let board = Board::parse("X  X\nX  X\n").unwrap();
    assert_eq!(board.cells().len(), 0);
    assert_eq!(board.runs().count(), 0);
}

#[test]
fn pretty_print_keeps_clue_tokens() {
    let board = Board::parse(SIMPLE).unwrap();
    let text = board.to_pretty_string();
    assert!(text.contains("4/-"));
    assert!(text.contains("-/3"));
    assert!(text.contains('X'));
    assert!(text.contains('.'));
}

#[test]
fn logger_writes_numbered_reports_up_to_cap() {
    let mut logger = SolveLogger::new("reports_test", false, false, 2).unwrap();
    logger.log("first", "a").unwrap();
    logger.log("second", "b").unwrap();
    logger.log("third, over the cap", "c").unwrap();
    assert!(Path::new("reports_test/report-1.txt").exists());
    assert!(Path::new("reports_test/report-2.txt").exists());
    assert!(!Path::new("reports_test/report-3.txt").exists());
}
