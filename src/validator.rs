use crate::board::{Board, CellId, RunId};
use crate::Digit;

/// Whether `digit` may go into the single empty slot it would occupy in
/// this run: no duplicate of an already-assigned digit, no provisional
/// overshoot of the target, and if the run would become full, the sum must
/// land on the target exactly.
pub fn run_allows(board: &Board, id: RunId, digit: Digit) -> bool {
    let run = board.run(id);
    let mut sum = u32::from(digit);
    let mut empty = 0usize;
    for &cell in run.cells() {
        match board.value(cell) {
            0 => empty += 1,
            v if v == digit => return false,
            v => sum += u32::from(v),
        }
    }
    if sum > run.target() {
        return false;
    }
    // empty == 1 means the candidate cell is the run's last open slot
    empty != 1 || sum == run.target()
}

/// A digit is legal for a cell only when BOTH its across and its down run
/// accept it. Passing one axis and failing the other is a rejection.
pub fn can_place(board: &Board, id: CellId, digit: Digit) -> bool {
    let cell = board.cell(id);
    run_allows(board, cell.across_run(), digit) && run_allows(board, cell.down_run(), digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "X    4/-  6/-\n-/3  .    .\n-/7  .    .\n";

    fn ids(board: &Board) -> Vec<CellId> {
        board.cell_ids().collect()
    }

    #[test]
    fn rejects_duplicate_in_run() {
        let mut board = Board::parse(SIMPLE).unwrap();
        let ids = ids(&board);
        board.set_value(ids[0], 1);
        // ids[1] shares the target-3 across run with ids[0]
        assert!(!can_place(&board, ids[1], 1));
        assert!(can_place(&board, ids[1], 2));
    }

    #[test]
    fn rejects_provisional_overshoot() {
        let board = Board::parse(SIMPLE).unwrap();
        let ids = ids(&board);
        // 4 alone already exceeds the across target of 3
        assert!(!can_place(&board, ids[0], 4));
        assert!(can_place(&board, ids[0], 1));
    }

    #[test]
    fn last_open_slot_must_hit_target() {
        let mut board = Board::parse(SIMPLE).unwrap();
        let ids = ids(&board);
        board.set_value(ids[0], 1);
        // ids[1] closes the across run: 1 + 1 = 2 misses 3, 1 + 2 hits it
        assert!(!run_allows(&board, board.across_run_of(ids[1]), 1));
        assert!(run_allows(&board, board.across_run_of(ids[1]), 2));
    }

    #[test]
    fn both_axes_must_accept() {
        let mut board = Board::parse(SIMPLE).unwrap();
        let ids = ids(&board);
        board.set_value(ids[0], 1);
        board.set_value(ids[1], 2);
        // 3 closes the down run (1 + 3 = 4) and keeps the across run open
        assert!(can_place(&board, ids[2], 3));
        // the across run would take 2, but the down run closes at 3, not 4
        assert!(!can_place(&board, ids[2], 2));
    }
}
