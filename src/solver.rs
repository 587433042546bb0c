use crate::board::{Board, CellId};
use crate::validator;

/// Depth-first backtracking over the board's white cells.
///
/// The visit order is fixed at construction (the board's row-major cell
/// order) and digits are tried ascending 1..=9, so for a given board both
/// the solution that comes back and the call count are reproducible.
pub struct Solver {
    order: Vec<CellId>,
    calls: u64,
}

impl Solver {
    pub fn new(board: &Board) -> Self {
        Self { order: board.cell_ids().collect(), calls: 0 }
    }

    /// Runs the search to completion: the first fully consistent assignment
    /// wins, or every branch is exhausted and the board is handed back with
    /// all cells empty again. Meant to be called once per board.
    pub fn solve(&mut self, board: &mut Board) -> bool {
        self.search(board, 0)
    }

    /// Search invocations so far. Incremented once per entry, the terminal
    /// one included, so a board with no white cells counts exactly 1.
    pub fn call_count(&self) -> u64 {
        self.calls
    }

    fn search(&mut self, board: &mut Board, index: usize) -> bool {
        self.calls += 1;
        let Some(&cell) = self.order.get(index) else {
            // every cell placed, and each placement was validated on the way
            return true;
        };
        for digit in 1..=9 {
            if validator::can_place(board, cell, digit) {
                board.set_value(cell, digit);
                if self.search(board, index + 1) {
                    return true;
                }
                board.set_value(cell, 0);
            }
        }
        false
    }
}
