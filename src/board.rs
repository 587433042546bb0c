use crate::Digit;
use anyhow::{bail, Result};
use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos { pub r: usize, pub c: usize }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId(usize);

/// One white cell. `across`/`down` are resolved during construction and are
/// guaranteed to point at real runs afterwards.
#[derive(Clone, Debug)]
pub struct Cell {
    pub pos: Pos,
    pub value: Digit,
    across: RunId,
    down: RunId,
}

impl Cell {
    pub fn across_run(&self) -> RunId { self.across }
    pub fn down_run(&self) -> RunId { self.down }
}

/// A sum-and-uniqueness constraint group: 1..=9 cells that must add up to
/// `target` with no repeated digit. Runs borrow cells from the board arena.
#[derive(Clone, Debug)]
pub struct Run {
    target: u32,
    cells: Vec<CellId>,
}

impl Run {
    pub fn target(&self) -> u32 { self.target }
    pub fn cells(&self) -> &[CellId] { &self.cells }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    fn values<'a>(&'a self, cells: &'a [Cell]) -> impl Iterator<Item = Digit> + 'a {
        self.cells.iter().map(|&CellId(i)| cells[i].value)
    }

    /// Sum of the currently assigned (nonzero) cells.
    pub fn current_sum(&self, cells: &[Cell]) -> u32 {
        self.values(cells).map(u32::from).sum()
    }

    pub fn has_duplicate(&self, cells: &[Cell]) -> bool {
        self.values(cells).filter(|&v| v != 0).duplicates().next().is_some()
    }

    /// Early-prune signal: the run already overshot its target, or it is
    /// fully assigned without hitting it.
    pub fn is_overfull(&self, cells: &[Cell]) -> bool {
        let sum = self.current_sum(cells);
        sum > self.target || (self.values(cells).all(|v| v != 0) && sum != self.target)
    }

    pub fn is_satisfied(&self, cells: &[Cell]) -> bool {
        self.values(cells).all(|v| v != 0)
            && !self.has_duplicate(cells)
            && self.current_sum(cells) == self.target
    }
}

#[derive(Clone, Copy, Debug)]
enum Tile {
    Blocked,
    /// Clue targets for the runs starting after this tile; 0 = no run that way.
    Clue { down: u32, across: u32 },
    White(CellId),
}

/// The full puzzle: tile surface, cell arena, and run arenas. Cells are
/// created in row-major scan order, which fixes the solver's visit order.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    cells: Vec<Cell>,
    runs: Vec<Run>,
    across: Vec<RunId>,
    down: Vec<RunId>,
}

impl Board {
    /// Parses a token grid. Tokens: `X` blocked, `.` or `0` a cell to fill,
    /// `d/a` a clue (down sum / across sum, `-` or `0` for no run that way).
    ///
    /// Fails on ragged rows, unknown tokens, clue targets outside 1..=45,
    /// runs longer than 9 cells, and any white cell left without an across
    /// or a down run. A board that parses is safe to hand to the solver.
    pub fn parse(text: &str) -> Result<Self> {
        let grid: Vec<Vec<&str>> = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split_whitespace().collect())
            .collect();
        if grid.is_empty() {
            bail!("board text has no rows");
        }
        let rows = grid.len();
        let cols = grid[0].len();

        let mut tiles = Vec::with_capacity(rows * cols);
        let mut positions = Vec::new();
        for (r, line) in grid.iter().enumerate() {
            if line.len() != cols {
                bail!("row {r} has {} tokens, expected {cols}", line.len());
            }
            for (c, &token) in line.iter().enumerate() {
                tiles.push(match token {
                    "X" => Tile::Blocked,
                    "." | "0" => {
                        let id = CellId(positions.len());
                        positions.push(Pos { r, c });
                        Tile::White(id)
                    }
                    t if t.contains('/') => {
                        let (down, across) = parse_clue(t, r, c)?;
                        Tile::Clue { down, across }
                    }
                    t => bail!("unknown token {t:?} at row {r}, col {c}"),
                });
            }
        }

        let mut runs: Vec<Run> = Vec::new();
        let mut across_runs = Vec::new();
        let mut down_runs = Vec::new();
        let mut across_of: Vec<Option<RunId>> = vec![None; positions.len()];
        let mut down_of: Vec<Option<RunId>> = vec![None; positions.len()];

        let white = |r: usize, c: usize| match tiles[r * cols + c] {
            Tile::White(id) => Some(id),
            _ => None,
        };
        for r in 0..rows {
            for c in 0..cols {
                let Tile::Clue { down, across } = tiles[r * cols + c] else { continue };
                if across > 0 {
                    // collect contiguous white cells to the right of the clue
                    let members: Vec<CellId> =
                        ((c + 1)..cols).map_while(|cc| white(r, cc)).collect();
                    if !members.is_empty() {
                        let id = new_run(&mut runs, across, members, &mut across_of)?;
                        across_runs.push(id);
                    }
                }
                if down > 0 {
                    let members: Vec<CellId> =
                        ((r + 1)..rows).map_while(|rr| white(rr, c)).collect();
                    if !members.is_empty() {
                        let id = new_run(&mut runs, down, members, &mut down_of)?;
                        down_runs.push(id);
                    }
                }
            }
        }

        // Every white cell needs both memberships; anything else is an
        // ill-formed puzzle and must never reach the solver.
        let cells = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| {
                let (Some(across), Some(down)) = (across_of[i], down_of[i]) else {
                    let missing = if across_of[i].is_none() { "across" } else { "down" };
                    bail!("cell at row {}, col {} has no {missing} run", pos.r, pos.c);
                };
                Ok(Cell { pos, value: 0, across, down })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows, cols, tiles, cells, runs, across: across_runs, down: down_runs })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn cell_at(&self, pos: Pos) -> Option<&Cell> {
        if pos.r >= self.rows || pos.c >= self.cols {
            return None;
        }
        match self.tiles[pos.r * self.cols + pos.c] {
            Tile::White(CellId(i)) => Some(&self.cells[i]),
            _ => None,
        }
    }

    /// All white cells in their fixed row-major creation order.
    pub fn cells(&self) -> &[Cell] { &self.cells }

    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId)
    }

    pub fn cell(&self, CellId(i): CellId) -> &Cell { &self.cells[i] }
    pub fn value(&self, CellId(i): CellId) -> Digit { self.cells[i].value }

    pub(crate) fn set_value(&mut self, CellId(i): CellId, value: Digit) {
        self.cells[i].value = value;
    }

    /// Clears every cell back to empty, ready for a fresh search.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.value = 0;
        }
    }

    pub fn run(&self, RunId(i): RunId) -> &Run { &self.runs[i] }
    pub fn runs(&self) -> impl Iterator<Item = &Run> { self.runs.iter() }

    pub fn across_runs(&self) -> impl Iterator<Item = &Run> {
        self.across.iter().map(|&RunId(i)| &self.runs[i])
    }

    pub fn down_runs(&self) -> impl Iterator<Item = &Run> {
        self.down.iter().map(|&RunId(i)| &self.runs[i])
    }

    pub fn across_run_of(&self, id: CellId) -> RunId { self.cell(id).across }
    pub fn down_run_of(&self, id: CellId) -> RunId { self.cell(id).down }

    /// Whole-board confirmation: every run fully assigned, duplicate-free,
    /// and on target. The solver validates each placement on the way, so
    /// this is a redundant final check for callers that want one.
    pub fn is_complete(&self) -> bool {
        self.runs.iter().all(|run| run.is_satisfied(&self.cells))
    }

    /// Renders the grid with the original clue tokens; white cells show
    /// their digit, or `.` while still empty.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        for r in 0..self.rows {
            let line = (0..self.cols)
                .map(|c| {
                    let token = match self.tiles[r * self.cols + c] {
                        Tile::Blocked => "X".to_string(),
                        Tile::Clue { down, across } => {
                            format!("{}/{}", fmt_target(down), fmt_target(across))
                        }
                        Tile::White(CellId(i)) => match self.cells[i].value {
                            0 => ".".to_string(),
                            v => v.to_string(),
                        },
                    };
                    format!("{token:>5}")
                })
                .join(" ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn fmt_target(t: u32) -> String {
    if t == 0 { "-".to_string() } else { t.to_string() }
}

fn parse_clue(token: &str, r: usize, c: usize) -> Result<(u32, u32)> {
    let Some((down, across)) = token.split_once('/') else {
        bail!("malformed clue {token:?} at row {r}, col {c}");
    };
    Ok((parse_target(down, token, r, c)?, parse_target(across, token, r, c)?))
}

fn parse_target(part: &str, token: &str, r: usize, c: usize) -> Result<u32> {
    if part == "-" || part == "0" {
        return Ok(0);
    }
    let Ok(t) = part.parse::<u32>() else {
        bail!("malformed clue {token:?} at row {r}, col {c}");
    };
    if !(1..=45).contains(&t) {
        bail!("clue target {t} out of range at row {r}, col {c}");
    }
    Ok(t)
}

fn new_run(
    runs: &mut Vec<Run>,
    target: u32,
    members: Vec<CellId>,
    membership: &mut [Option<RunId>],
) -> Result<RunId> {
    if members.len() > 9 {
        bail!("run of {} cells cannot hold distinct digits 1-9", members.len());
    }
    let id = RunId(runs.len());
    for &CellId(i) in &members {
        membership[i] = Some(id);
    }
    runs.push(Run { target, cells: members });
    Ok(id)
}
