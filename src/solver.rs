use crate::cube::{Cube, Move};
use clap::ValueEnum;
use log::{debug, info};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
    time::Instant,
};

/// Largest depth bound tried by [`solve_iddfs`] unless told otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    /// Iterative deepening DFS with a transposition table
    #[default]
    Iddfs,
    /// Breadth-first search, always optimal
    Bfs,
}

impl Method {
    /// Runs the chosen search. `max_depth` bounds the solution length for
    /// both methods.
    pub fn solve(&self, cube: &Cube, max_depth: usize) -> Option<Vec<Move>> {
        match self {
            Method::Iddfs => solve_iddfs(cube, max_depth),
            Method::Bfs => solve_bfs_bounded(cube, Some(max_depth)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Method::Iddfs => "IDDFS",
            Method::Bfs => "BFS",
        };
        write!(f, "{}", s)
    }
}

/// Result of one depth-bounded pass.
#[derive(Debug, PartialEq)]
enum Pass {
    Solved(Vec<Move>),
    /// Some unsolved node ran out of budget, so a larger bound may succeed.
    CutOff,
    /// Every reachable state was expanded without hitting the bound.
    Exhausted,
}

/// One pending node of the depth-first search. The move history is not
/// stored here: it is the shared `path` truncated to `ply`.
struct Frame {
    cube: Cube,
    ply: usize,
    remaining: usize,
    last_move: Option<Move>,
}

/// Iterative deepening depth-first search for bounds `1..=max_depth`.
///
/// A transposition table maps every expanded state to the largest remaining
/// budget it was expanded with and lives for the whole call, across all
/// bounds. A state reached again with no more budget than recorded cannot
/// lead to a solution the earlier expansion missed, so it is skipped.
///
/// Because bounds grow one at a time, the first solution found is of minimal
/// length. Among minimal solutions, the first in `Move::ALL` order wins.
pub fn solve_iddfs(cube: &Cube, max_depth: usize) -> Option<Vec<Move>> {
    let start = Instant::now();
    let mut table: HashMap<Cube, usize> = HashMap::new();

    for bound in 1..=max_depth {
        debug!("Searching at depth {bound} ({} states in table)", table.len());
        match depth_limited_search(cube, bound, &mut table) {
            Pass::Solved(moves) => {
                info!(
                    "Found a {} move solution in {:.2?} after visiting {} states",
                    moves.len(),
                    start.elapsed(),
                    table.len()
                );
                return Some(moves);
            }
            Pass::CutOff => {}
            Pass::Exhausted => {
                info!(
                    "Search space exhausted at depth {bound} in {:.2?} after visiting {} states",
                    start.elapsed(),
                    table.len()
                );
                return None;
            }
        }
    }

    info!(
        "No solution within {max_depth} moves ({:.2?}, {} states visited)",
        start.elapsed(),
        table.len()
    );
    None
}

/// Depth-first search from `root` with at most `bound` moves. Children are
/// pushed in reverse so they are popped in declared order, which visits
/// nodes in the same pre-order as the recursive formulation.
///
/// Each state first reached at ply `p < bound` gets expanded during this pass
/// with budget `bound - p`, since that beats any record from a smaller bound.
/// So if no frame is cut off at zero budget, every reachable state has been
/// expanded and larger bounds cannot find anything new.
fn depth_limited_search(root: &Cube, bound: usize, table: &mut HashMap<Cube, usize>) -> Pass {
    let mut cut_off = false;
    let mut path: Vec<Move> = Vec::with_capacity(bound);
    let mut stack = vec![Frame {
        cube: *root,
        ply: 0,
        remaining: bound,
        last_move: None,
    }];

    while let Some(frame) = stack.pop() {
        path.truncate(frame.ply.saturating_sub(1));
        if let Some(m) = frame.last_move {
            path.push(m);
        }

        if frame.cube.is_solved() {
            return Pass::Solved(path);
        }
        if frame.remaining == 0 {
            cut_off = true;
            continue;
        }
        match table.get(&frame.cube) {
            Some(&seen) if seen >= frame.remaining => continue,
            _ => {
                table.insert(frame.cube, frame.remaining);
            }
        }

        for &m in Move::ALL.iter().rev() {
            stack.push(Frame {
                cube: frame.cube.apply(m),
                ply: frame.ply + 1,
                remaining: frame.remaining - 1,
                last_move: Some(m),
            });
        }
    }

    if cut_off {
        Pass::CutOff
    } else {
        Pass::Exhausted
    }
}

/// Breadth-first search without a length bound. The first solved state
/// dequeued is at minimal distance, so the result is always optimal.
pub fn solve_bfs(cube: &Cube) -> Option<Vec<Move>> {
    solve_bfs_bounded(cube, None)
}

/// Breadth-first search that stops expanding nodes once their history
/// reaches `max_depth` moves.
pub fn solve_bfs_bounded(cube: &Cube, max_depth: Option<usize>) -> Option<Vec<Move>> {
    let start = Instant::now();
    let mut visited: HashSet<Cube> = HashSet::new();
    let mut frontier: VecDeque<(Cube, Vec<Move>)> = VecDeque::new();
    frontier.push_back((*cube, Vec::new()));
    let mut layer = 0;

    while let Some((current, moves)) = frontier.pop_front() {
        if moves.len() > layer {
            layer = moves.len();
            debug!(
                "Expanding layer {layer} ({} queued, {} visited)",
                frontier.len() + 1,
                visited.len()
            );
        }

        if current.is_solved() {
            info!(
                "Found a {} move solution in {:.2?} after visiting {} states",
                moves.len(),
                start.elapsed(),
                visited.len()
            );
            return Some(moves);
        }
        if max_depth.is_some_and(|max| moves.len() >= max) {
            continue;
        }

        for m in Move::ALL {
            let next = current.apply(m);
            if visited.insert(next) {
                let mut next_moves = moves.clone();
                next_moves.push(m);
                frontier.push_back((next, next_moves));
            }
        }
    }

    info!(
        "Search space exhausted in {:.2?} after visiting {} states",
        start.elapsed(),
        visited.len()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay_solves(cube: Cube, solution: &[Move]) -> bool {
        cube.apply_all(solution).is_solved()
    }

    #[test_log::test]
    fn test_solved_cube_needs_no_moves() {
        let cube = Cube::solved();
        assert_eq!(solve_iddfs(&cube, DEFAULT_MAX_DEPTH), Some(vec![]));
        assert_eq!(solve_bfs(&cube), Some(vec![]));
    }

    #[test_log::test]
    fn test_single_turn() {
        let cube = Cube::solved().apply(Move::CwZ);
        assert_eq!(solve_iddfs(&cube, DEFAULT_MAX_DEPTH), Some(vec![Move::CcwZ]));
        assert_eq!(solve_bfs(&cube), Some(vec![Move::CcwZ]));
    }

    #[test_log::test]
    fn test_two_turns() {
        let cube = Cube::solved().apply(Move::CwX).apply(Move::CwY);
        for solution in [solve_iddfs(&cube, DEFAULT_MAX_DEPTH), solve_bfs(&cube)] {
            let solution = solution.unwrap();
            assert!(solution.len() <= 2);
            assert!(replay_solves(cube, &solution));
        }
        assert_eq!(solve_bfs(&cube), Some(vec![Move::CcwY, Move::CcwX]));
    }

    #[test_log::test]
    fn test_every_inverse_is_found() {
        for m in Move::ALL {
            let cube = Cube::solved().apply(m);
            assert_eq!(solve_iddfs(&cube, 4), Some(vec![m.inverse()]));
            assert_eq!(solve_bfs(&cube), Some(vec![m.inverse()]));
        }
    }

    #[test_log::test]
    fn test_solvers_agree_on_length() {
        let scrambles: [&[Move]; 3] = [
            &[Move::CwX, Move::CwY, Move::CcwZ],
            &[Move::CwY, Move::CwY, Move::CwX, Move::CcwZ],
            &[Move::CcwX, Move::CwZ, Move::CwY, Move::CwX, Move::CcwY],
        ];
        for scramble in scrambles {
            let cube = Cube::solved().apply_all(scramble);
            let iddfs = solve_iddfs(&cube, DEFAULT_MAX_DEPTH).unwrap();
            let bfs = solve_bfs(&cube).unwrap();
            assert_eq!(iddfs.len(), bfs.len());
            assert!(bfs.len() <= scramble.len());
            assert!(replay_solves(cube, &iddfs));
            assert!(replay_solves(cube, &bfs));
        }
    }

    #[test_log::test]
    fn test_depth_bounds() {
        let cube = Cube::solved().apply(Move::CwX).apply(Move::CwY);
        assert_eq!(solve_iddfs(&cube, 1), None);
        assert_eq!(solve_iddfs(&cube, 0), None);
        assert_eq!(solve_bfs_bounded(&cube, Some(1)), None);
        assert_eq!(solve_bfs_bounded(&cube, Some(2)).map(|s| s.len()), Some(2));
    }

    fn unreachable_cube() -> Cube {
        // One white and one yellow sticker swapped across faces.
        "WWWYYYYWRRRRBBBBGGGGOOOO".parse().unwrap()
    }

    #[test_log::test]
    fn test_pass_outcomes() {
        let mut table = HashMap::new();
        let cube = Cube::solved().apply(Move::CwX).apply(Move::CwY);
        assert_eq!(depth_limited_search(&cube, 1, &mut table), Pass::CutOff);
        assert_eq!(
            depth_limited_search(&cube, 2, &mut table),
            Pass::Solved(vec![Move::CcwY, Move::CcwX])
        );

        let mut table = HashMap::new();
        let cube = unreachable_cube();
        for bound in 1..=3 {
            assert_eq!(depth_limited_search(&cube, bound, &mut table), Pass::CutOff);
        }
    }

    // Sweeps the whole reachable space several times. Run with `--ignored`.
    #[test_log::test]
    #[ignore]
    fn test_unreachable_state_stops_early() {
        let cube = unreachable_cube();
        assert_eq!(solve_iddfs(&cube, DEFAULT_MAX_DEPTH), None);
        assert_eq!(solve_bfs(&cube), None);
    }

    #[test_log::test]
    fn test_method_dispatch() {
        let cube = Cube::solved().apply(Move::CcwY);
        assert_eq!(Method::Iddfs.solve(&cube, 10), Some(vec![Move::CwY]));
        assert_eq!(Method::Bfs.solve(&cube, 10), Some(vec![Move::CwY]));
    }
}
