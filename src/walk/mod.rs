//! The depth first walker.
//!
//! From any cell the walker tries its neighbours in a fixed order: up, right, down, left. The
//! first open neighbour is marked and explored completely before the next direction is tried.
//! That order decides every step number written into the maze, so it must not change.
//!
//! Two strategies produce the same sequence of events: [Strategy::Recursive] uses the call stack,
//! [Strategy::Iterative] keeps its frames on the heap and is safe for mazes of any size.
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::error::{MazeError, Result};
use crate::grid::dimensions::Dimensions;
use crate::grid::Grid;
use crate::grid::BoundsMode;
use crate::types::{
    MarkableGrid, Move, OpenQueryableGrid, Position, SizeDeterminableGrid, StartLocatableGrid,
    N_MOVES,
};

mod observer;

pub use observer::{NoopObserver, PrintingObserver, TraceRecorder, WalkEvent, WalkObserver};

/// Whether to walk on the call stack or on an explicit stack
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[allow(missing_docs)]
    Recursive,
    #[allow(missing_docs)]
    Iterative,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Iterative
    }
}

/// How the step written into a newly reached cell is counted
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    /// every neighbour gets the step of the cell it was found from plus one
    Depth,
    /// each cell keeps a running counter that goes up by one for every neighbour it marks,
    /// so later branches from the same cell get larger numbers. Matches legacy traces.
    Running,
}

impl Default for StepMode {
    fn default() -> Self {
        StepMode::Depth
    }
}

/// Settings for a walk
///
/// ```
/// use maze_walk_types::walk::{Strategy, WalkConfig};
///
/// let config = WalkConfig::from_json(r#"{"strategy": "recursive"}"#).unwrap();
/// assert_eq!(config.strategy, Strategy::Recursive);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// set on the grid by every [walk] before it starts
    pub bounds: BoundsMode,
    #[allow(missing_docs)]
    pub strategy: Strategy,
    #[allow(missing_docs)]
    pub step_mode: StepMode,
}

impl WalkConfig {
    /// parse a config, missing fields take their defaults
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Counters for a finished walk
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// cells marked
    pub marks: usize,
    /// neighbours looked at, whether or not they were open
    pub neighbor_checks: usize,
    /// deepest frame, the starting cell is depth 0
    pub max_depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    position: Position,
    step: u32,
    running: u32,
    next_move: usize,
}

impl Frame {
    fn new(position: Position, step: u32) -> Self {
        Frame {
            position,
            step,
            running: step,
            next_move: 0,
        }
    }

    fn next_step(&mut self, mode: StepMode) -> u32 {
        match mode {
            StepMode::Depth => self.step + 1,
            StepMode::Running => {
                self.running += 1;
                self.running
            }
        }
    }
}

/// Locates the start cell and walks the whole maze from it with step 0.
#[instrument(level = "trace", skip_all)]
pub fn explore<D, O>(grid: &mut Grid<D>, config: &WalkConfig, observer: &mut O) -> Result<WalkStats>
where
    D: Dimensions,
    O: WalkObserver<Grid<D>>,
{
    let start = match grid.locate_start() {
        Some(start) => start,
        None => {
            warn!("maze has no start cell");
            return Err(MazeError::StartNotFound);
        }
    };
    debug!(%start, "located start");

    let stats = walk(grid, start, 0, config, observer)?;
    debug!(
        marks = stats.marks,
        neighbor_checks = stats.neighbor_checks,
        max_depth = stats.max_depth,
        "walk finished"
    );
    Ok(stats)
}

/// Walks every open cell reachable from `pos`, marking each with its step count.
///
/// `pos` is treated as already current: it is never marked itself. Positions outside the grid
/// are refused before anything is touched. Otherwise the grid is switched to `config.bounds`
/// and stays in that mode afterwards.
#[instrument(level = "trace", skip_all, fields(pos = %pos, step = step))]
pub fn walk<G, O>(
    grid: &mut G,
    pos: Position,
    step: u32,
    config: &WalkConfig,
    observer: &mut O,
) -> Result<WalkStats>
where
    G: MarkableGrid,
    O: WalkObserver<G>,
{
    if !grid.in_bounds(pos) {
        return Err(MazeError::OutOfBounds { position: pos });
    }
    grid.set_bounds_mode(config.bounds);

    let mut stats = WalkStats::default();
    match config.strategy {
        Strategy::Recursive => {
            walk_recursive(grid, Frame::new(pos, step), config.step_mode, observer, &mut stats, 0)
        }
        Strategy::Iterative => walk_iterative(grid, pos, step, config.step_mode, observer, &mut stats),
    }
    Ok(stats)
}

fn try_move<G, O>(
    grid: &mut G,
    frame: &mut Frame,
    mv: Move,
    mode: StepMode,
    observer: &mut O,
    stats: &mut WalkStats,
) -> Option<Frame>
where
    G: MarkableGrid,
    O: WalkObserver<G>,
{
    stats.neighbor_checks += 1;
    let next = grid.open_neighbor(frame.position, mv)?;
    let step = frame.next_step(mode);

    grid.mark(next, step);
    stats.marks += 1;
    trace!(from = %frame.position, to = %next, direction = %mv, step, "marked");
    observer.observe(
        &WalkEvent::Mark {
            from: frame.position,
            direction: mv,
            position: next,
            step,
        },
        grid,
    );
    Some(Frame::new(next, step))
}

fn walk_recursive<G, O>(
    grid: &mut G,
    mut frame: Frame,
    mode: StepMode,
    observer: &mut O,
    stats: &mut WalkStats,
    depth: usize,
) where
    G: MarkableGrid,
    O: WalkObserver<G>,
{
    stats.max_depth = stats.max_depth.max(depth);
    observer.observe(
        &WalkEvent::Enter {
            position: frame.position,
            step: frame.step,
        },
        grid,
    );

    for mv in Move::all() {
        if let Some(child) = try_move(grid, &mut frame, mv, mode, observer, stats) {
            walk_recursive(grid, child, mode, observer, stats, depth + 1);
        }
    }

    observer.observe(
        &WalkEvent::Exit {
            position: frame.position,
        },
        grid,
    );
}

fn walk_iterative<G, O>(
    grid: &mut G,
    pos: Position,
    step: u32,
    mode: StepMode,
    observer: &mut O,
    stats: &mut WalkStats,
) where
    G: MarkableGrid,
    O: WalkObserver<G>,
{
    let mut stack = vec![Frame::new(pos, step)];
    observer.observe(&WalkEvent::Enter { position: pos, step }, grid);

    while let Some(frame) = stack.last_mut() {
        let mv = match Move::from_index(frame.next_move) {
            Some(mv) => mv,
            None => {
                debug_assert_eq!(frame.next_move, N_MOVES);
                let position = frame.position;
                stack.pop();
                observer.observe(&WalkEvent::Exit { position }, grid);
                continue;
            }
        };
        frame.next_move += 1;

        if let Some(child) = try_move(grid, frame, mv, mode, observer, stats) {
            stack.push(child);
            stats.max_depth = stats.max_depth.max(stack.len() - 1);
            observer.observe(
                &WalkEvent::Enter {
                    position: child.position,
                    step: child.step,
                },
                grid,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use super::*;
    use crate::grid::Cell;
    use crate::wire_representation::MazeSpec;

    fn canonical() -> Grid {
        MazeSpec::canonical().to_grid().unwrap()
    }

    fn config(strategy: Strategy, step_mode: StepMode) -> WalkConfig {
        WalkConfig {
            strategy,
            step_mode,
            ..WalkConfig::default()
        }
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_canonical_mark_sequence() {
        for strategy in [Strategy::Iterative, Strategy::Recursive] {
            let mut grid = canonical();
            let mut trace = TraceRecorder::new();
            explore(&mut grid, &config(strategy, StepMode::Depth), &mut trace).unwrap();

            assert_eq!(
                trace.marks(),
                vec![
                    (p(1, 2), 1),
                    (p(1, 3), 2),
                    (p(1, 4), 3),
                    (p(1, 5), 4),
                    (p(2, 1), 1),
                    (p(3, 1), 2),
                    (p(3, 2), 3),
                    (p(3, 3), 4),
                    (p(4, 1), 3),
                    (p(5, 1), 4),
                    (p(5, 2), 5),
                    (p(5, 3), 6),
                    (p(5, 4), 7),
                    (p(5, 5), 8),
                    (p(4, 5), 9),
                    (p(3, 5), 10),
                ],
                "{:?}",
                strategy
            );
        }
    }

    #[test]
    fn test_canonical_first_mark_is_right() {
        let mut grid = canonical();
        let mut trace = TraceRecorder::new();
        explore(&mut grid, &WalkConfig::default(), &mut trace).unwrap();
        assert_eq!(
            trace.events[0],
            WalkEvent::Enter {
                position: p(1, 1),
                step: 0
            }
        );
        assert_eq!(
            trace.events[1],
            WalkEvent::Mark {
                from: p(1, 1),
                direction: Move::Right,
                position: p(1, 2),
                step: 1
            }
        );
        assert_eq!(
            trace.events.last(),
            Some(&WalkEvent::Exit { position: p(1, 1) })
        );
    }

    #[test]
    fn test_canonical_final_render() {
        let mut grid = canonical();
        explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(
            grid.render(),
            "#######\n#s1234#\n#1#####\n#234#0#\n#3###9#\n#45678#\n#######"
        );
        assert_eq!(grid.count_open(), 0);
        assert_eq!(grid.get_cell(p(1, 1)), Some(Cell::Start));
        assert!(grid
            .render()
            .chars()
            .all(|c| c == '#' || c == 's' || c == '\n' || c.is_ascii_digit()));
    }

    #[test]
    fn test_running_step_mode_matches_legacy_numbers() {
        for strategy in [Strategy::Iterative, Strategy::Recursive] {
            let mut grid = canonical();
            explore(
                &mut grid,
                &config(strategy, StepMode::Running),
                &mut NoopObserver,
            )
            .unwrap();
            assert_eq!(
                grid.render(),
                "#######\n#s1234#\n#2#####\n#345#2#\n#5###1#\n#67890#\n#######"
            );
            assert_eq!(grid.get_cell(p(3, 5)).and_then(|c| c.step()), Some(12));
        }
    }

    #[test]
    fn test_canonical_stats() {
        let mut grid = canonical();
        let stats = explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(stats.marks, 16);
        // every one of the 17 frames (start plus 16 marks) tries all four directions
        assert_eq!(stats.neighbor_checks, 17 * 4);
        assert_eq!(stats.max_depth, 10);
        let area = grid.get_width() * grid.get_height();
        assert!(stats.marks <= area);
        assert!(stats.neighbor_checks <= area * 4);
    }

    #[test]
    fn test_start_not_found() {
        let mut grid = Grid::build(&["###", "# #", "###"]).unwrap();
        let before = grid.clone();
        let err = explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, MazeError::StartNotFound));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_walk_out_of_bounds() {
        let mut grid = canonical();
        let before = grid.clone();
        let err = walk(
            &mut grid,
            p(7, 0),
            0,
            &WalkConfig::default(),
            &mut NoopObserver,
        )
        .unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { position } if position == p(7, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_walk_from_non_start_cell() {
        // the origin isn't marked up front, so the walk can come back round into it
        let mut grid = Grid::build(&["#####", "#   #", "#####"]).unwrap();
        let mut trace = TraceRecorder::new();
        walk(
            &mut grid,
            p(1, 2),
            5,
            &WalkConfig::default(),
            &mut trace,
        )
        .unwrap();
        assert_eq!(trace.marks(), vec![(p(1, 3), 6), (p(1, 2), 7), (p(1, 1), 8)]);
        assert_eq!(grid.render(), "#####\n#876#\n#####");
    }

    #[test]
    fn test_unreachable_cells_stay_open() {
        let mut grid = Grid::build(&["#######", "#s  # #", "#######"]).unwrap();
        let stats = explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(stats.marks, 2);
        assert_eq!(grid.get_cell(p(1, 5)), Some(Cell::Open));
        assert_eq!(grid.render(), "#######\n#s12# #\n#######");
    }

    #[test]
    fn test_other_characters_block_the_walk() {
        let mut grid = Grid::build(&["######", "#s x #", "######"]).unwrap();
        explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(grid.render(), "######\n#s1x #\n######");
        assert_eq!(grid.get_cell(p(1, 3)), Some(Cell::Other('x')));
        assert_eq!(grid.get_cell(p(1, 4)), Some(Cell::Open));
    }

    #[test]
    fn test_bounds_mode_on_wide_grid() {
        let spec: MazeSpec = vec!["#######", "#s    #", "#######"].into_iter().collect();

        let mut grid = spec.to_grid().unwrap();
        explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(grid.render(), "#######\n#s1234#\n#######");

        let mut grid = spec.to_grid().unwrap();
        let legacy = WalkConfig {
            bounds: BoundsMode::Legacy,
            ..WalkConfig::default()
        };
        explore(&mut grid, &legacy, &mut NoopObserver).unwrap();
        assert_eq!(grid.bounds_mode(), BoundsMode::Legacy);
        assert_eq!(grid.render(), "#######\n#s1   #\n#######");
    }

    #[test]
    fn test_walk_applies_bounds_from_config() {
        let spec: MazeSpec = vec!["#######", "#s    #", "#######"].into_iter().collect();
        let legacy = WalkConfig {
            bounds: BoundsMode::Legacy,
            ..WalkConfig::default()
        };

        let mut grid = spec.to_grid().unwrap();
        walk(&mut grid, p(1, 1), 0, &legacy, &mut NoopObserver).unwrap();
        assert_eq!(grid.render(), "#######\n#s1   #\n#######");

        // a later walk with the default config doesn't inherit the legacy mode
        grid.clear_visits();
        walk(&mut grid, p(1, 1), 0, &WalkConfig::default(), &mut NoopObserver).unwrap();
        assert_eq!(grid.bounds_mode(), BoundsMode::Corrected);
        assert_eq!(grid.render(), "#######\n#s1234#\n#######");
    }

    #[test]
    fn test_rerun_after_clear_visits() {
        let mut grid = canonical();
        let mut first = TraceRecorder::new();
        explore(&mut grid, &WalkConfig::default(), &mut first).unwrap();
        grid.clear_visits();
        let mut second = TraceRecorder::new();
        explore(&mut grid, &WalkConfig::default(), &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_printing_observer_on_canonical() {
        let mut grid = canonical();
        let mut printer = PrintingObserver::new(Vec::new());
        explore(&mut grid, &WalkConfig::default(), &mut printer).unwrap();
        let out = String::from_utf8(printer.into_inner().unwrap()).unwrap();
        let lines = out.lines().collect_vec();
        assert_eq!(lines[0], "starting exploration from grid[1][1]");
        assert_eq!(lines[1], "moving right (step=1)");
        assert_eq!(lines[2], "#######");
        assert_eq!(lines[3], "#s1   #");
        assert_eq!(lines.last(), Some(&"finished exploration from grid[1][1]"));
        assert_eq!(out.matches("moving").count(), 16);
    }

    #[test]
    fn test_config_from_json() {
        let c = WalkConfig::from_json("{}").unwrap();
        assert_eq!(c, WalkConfig::default());
        assert_eq!(c.strategy, Strategy::Iterative);
        assert_eq!(c.step_mode, StepMode::Depth);
        assert_eq!(c.bounds, BoundsMode::Corrected);

        let c = WalkConfig::from_json(
            r#"{"bounds": "legacy", "strategy": "recursive", "step_mode": "running"}"#,
        )
        .unwrap();
        assert_eq!(c.bounds, BoundsMode::Legacy);
        assert_eq!(c.strategy, Strategy::Recursive);
        assert_eq!(c.step_mode, StepMode::Running);

        assert!(WalkConfig::from_json(r#"{"strategy": "sideways"}"#).is_err());
    }

    fn random_grid(rng: &mut SmallRng) -> Grid {
        let height = rng.gen_range(1..12);
        let width = rng.gen_range(1..12);
        let start = (rng.gen_range(0..height), rng.gen_range(0..width));

        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            let mut line = String::with_capacity(width);
            for col in 0..width {
                if (row, col) == start {
                    line.push('s');
                } else if rng.gen_bool(0.3) {
                    line.push('#');
                } else {
                    line.push(' ');
                }
            }
            rows.push(line);
        }
        Grid::build(rows).unwrap()
    }

    #[test]
    fn test_random_mazes_mark_exactly_the_reachable_cells() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut grid = random_grid(&mut rng);
            let start = grid.start().unwrap();
            let reachable = grid.reachable_from(start);
            let open_before = grid.count_open();

            let stats = explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();

            assert_eq!(stats.marks, reachable.len());
            assert_eq!(grid.count_visited(), reachable.len());
            assert_eq!(grid.count_open(), open_before - reachable.len());
            for (pos, _) in grid.visited() {
                assert!(reachable.contains(&pos));
            }
            assert_eq!(grid.get_cell(start), Some(Cell::Start));

            let area = grid.get_width() * grid.get_height();
            assert!(stats.neighbor_checks <= area * 4);
        }
    }

    #[test]
    fn test_random_mazes_strategies_agree() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let grid = random_grid(&mut rng);
            for step_mode in [StepMode::Depth, StepMode::Running] {
                let mut recursive_grid = grid.clone();
                let mut recursive = TraceRecorder::new();
                let r = explore(
                    &mut recursive_grid,
                    &config(Strategy::Recursive, step_mode),
                    &mut recursive,
                )
                .unwrap();

                let mut iterative_grid = grid.clone();
                let mut iterative = TraceRecorder::new();
                let i = explore(
                    &mut iterative_grid,
                    &config(Strategy::Iterative, step_mode),
                    &mut iterative,
                )
                .unwrap();

                assert_eq!(recursive, iterative);
                assert_eq!(r, i);
                assert_eq!(recursive_grid, iterative_grid);
            }
        }
    }

    #[test]
    fn test_depth_steps_follow_their_parent() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut grid = random_grid(&mut rng);
            let mut trace = TraceRecorder::new();
            explore(&mut grid, &WalkConfig::default(), &mut trace).unwrap();
            for event in &trace.events {
                if let WalkEvent::Mark { from, step, .. } = event {
                    let parent = grid.get_cell(*from).and_then(|c| c.step()).unwrap_or(0);
                    assert_eq!(*step, parent + 1);
                }
            }
        }
    }
}
