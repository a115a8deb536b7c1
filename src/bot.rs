// Snake Battle decision logic
//
// The bot walks a fixed list of tiers and takes the first one that yields a move:
//   1. a collectible on a neighbouring cell
//   2. the first step toward the nearest gold or apple on the whole board
//   3. any empty neighbouring cell
//   4. give up for this round
//
// Cross-tick state lives in `SessionMemory`, owned by the caller.

use log::{debug, info, warn};
use std::collections::VecDeque;

use crate::board::BoardSnapshot;
use crate::config::Config;
use crate::rng::{choose, RandomSource};
use crate::trap;
use crate::types::{Action, CellKind, Direction, Point, GOODS, GOODS_WITH_POINTS};

use crate::types::Direction::{Down, Left, Right, Up};

/// Neighbour scan orders; one is drawn at random for every neighbour search
pub const ROTATIONS: [[Direction; 4]; 6] = [
    [Left, Right, Up, Down],
    [Left, Up, Right, Down],
    [Right, Down, Up, Left],
    [Right, Up, Left, Down],
    [Down, Left, Up, Right],
    [Up, Left, Down, Right],
];

/// State carried from one tick to the next
#[derive(Debug, Clone)]
pub struct SessionMemory {
    last_direction: Option<Direction>,
    history: VecDeque<Point>,
    capacity: usize,
}

impl SessionMemory {
    pub fn new(capacity: usize) -> Self {
        SessionMemory {
            last_direction: None,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// A head in the start area means a new life, so old history is dropped
    pub fn begin_tick(&mut self, board: &BoardSnapshot, head: Point) {
        if board.is_start_area(head) {
            debug!("Head {} in start area, clearing {} history points", head, self.history.len());
            self.history.clear();
        }
    }

    /// Remembers a targeted point, evicting the oldest beyond capacity
    pub fn remember(&mut self, point: Point) {
        if self.capacity == 0 {
            return;
        }
        while self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(point);
    }

    pub fn is_loop(&self, point: &Point) -> bool {
        self.history.contains(point)
    }

    pub fn record_direction(&mut self, direction: Direction) {
        self.last_direction = Some(direction);
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn history(&self) -> impl Iterator<Item = &Point> {
        self.history.iter()
    }
}

/// Heuristic Snake Battle bot
/// Holds static configuration; all per-run state is passed in
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    /// Fresh session memory sized from configuration
    pub fn new_memory(&self) -> SessionMemory {
        SessionMemory::new(self.config.strategy.history_capacity)
    }

    /// Computes the action for one tick and updates `memory`
    ///
    /// Always returns either a live direction or an exit with STOP.
    pub fn decide(
        &self,
        board: &BoardSnapshot,
        memory: &mut SessionMemory,
        rng: &mut dyn RandomSource,
    ) -> Action {
        if let Some(head) = board.my_head() {
            memory.begin_tick(board, head);
        }

        let action = Self::choose_action(board, memory, rng);
        memory.record_direction(action.direction);
        action
    }

    fn choose_action(
        board: &BoardSnapshot,
        memory: &mut SessionMemory,
        rng: &mut dyn RandomSource,
    ) -> Action {
        let head = match board.my_head() {
            Some(head) => head,
            None => {
                warn!("Own head not found on board, giving up this round");
                return Action::exit();
            }
        };
        debug!("My position: {}", head);

        // Tier 1: goods right next to us
        if let Some(direction) = Self::search_any_good_neighbor(board, head, rng) {
            if let Some(checked) = trap::check_escaped_direction(board, rng, direction) {
                info!("Good on {} Go to {}", direction, checked);
                memory.remember(head.shift(checked));
                return Action::step(checked);
            }
        }

        // Tier 2: nearest gold or apple anywhere on the board
        if let Some(direction) =
            Self::search_nearest_good_step(board, head, memory.last_direction(), rng)
        {
            if board.is_acceptable(head.shift(direction)) {
                if let Some(checked) = trap::check_escaped_direction(board, rng, direction) {
                    let next = head.shift(checked);
                    if memory.is_loop(&next) {
                        let opposite = checked.opposite();
                        let back = head.shift(opposite);
                        if board.is_acceptable(back) {
                            info!("Loop at {} Go to {} instead of {}", next, opposite, checked);
                            // History holds where the head actually goes, not the skipped cell
                            memory.remember(back);
                            return Action::step(opposite);
                        }
                    }

                    info!("Nearest good on {} Go to {}", direction, checked);
                    memory.remember(next);
                    return Action::step(checked);
                }
            }
        }

        // Tier 3: any free neighbour
        if let Some(direction) = Self::search_neighbor_direction(board, head, CellKind::None, rng) {
            if let Some(checked) = trap::check_escaped_direction(board, rng, direction) {
                info!("Empty on {} Go to {}", direction, checked);
                memory.remember(head.shift(checked));
                return Action::step(checked);
            }
        }

        info!("No viable move, requesting exit");
        Action::exit()
    }

    /// Direction of the most valuable neighbouring good, if any
    pub fn search_any_good_neighbor(
        board: &BoardSnapshot,
        head: Point,
        rng: &mut dyn RandomSource,
    ) -> Option<Direction> {
        GOODS
            .iter()
            .find_map(|&good| Self::search_neighbor_direction(board, head, good, rng))
    }

    /// Direction of a neighbour holding `kind`, scanning in a random rotation
    pub fn search_neighbor_direction(
        board: &BoardSnapshot,
        head: Point,
        kind: CellKind,
        rng: &mut dyn RandomSource,
    ) -> Option<Direction> {
        let rotation = choose(rng, &ROTATIONS);
        rotation
            .iter()
            .copied()
            .find(|&dir| board.kind_at(head.shift(dir)) == Some(kind))
    }

    /// First step toward the nearest acceptable gold or apple
    pub fn search_nearest_good_step(
        board: &BoardSnapshot,
        head: Point,
        last_direction: Option<Direction>,
        rng: &mut dyn RandomSource,
    ) -> Option<Direction> {
        let target = board
            .find_all_sorted_by_distance(head, &GOODS_WITH_POINTS)
            .into_iter()
            .find(|&point| board.is_acceptable(point))?;
        debug!("Nearest acceptable good at {}", target);

        Self::first_step_direction(head, target, last_direction, rng)
    }

    /// Single-axis step from `from` toward `to`, x axis first.
    /// A step that would reverse `last_direction` turns sideways instead.
    pub fn first_step_direction(
        from: Point,
        to: Point,
        last_direction: Option<Direction>,
        rng: &mut dyn RandomSource,
    ) -> Option<Direction> {
        let (step, sideways) = if to.x > from.x {
            (Right, [Up, Down])
        } else if to.x < from.x {
            (Left, [Up, Down])
        } else if to.y > from.y {
            (Down, [Right, Left])
        } else if to.y < from.y {
            (Up, [Right, Left])
        } else {
            return None;
        };

        if last_direction == Some(step.opposite()) {
            Some(choose(rng, &sideways))
        } else {
            Some(step)
        }
    }
}
