// Pocket trap detection
//
// A pocket is a cell closed by barriers on three sides. Entering it leaves only
// the way back, which a snake cannot take, so moves into pockets are redirected
// sideways.

use log::debug;

use crate::board::BoardSnapshot;
use crate::rng::{choose, RandomSource};
use crate::types::{Direction, Point};

/// The four pocket shapes, named after the direction of travel into them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapShape {
    ///  ***
    ///  *@*
    ///   ^
    Up,
    ///  **
    ///  >@*
    ///  **
    Right,
    ///   **
    ///  *@<
    ///   **
    Left,
    ///   v
    ///  *@*
    ///  ***
    Down,
}

impl TrapShape {
    /// Shapes in the order they are tested
    pub const ALL: [TrapShape; 4] = [TrapShape::Up, TrapShape::Right, TrapShape::Left, TrapShape::Down];

    /// Direction of travel that runs into the pocket
    pub fn axis(&self) -> Direction {
        match self {
            TrapShape::Up => Direction::Up,
            TrapShape::Right => Direction::Right,
            TrapShape::Left => Direction::Left,
            TrapShape::Down => Direction::Down,
        }
    }

    /// Neighbour directions that must all be barriers
    pub fn walls(&self) -> [Direction; 3] {
        match self {
            TrapShape::Up => [Direction::Left, Direction::Right, Direction::Up],
            TrapShape::Right => [Direction::Up, Direction::Down, Direction::Right],
            TrapShape::Left => [Direction::Left, Direction::Down, Direction::Up],
            TrapShape::Down => [Direction::Left, Direction::Down, Direction::Right],
        }
    }

    /// The two ways out, perpendicular to the axis
    pub fn escapes(&self) -> [Direction; 2] {
        match self.axis() {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            _ => [Direction::Up, Direction::Down],
        }
    }

    /// A wall past the board edge means the shape does not match
    fn matches(&self, board: &BoardSnapshot, point: Point) -> bool {
        self.walls().iter().all(|&dir| {
            board
                .kind_at(point.shift(dir))
                .map_or(false, |kind| kind.is_barrier())
        })
    }
}

/// First pocket shape formed around `point`, if any
pub fn trap_shape(board: &BoardSnapshot, point: Point) -> Option<TrapShape> {
    if point.is_out_of_board(board.size()) {
        return None;
    }
    TrapShape::ALL
        .iter()
        .copied()
        .find(|shape| shape.matches(board, point))
}

/// Off-board points are always traps
pub fn is_trap(board: &BoardSnapshot, point: Point) -> bool {
    point.is_out_of_board(board.size()) || trap_shape(board, point).is_some()
}

/// Redirects a move that would enter a pocket to one of its two escapes.
/// Returns `None` only for STOP or a board without our head.
pub fn check_escaped_direction(
    board: &BoardSnapshot,
    rng: &mut dyn RandomSource,
    direction: Direction,
) -> Option<Direction> {
    if direction == Direction::Stop {
        return None;
    }
    let head = board.my_head()?;
    let target = head.shift(direction);

    match trap_shape(board, target) {
        Some(shape) => {
            let escape = choose(rng, &shape.escapes());
            debug!("Trap: {:?} at {} Escape: {}", shape, target, escape);
            Some(escape)
        }
        None => {
            debug!("No trap Go: {}", direction);
            Some(direction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRandom, SeededRandom};

    fn board(rows: &[&str]) -> BoardSnapshot {
        BoardSnapshot::parse(&rows.join("\n")).expect("test board should parse")
    }

    #[test]
    fn test_escapes_are_at_right_angles_to_axis() {
        for shape in TrapShape::ALL.iter() {
            let axis = shape.axis();
            for escape in shape.escapes().iter() {
                assert_ne!(*escape, axis);
                assert_ne!(*escape, axis.opposite());
            }
        }
        assert_eq!(TrapShape::Up.escapes(), [Direction::Left, Direction::Right]);
        assert_eq!(TrapShape::Left.escapes(), [Direction::Up, Direction::Down]);
    }

    #[test]
    fn test_each_shape_is_detected() {
        let up = board(&["☼☼☼☼☼", "☼☼ ☼☼", "☼ ▲ ☼", "☼   ☼", "☼☼☼☼☼"]);
        assert_eq!(trap_shape(&up, Point::new(2, 1)), Some(TrapShape::Up));

        let down = board(&["☼☼☼☼☼", "☼ ▼ ☼", "☼☼ ☼☼", "☼☼☼☼☼", "     "]);
        assert_eq!(trap_shape(&down, Point::new(2, 2)), Some(TrapShape::Down));

        let right = board(&["☼☼☼☼☼", "☼ ☼☼☼", "☼►  ☼", "☼ ☼☼☼", "☼☼☼☼☼"]);
        assert_eq!(trap_shape(&right, Point::new(3, 2)), Some(TrapShape::Right));

        let left = board(&["☼☼☼☼☼", "☼☼ ☼☼", "☼  ◄☼", "☼☼ ☼☼", "☼☼☼☼☼"]);
        assert_eq!(trap_shape(&left, Point::new(1, 2)), Some(TrapShape::Left));
    }

    #[test]
    fn test_shapes_do_not_test_past_the_edge() {
        // (1,0) has walls left and right but nothing above it on the board
        let b = board(&["☼ ☼", "   ", " ▲ "]);
        assert_eq!(trap_shape(&b, Point::new(1, 0)), None);
        assert!(!is_trap(&b, Point::new(1, 0)));
    }

    #[test]
    fn test_off_board_is_trap() {
        let b = board(&["  ", "▲ "]);
        assert!(is_trap(&b, Point::new(-1, 1)));
        assert!(is_trap(&b, Point::new(0, 2)));
    }

    #[test]
    fn test_two_open_neighbours_is_never_a_trap() {
        let b = board(&["☼☼☼☼☼", "☼   ☼", "☼☼ ☼☼", "☼ ▲ ☼", "☼☼☼☼☼"]);
        // (2,2): walls left and right, open above and below
        assert!(!is_trap(&b, Point::new(2, 2)));
    }

    #[test]
    fn test_escape_replaces_trapped_direction() {
        let b = board(&["☼☼☼☼☼", "☼☼$☼☼", "☼ ▲ ☼", "☼   ☼", "☼☼☼☼☼"]);
        let mut first = FixedRandom(0);
        let mut second = FixedRandom(1);
        assert_eq!(
            check_escaped_direction(&b, &mut first, Direction::Up),
            Some(Direction::Left)
        );
        assert_eq!(
            check_escaped_direction(&b, &mut second, Direction::Up),
            Some(Direction::Right)
        );
        assert_eq!(
            check_escaped_direction(&b, &mut first, Direction::Down),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_escape_is_always_a_live_direction() {
        let b = board(&["☼☼☼☼☼", "☼☼$☼☼", "☼☼▲☼☼", "☼☼ ☼☼", "☼☼☼☼☼"]);
        let mut rng = SeededRandom::from_seed(3);
        for _ in 0..20 {
            for dir in Direction::live().iter() {
                let escaped = check_escaped_direction(&b, &mut rng, *dir);
                assert!(matches!(
                    escaped,
                    Some(Direction::Up | Direction::Down | Direction::Left | Direction::Right)
                ));
            }
        }
        assert_eq!(check_escaped_direction(&b, &mut rng, Direction::Stop), None);
    }

    #[test]
    fn test_no_head_gives_no_decision() {
        let b = board(&["  ", "  "]);
        let mut rng = FixedRandom(0);
        assert_eq!(check_escaped_direction(&b, &mut rng, Direction::Up), None);
    }
}
