// Snake Battle board types
// Symbols follow the codenjoy snakebattle protocol

use std::fmt;
use std::str::FromStr;

/// Every symbol that can appear on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    None,
    Wall,
    StartFloor,
    Other,
    Apple,
    Stone,
    FlyingPill,
    FuryPill,
    Gold,

    // Own head, one variant per state
    HeadDown,
    HeadLeft,
    HeadRight,
    HeadUp,
    HeadDead,
    HeadEvil,
    HeadFly,
    HeadSleep,

    // Own tail
    TailEndDown,
    TailEndLeft,
    TailEndUp,
    TailEndRight,
    TailInactive,

    // Own body
    BodyHorizontal,
    BodyVertical,
    BodyLeftDown,
    BodyLeftUp,
    BodyRightDown,
    BodyRightUp,

    // Enemy heads
    EnemyHeadDown,
    EnemyHeadLeft,
    EnemyHeadRight,
    EnemyHeadUp,
    EnemyHeadDead,
    EnemyHeadEvil,
    EnemyHeadFly,
    EnemyHeadSleep,

    // Enemy tails
    EnemyTailEndDown,
    EnemyTailEndLeft,
    EnemyTailEndUp,
    EnemyTailEndRight,
    EnemyTailInactive,

    // Enemy body
    EnemyBodyHorizontal,
    EnemyBodyVertical,
    EnemyBodyLeftDown,
    EnemyBodyLeftUp,
    EnemyBodyRightDown,
    EnemyBodyRightUp,
}

/// All own-head variants, in the order used to locate our snake
pub const HEAD_KINDS: [CellKind; 8] = [
    CellKind::HeadDead,
    CellKind::HeadDown,
    CellKind::HeadUp,
    CellKind::HeadLeft,
    CellKind::HeadRight,
    CellKind::HeadEvil,
    CellKind::HeadFly,
    CellKind::HeadSleep,
];

/// Collectibles in the order they are preferred next to the head
pub const GOODS: [CellKind; 4] = [
    CellKind::Gold,
    CellKind::Apple,
    CellKind::FlyingPill,
    CellKind::FuryPill,
];

/// Collectibles worth chasing across the whole board (pills are excluded)
pub const GOODS_WITH_POINTS: [CellKind; 2] = [CellKind::Gold, CellKind::Apple];

impl CellKind {
    /// Parses a board symbol
    pub fn from_symbol(symbol: char) -> Option<CellKind> {
        use CellKind::*;
        let kind = match symbol {
            ' ' => None,
            '☼' => Wall,
            '#' => StartFloor,
            '?' => Other,
            '○' => Apple,
            '●' => Stone,
            '©' => FlyingPill,
            '®' => FuryPill,
            '$' => Gold,

            '▼' => HeadDown,
            '◄' => HeadLeft,
            '►' => HeadRight,
            '▲' => HeadUp,
            '☻' => HeadDead,
            '♥' => HeadEvil,
            '♠' => HeadFly,
            '&' => HeadSleep,

            '╙' => TailEndDown,
            '╘' => TailEndLeft,
            '╓' => TailEndUp,
            '╕' => TailEndRight,
            '~' => TailInactive,

            '═' => BodyHorizontal,
            '║' => BodyVertical,
            '╗' => BodyLeftDown,
            '╝' => BodyLeftUp,
            '╔' => BodyRightDown,
            '╚' => BodyRightUp,

            '˅' => EnemyHeadDown,
            '<' => EnemyHeadLeft,
            '>' => EnemyHeadRight,
            '˄' => EnemyHeadUp,
            '☺' => EnemyHeadDead,
            '♣' => EnemyHeadEvil,
            '♦' => EnemyHeadFly,
            'ø' => EnemyHeadSleep,

            '¤' => EnemyTailEndDown,
            '×' => EnemyTailEndLeft,
            'æ' => EnemyTailEndUp,
            'ö' => EnemyTailEndRight,
            '*' => EnemyTailInactive,

            '─' => EnemyBodyHorizontal,
            '│' => EnemyBodyVertical,
            '┐' => EnemyBodyLeftDown,
            '┘' => EnemyBodyLeftUp,
            '┌' => EnemyBodyRightDown,
            '└' => EnemyBodyRightUp,

            _ => return Option::None,
        };
        Some(kind)
    }

    /// Returns the board symbol for this kind
    pub fn symbol(&self) -> char {
        use CellKind::*;
        match self {
            None => ' ',
            Wall => '☼',
            StartFloor => '#',
            Other => '?',
            Apple => '○',
            Stone => '●',
            FlyingPill => '©',
            FuryPill => '®',
            Gold => '$',

            HeadDown => '▼',
            HeadLeft => '◄',
            HeadRight => '►',
            HeadUp => '▲',
            HeadDead => '☻',
            HeadEvil => '♥',
            HeadFly => '♠',
            HeadSleep => '&',

            TailEndDown => '╙',
            TailEndLeft => '╘',
            TailEndUp => '╓',
            TailEndRight => '╕',
            TailInactive => '~',

            BodyHorizontal => '═',
            BodyVertical => '║',
            BodyLeftDown => '╗',
            BodyLeftUp => '╝',
            BodyRightDown => '╔',
            BodyRightUp => '╚',

            EnemyHeadDown => '˅',
            EnemyHeadLeft => '<',
            EnemyHeadRight => '>',
            EnemyHeadUp => '˄',
            EnemyHeadDead => '☺',
            EnemyHeadEvil => '♣',
            EnemyHeadFly => '♦',
            EnemyHeadSleep => 'ø',

            EnemyTailEndDown => '¤',
            EnemyTailEndLeft => '×',
            EnemyTailEndUp => 'æ',
            EnemyTailEndRight => 'ö',
            EnemyTailInactive => '*',

            EnemyBodyHorizontal => '─',
            EnemyBodyVertical => '│',
            EnemyBodyLeftDown => '┐',
            EnemyBodyLeftUp => '┘',
            EnemyBodyRightDown => '┌',
            EnemyBodyRightUp => '└',
        }
    }

    /// Cells that block movement
    pub fn is_barrier(&self) -> bool {
        matches!(
            self,
            CellKind::Wall
                | CellKind::Stone
                | CellKind::StartFloor
                | CellKind::TailInactive
                | CellKind::EnemyTailInactive
                | CellKind::EnemyHeadSleep
        )
    }

    /// Collectible goods
    pub fn is_good(&self) -> bool {
        GOODS.contains(self)
    }

    /// Segments of our own snake behind the head
    pub fn is_body_segment(&self) -> bool {
        matches!(
            self,
            CellKind::BodyHorizontal
                | CellKind::BodyVertical
                | CellKind::BodyLeftDown
                | CellKind::BodyLeftUp
                | CellKind::BodyRightDown
                | CellKind::BodyRightUp
                | CellKind::TailEndDown
                | CellKind::TailEndLeft
                | CellKind::TailEndUp
                | CellKind::TailEndRight
        )
    }

    /// Any symbol that marks our own head
    pub fn is_head_variant(&self) -> bool {
        HEAD_KINDS.contains(self)
    }

    /// Any part of an enemy snake
    pub fn is_enemy(&self) -> bool {
        use CellKind::*;
        matches!(
            self,
            EnemyHeadDown
                | EnemyHeadLeft
                | EnemyHeadRight
                | EnemyHeadUp
                | EnemyHeadDead
                | EnemyHeadEvil
                | EnemyHeadFly
                | EnemyHeadSleep
                | EnemyTailEndDown
                | EnemyTailEndLeft
                | EnemyTailEndUp
                | EnemyTailEndRight
                | EnemyTailInactive
                | EnemyBodyHorizontal
                | EnemyBodyVertical
                | EnemyBodyLeftDown
                | EnemyBodyLeftUp
                | EnemyBodyRightDown
                | EnemyBodyRightUp
        )
    }

    /// Goods or empty floor: the only kinds a move may land on
    pub fn is_walkable(&self) -> bool {
        self.is_good() || *self == CellKind::None
    }
}

/// 2D coordinate on the board, (0, 0) is the top-left corner
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// True when the point lies outside a board of the given side
    pub fn is_out_of_board(&self, size: usize) -> bool {
        let size = size as i32;
        self.x < 0 || self.y < 0 || self.x >= size || self.y >= size
    }

    /// Neighbouring point one step in `direction`; STOP stays in place
    pub fn shift(&self, direction: Direction) -> Point {
        match direction {
            Direction::Up => Point::new(self.x, self.y - 1),
            Direction::Down => Point::new(self.x, self.y + 1),
            Direction::Left => Point::new(self.x - 1, self.y),
            Direction::Right => Point::new(self.x + 1, self.y),
            Direction::Stop => *self,
        }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Movement directions understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Only used together with an exit request
    Stop,
}

impl Direction {
    /// Returns the four live movement directions
    pub fn live() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to the wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Stop => "STOP",
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Stop => Direction::Stop,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            "STOP" => Ok(Direction::Stop),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// Wire token sent when the agent gives up the round
pub const EXIT_TOKEN: &str = "ACT";

/// One decision for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub exit_requested: bool,
    pub direction: Direction,
}

impl Action {
    pub fn step(direction: Direction) -> Self {
        Action {
            exit_requested: false,
            direction,
        }
    }

    pub fn exit() -> Self {
        Action {
            exit_requested: true,
            direction: Direction::Stop,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exit_requested {
            f.write_str(EXIT_TOKEN)
        } else {
            f.write_str(self.direction.as_str())
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == EXIT_TOKEN {
            Ok(Action::exit())
        } else {
            s.parse::<Direction>().map(Action::step)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SYMBOLS: &str = " ☼#?○●©®$▼◄►▲☻♥♠&╙╘╓╕~═║╗╝╔╚˅<>˄☺♣♦ø¤×æö*─│┐┘┌└";

    #[test]
    fn test_every_symbol_round_trips() {
        for symbol in ALL_SYMBOLS.chars() {
            let kind = CellKind::from_symbol(symbol)
                .unwrap_or_else(|| panic!("symbol {:?} should parse", symbol));
            assert_eq!(kind.symbol(), symbol);
        }
        assert_eq!(CellKind::from_symbol('Q'), None);
    }

    #[test]
    fn test_capability_classes_do_not_overlap() {
        for symbol in ALL_SYMBOLS.chars() {
            let kind = CellKind::from_symbol(symbol).unwrap();
            let classes = [
                kind.is_good(),
                kind.is_body_segment(),
                kind.is_head_variant(),
                kind == CellKind::None,
            ];
            assert!(
                classes.iter().filter(|&&c| c).count() <= 1,
                "{:?} belongs to more than one class",
                kind
            );
            if kind.is_walkable() {
                assert!(!kind.is_barrier() && !kind.is_enemy());
            }
        }
    }

    #[test]
    fn test_barrier_kinds() {
        assert!(CellKind::Wall.is_barrier());
        assert!(CellKind::Stone.is_barrier());
        assert!(CellKind::StartFloor.is_barrier());
        assert!(CellKind::TailInactive.is_barrier());
        assert!(CellKind::EnemyHeadSleep.is_barrier());
        assert!(!CellKind::EnemyHeadUp.is_barrier());
        assert!(!CellKind::BodyVertical.is_barrier());
    }

    #[test]
    fn test_shift_uses_screen_orientation() {
        let p = Point::new(2, 2);
        assert_eq!(p.shift(Direction::Up), Point::new(2, 1));
        assert_eq!(p.shift(Direction::Down), Point::new(2, 3));
        assert_eq!(p.shift(Direction::Left), Point::new(1, 2));
        assert_eq!(p.shift(Direction::Right), Point::new(3, 2));
        assert_eq!(p.shift(Direction::Stop), p);
    }

    #[test]
    fn test_out_of_board() {
        assert!(Point::new(-1, 0).is_out_of_board(4));
        assert!(Point::new(0, 4).is_out_of_board(4));
        assert!(!Point::new(3, 3).is_out_of_board(4));
    }

    #[test]
    fn test_action_wire_tokens() {
        assert_eq!(Action::step(Direction::Left).to_string(), "LEFT");
        assert_eq!(Action::exit().to_string(), "ACT");
        assert_eq!("ACT".parse::<Action>(), Ok(Action::exit()));
        assert_eq!("down".parse::<Action>(), Ok(Action::step(Direction::Down)));
        assert!("sideways".parse::<Action>().is_err());
    }

    #[test]
    fn test_opposite_is_involution() {
        assert_eq!(Direction::Stop.opposite(), Direction::Stop);
        for dir in Direction::live().iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }
}
