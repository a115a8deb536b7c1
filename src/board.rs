// Board snapshot and spatial queries
//
// A snapshot is parsed from the raw board string once per tick and never
// mutated afterwards. Positions are row-major: index = y * size + x.

use std::fmt;
use thiserror::Error;

use crate::trap;
use crate::types::{CellKind, Direction, Point, HEAD_KINDS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board string is empty")]
    Empty,

    #[error("Board string of {len} cells is not a square")]
    NotSquare { len: usize },

    #[error("Unknown board symbol {symbol:?} at index {index}")]
    UnknownSymbol { symbol: char, index: usize },

    #[error("Point [{x},{y}] is outside a board of size {size}")]
    OutOfRange { x: i32, y: i32, size: usize },
}

/// Immutable square grid of cell kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    size: usize,
    cells: Vec<CellKind>,
}

impl BoardSnapshot {
    /// Parses a raw board string, ignoring newlines
    pub fn parse(raw: &str) -> Result<Self, BoardError> {
        let cells = raw
            .chars()
            .filter(|&c| c != '\n' && c != '\r')
            .enumerate()
            .map(|(index, symbol)| {
                CellKind::from_symbol(symbol).ok_or(BoardError::UnknownSymbol { symbol, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.is_empty() {
            return Err(BoardError::Empty);
        }

        let size = (cells.len() as f64).sqrt() as usize;
        if size * size != cells.len() {
            return Err(BoardError::NotSquare { len: cells.len() });
        }

        Ok(BoardSnapshot { size, cells })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        if point.is_out_of_board(self.size) {
            None
        } else {
            Some(point.y as usize * self.size + point.x as usize)
        }
    }

    pub fn point_at(&self, index: usize) -> Point {
        Point::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// Cell kind at `point`, failing for points off the board
    pub fn element_at(&self, point: Point) -> Result<CellKind, BoardError> {
        self.kind_at(point).ok_or(BoardError::OutOfRange {
            x: point.x,
            y: point.y,
            size: self.size,
        })
    }

    /// Total variant of `element_at`
    pub fn kind_at(&self, point: Point) -> Option<CellKind> {
        self.index_of(point).map(|i| self.cells[i])
    }

    pub fn has_element_at(&self, point: Point, kinds: &[CellKind]) -> bool {
        self.kind_at(point).map_or(false, |k| kinds.contains(&k))
    }

    /// First position in row-major order holding one of `kinds`
    pub fn find_first(&self, kinds: &[CellKind]) -> Option<Point> {
        self.cells
            .iter()
            .position(|k| kinds.contains(k))
            .map(|i| self.point_at(i))
    }

    /// Every position holding one of `kinds`, in row-major order
    pub fn find_all(&self, kinds: &[CellKind]) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| kinds.contains(k))
            .map(|(i, _)| self.point_at(i))
            .collect()
    }

    /// Like `find_all`, ordered by Euclidean distance from `origin`.
    /// Equal distances keep row-major order.
    pub fn find_all_sorted_by_distance(&self, origin: Point, kinds: &[CellKind]) -> Vec<Point> {
        let mut found = self.find_all(kinds);
        // sort_by is stable
        found.sort_by(|a, b| {
            origin
                .distance_to(a)
                .partial_cmp(&origin.distance_to(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        found
    }

    /// Position of our own head, whatever state it is in
    pub fn my_head(&self) -> Option<Point> {
        self.find_first(&HEAD_KINDS)
    }

    pub fn head_kind(&self) -> Option<CellKind> {
        self.my_head().and_then(|p| self.kind_at(p))
    }

    pub fn am_i_evil(&self) -> bool {
        self.head_kind() == Some(CellKind::HeadEvil)
    }

    pub fn am_i_flying(&self) -> bool {
        self.head_kind() == Some(CellKind::HeadFly)
    }

    /// A sleeping head, or a point bordering the start floor, is in the start area
    pub fn is_start_area(&self, point: Point) -> bool {
        self.kind_at(point) == Some(CellKind::HeadSleep)
            || Direction::live()
                .iter()
                .any(|&dir| self.kind_at(point.shift(dir)) == Some(CellKind::StartFloor))
    }

    /// Off-board points count as barriers
    pub fn is_barrier(&self, point: Point) -> bool {
        self.kind_at(point).map_or(true, |k| k.is_barrier())
    }

    /// A point we may move onto: on the board, not a pocket trap, and
    /// holding either nothing or a collectible
    pub fn is_acceptable(&self, point: Point) -> bool {
        match self.kind_at(point) {
            Some(kind) => kind.is_walkable() && !trap::is_trap(self, point),
            None => false,
        }
    }

    pub fn walls(&self) -> Vec<Point> {
        self.find_all(&[CellKind::Wall])
    }

    pub fn stones(&self) -> Vec<Point> {
        self.find_all(&[CellKind::Stone])
    }

    pub fn apples(&self) -> Vec<Point> {
        self.find_all(&[CellKind::Apple])
    }

    pub fn gold(&self) -> Vec<Point> {
        self.find_all(&[CellKind::Gold])
    }

    pub fn flying_pills(&self) -> Vec<Point> {
        self.find_all(&[CellKind::FlyingPill])
    }

    pub fn fury_pills(&self) -> Vec<Point> {
        self.find_all(&[CellKind::FuryPill])
    }

    pub fn start_points(&self) -> Vec<Point> {
        self.find_all(&[CellKind::StartFloor])
    }

    pub fn barriers(&self) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_barrier())
            .map(|(i, _)| self.point_at(i))
            .collect()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|k| k.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
