use rand::{seq::SliceRandom, Rng};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub const FACELETS: usize = 24;
pub const FACE_SIZE: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Unrecognized move {0:?}, expected one of CW_X, CW_Y, CW_Z, CCW_X, CCW_Y, CCW_Z")]
    InvalidMove(String),
    #[error("Invalid cube state: {0}")]
    InvalidState(#[from] StateDefect),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateDefect {
    #[error("expected 24 facelets but got {0}")]
    Length(usize),
    #[error("unknown color {symbol:?} at position {position}")]
    Symbol { symbol: char, position: usize },
    #[error("color {color} appears {count} times, expected 4")]
    ColorCount { color: Color, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Yellow,
    Red,
    Blue,
    Green,
    Orange,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Orange,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'Y' => Some(Color::Yellow),
            'R' => Some(Color::Red),
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'O' => Some(Color::Orange),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Orange => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    CwX,
    CwY,
    CwZ,
    CcwX,
    CcwY,
    CcwZ,
}

/// Facelet permutations, one row per move in `Move::ALL` order. Entry `i`
/// of a row is the position in the previous state whose sticker lands on
/// position `i`.
const PERMUTATIONS: [[usize; FACELETS]; 6] = [
    [0, 21, 2, 23, 6, 4, 7, 5, 19, 9, 17, 11, 12, 13, 14, 15, 16, 1, 18, 3, 20, 10, 22, 8],
    [0, 1, 14, 15, 4, 5, 2, 3, 8, 9, 6, 7, 12, 13, 10, 11, 16, 17, 18, 19, 22, 20, 23, 21],
    [2, 0, 3, 1, 18, 5, 19, 7, 8, 9, 10, 11, 12, 20, 14, 21, 16, 17, 15, 13, 6, 4, 22, 23],
    [0, 17, 2, 19, 5, 7, 4, 6, 23, 9, 21, 11, 12, 13, 14, 15, 16, 10, 18, 8, 20, 1, 22, 3],
    [0, 1, 6, 7, 4, 5, 10, 11, 8, 9, 14, 15, 12, 13, 2, 3, 16, 17, 18, 19, 21, 23, 20, 22],
    [1, 3, 0, 2, 21, 5, 20, 7, 8, 9, 10, 11, 12, 19, 14, 18, 16, 17, 4, 6, 13, 15, 22, 23],
];

impl Move {
    /// Declared move order. Both solvers expand children in this order.
    pub const ALL: [Move; 6] = [
        Move::CwX,
        Move::CwY,
        Move::CwZ,
        Move::CcwX,
        Move::CcwY,
        Move::CcwZ,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Move::CwX => "CW_X",
            Move::CwY => "CW_Y",
            Move::CwZ => "CW_Z",
            Move::CcwX => "CCW_X",
            Move::CcwY => "CCW_Y",
            Move::CcwZ => "CCW_Z",
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Move::CwX => Move::CcwX,
            Move::CwY => Move::CcwY,
            Move::CwZ => Move::CcwZ,
            Move::CcwX => Move::CwX,
            Move::CcwY => Move::CwY,
            Move::CcwZ => Move::CwZ,
        }
    }

    fn permutation(&self) -> &'static [usize; FACELETS] {
        &PERMUTATIONS[*self as usize]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| CubeError::InvalidMove(s.to_owned()))
    }
}

/// Parses a whitespace or comma separated list of move names.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, CubeError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// A 2x2 cube as 24 stickers. Positions `4k..4k + 4` form face `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    facelets: [Color; FACELETS],
}

impl Cube {
    pub fn solved() -> Self {
        let mut facelets = [Color::White; FACELETS];
        for (face, color) in facelets.chunks_exact_mut(FACE_SIZE).zip(Color::ALL) {
            face.fill(color);
        }
        Self { facelets }
    }

    pub fn facelets(&self) -> &[Color; FACELETS] {
        &self.facelets
    }

    #[must_use]
    pub fn apply(self, movement: Move) -> Self {
        let perm = movement.permutation();
        Self {
            facelets: std::array::from_fn(|i| self.facelets[perm[i]]),
        }
    }

    pub fn apply_named(self, name: &str) -> Result<Self, CubeError> {
        Ok(self.apply(name.parse()?))
    }

    #[must_use]
    pub fn apply_all<'a>(self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        moves.into_iter().fold(self, |cube, &m| cube.apply(m))
    }

    /// Every face shows a single color. Faces need not differ from each other.
    pub fn is_solved(&self) -> bool {
        self.facelets
            .chunks_exact(FACE_SIZE)
            .all(|face| face.iter().all(|&c| c == face[0]))
    }

    /// Applies between 1 and `max_len` random moves, returning the result and
    /// the moves used.
    pub fn scramble<R: Rng + ?Sized>(self, rng: &mut R, max_len: usize) -> (Self, Vec<Move>) {
        let len = rng.gen_range(1..=max_len.max(1));
        let moves: Vec<Move> = (0..len)
            .filter_map(|_| Move::ALL.choose(rng).copied())
            .collect();
        (self.apply_all(&moves), moves)
    }
}

impl FromStr for Cube {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != FACELETS {
            return Err(StateDefect::Length(symbols.len()).into());
        }

        let mut facelets = [Color::White; FACELETS];
        for (position, (&symbol, slot)) in symbols.iter().zip(facelets.iter_mut()).enumerate() {
            *slot = Color::from_char(symbol).ok_or(StateDefect::Symbol { symbol, position })?;
        }

        for color in Color::ALL {
            let count = facelets.iter().filter(|&&c| c == color).count();
            if count != FACE_SIZE {
                return Err(StateDefect::ColorCount { color, count }.into());
            }
        }

        Ok(Self { facelets })
    }
}
