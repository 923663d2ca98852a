//! Square-centric ("mailbox") board representation: a flat array of optional
//! occupants indexed by `y * width + x`.
//!
//! The board is small (at most 12×12), so every query is a direct array
//! lookup and scanning all squares is cheap.

use std::fmt::{self, Write};

use crate::chess::core::{Piece, PieceKind, Player, Square};

/// Grid of squares, each holding at most one [`Piece`].
///
/// ```
/// use unvoid::chess::board::Board;
/// use unvoid::chess::core::{Piece, PieceKind, Player, Square};
///
/// let board = Board::starting(8, 8);
/// assert_eq!(
///     board.at(Square::new(1, 0)),
///     Some(Piece::new(Player::White, PieceKind::Slider))
/// );
/// assert_eq!(board.at(Square::new(-1, 0)), None);
/// assert!(board.has_royal(Player::Black));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            squares: vec![None; width * height],
        }
    }

    /// Creates the starting layout: White's royal, slider and leaper on the
    /// first three files of the first rank, Black's mirrored on the last three
    /// files of the last rank.
    ///
    /// Boards too narrow for the layout only get the pieces that fit.
    #[must_use]
    pub fn starting(width: usize, height: usize) -> Self {
        let mut board = Self::empty(width, height);
        let (Ok(right), Ok(top)) = (i32::try_from(width), i32::try_from(height)) else {
            return board;
        };
        let back_rank = [PieceKind::Royal, PieceKind::Slider, PieceKind::Leaper];
        for (offset, kind) in (0..).zip(back_rank) {
            board.place(Square::new(offset, 0), Piece::new(Player::White, kind));
            let mirrored = Square::new(right - 1 - offset, top - 1);
            if mirrored.x >= 0 && board.at(mirrored).is_none() {
                board.place(mirrored, Piece::new(Player::Black, kind));
            }
        }
        board
    }

    /// Number of files (columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of ranks (rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns true iff the square lies on this board.
    #[must_use]
    pub fn in_bounds(&self, square: Square) -> bool {
        self.index(square).is_some()
    }

    fn index(&self, square: Square) -> Option<usize> {
        let x = usize::try_from(square.x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(square.y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    /// Returns the piece standing on the square. Squares outside of the board
    /// are simply empty.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.index(square).and_then(|index| self.squares[index])
    }

    /// Puts the piece on the square, replacing any previous occupant.
    /// Off-board squares are ignored: callers are expected to check bounds.
    pub fn place(&mut self, square: Square, piece: Piece) {
        if let Some(index) = self.index(square) {
            self.squares[index] = Some(piece);
        }
    }

    /// Clears the square and returns its former occupant.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.index(square)
            .and_then(|index| self.squares[index].take())
    }

    /// Checks whether the player still has a royal piece on the board.
    #[must_use]
    pub fn has_royal(&self, player: Player) -> bool {
        self.squares
            .iter()
            .flatten()
            .any(|piece| *piece == Piece::new(player, PieceKind::Royal))
    }

    /// Iterates over occupied squares, rank by rank from the bottom.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..).zip(self.squares.chunks(self.width.max(1))).flat_map(|(y, rank)| {
            (0..)
                .zip(rank)
                .filter_map(move |(x, square)| square.map(|piece| (Square::new(x, y), piece)))
        })
    }

    /// Returns a view that renders the board with the given vacant squares
    /// marked, e.g. the destinations of a selected piece.
    #[must_use]
    pub fn highlight<'a>(&'a self, squares: &'a [Square]) -> Highlighted<'a> {
        Highlighted {
            board: self,
            squares,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, highlighted: &[Square]) -> fmt::Result {
        f.write_str("   ")?;
        for file in (b'A'..).take(self.width) {
            write!(f, " {}", char::from(file))?;
        }
        f.write_str(LINE_SEPARATOR)?;
        let marked: Vec<usize> = highlighted
            .iter()
            .filter_map(|square| self.index(*square))
            .collect();
        for (y, rank) in self.squares.chunks(self.width.max(1)).enumerate().rev() {
            write!(f, "{:2} ", y + 1)?;
            for (x, square) in rank.iter().enumerate() {
                f.write_str(SQUARE_SEPARATOR)?;
                match square {
                    Some(piece) => write!(f, "{piece}")?,
                    None if marked.contains(&(y * self.width + x)) => f.write_char('*')?,
                    None => f.write_char('.')?,
                }
            }
            f.write_str(LINE_SEPARATOR)?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    /// Draws the board top rank first: '.' for empty square, figurine symbol
    /// for a piece, file letters on top and ranks on the left.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &[])
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.width, self.height)?;
        self.render(f, &[])
    }
}

/// Board rendering with marked squares, see [`Board::highlight`].
pub struct Highlighted<'a> {
    board: &'a Board,
    squares: &'a [Square],
}

impl fmt::Display for Highlighted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.render(f, self.squares)
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_layout() {
        let board = Board::starting(8, 8);
        let pieces: Vec<_> = board
            .pieces()
            .map(|(square, piece)| (square.to_string(), piece))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("A1".to_string(), Piece::new(Player::White, PieceKind::Royal)),
                ("B1".to_string(), Piece::new(Player::White, PieceKind::Slider)),
                ("C1".to_string(), Piece::new(Player::White, PieceKind::Leaper)),
                ("F8".to_string(), Piece::new(Player::Black, PieceKind::Leaper)),
                ("G8".to_string(), Piece::new(Player::Black, PieceKind::Slider)),
                ("H8".to_string(), Piece::new(Player::Black, PieceKind::Royal)),
            ]
        );
    }

    #[test]
    fn starting_layout_non_square() {
        let board = Board::starting(12, 6);
        assert_eq!(
            board.at(Square::new(11, 5)),
            Some(Piece::new(Player::Black, PieceKind::Royal))
        );
        assert_eq!(
            board.at(Square::new(9, 5)),
            Some(Piece::new(Player::Black, PieceKind::Leaper))
        );
        assert_eq!(board.pieces().count(), 6);
    }

    #[test]
    fn degenerate_boards_do_not_panic() {
        assert_eq!(Board::starting(2, 2).pieces().count(), 4);
        assert_eq!(Board::starting(0, 0).pieces().count(), 0);
        assert!(!Board::empty(0, 0).in_bounds(Square::new(0, 0)));
    }

    #[test]
    fn bounds() {
        let board = Board::empty(6, 9);
        assert!(board.in_bounds(Square::new(0, 0)));
        assert!(board.in_bounds(Square::new(5, 8)));
        assert!(!board.in_bounds(Square::new(6, 0)));
        assert!(!board.in_bounds(Square::new(0, 9)));
        assert!(!board.in_bounds(Square::new(-1, 3)));
        assert!(!board.in_bounds(Square::new(3, -1)));
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::empty(6, 6);
        let leaper = Piece::new(Player::Black, PieceKind::Leaper);
        board.place(Square::new(2, 3), leaper);
        assert_eq!(board.at(Square::new(2, 3)), Some(leaper));
        assert_eq!(board.remove(Square::new(2, 3)), Some(leaper));
        assert_eq!(board.at(Square::new(2, 3)), None);
        assert_eq!(board.remove(Square::new(2, 3)), None);

        // Off-board mutations are no-ops.
        board.place(Square::new(6, 0), leaper);
        assert_eq!(board, Board::empty(6, 6));
        assert_eq!(board.remove(Square::new(-3, 100)), None);
    }

    #[test]
    fn royal_presence() {
        let mut board = Board::starting(6, 6);
        assert!(board.has_royal(Player::White));
        assert!(board.has_royal(Player::Black));
        let _ = board.remove(Square::new(5, 5));
        assert!(board.has_royal(Player::White));
        assert!(!board.has_royal(Player::Black));
    }

    #[test]
    fn display() {
        let board = Board::starting(6, 6);
        assert_eq!(
            board.to_string(),
            "    A B C D E F\n \
             6  . . . ♞ ♜ ♚\n \
             5  . . . . . .\n \
             4  . . . . . .\n \
             3  . . . . . .\n \
             2  . . . . . .\n \
             1  ♔ ♖ ♘ . . .\n"
        );
    }

    #[test]
    fn display_highlighted() {
        let board = Board::starting(6, 6);
        let marked = [Square::new(0, 1), Square::new(1, 1), Square::new(0, 0)];
        assert_eq!(
            board.highlight(&marked).to_string(),
            "    A B C D E F\n \
             6  . . . ♞ ♜ ♚\n \
             5  . . . . . .\n \
             4  . . . . . .\n \
             3  . . . . . .\n \
             2  * * . . . .\n \
             1  ♔ ♖ ♘ . . .\n"
        );
    }
}
