//! Piece movement geometry.
//!
//! Pure functions over coordinates; no board knowledge lives here.

use crate::piece::PieceKind;

impl PieceKind {
    /// Whether the displacement `(dx, dy)` matches this piece's shape.
    /// A zero displacement never matches.
    pub fn reaches(self, dx: i32, dy: i32) -> bool {
        let (dx, dy) = (dx.abs(), dy.abs());
        match self {
            PieceKind::Rook => (dx == 0) != (dy == 0),
            PieceKind::Bishop => dx == dy && dx > 0,
            PieceKind::Knight => (dx == 2 && dy == 1) || (dx == 1 && dy == 2),
        }
    }
}

/// Squares strictly between `from` and `to` that a sliding piece passes
/// over. Empty for knights and for displacements that are not a straight or
/// diagonal line.
pub fn path_between(kind: PieceKind, from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let straight = kind == PieceKind::Rook && (dx == 0) != (dy == 0);
    let diagonal = kind == PieceKind::Bishop && dx.abs() == dy.abs() && dx != 0;
    if !(straight || diagonal) {
        return Vec::new();
    }

    let (sx, sy) = (dx.signum(), dy.signum());
    let steps = dx.abs().max(dy.abs());
    (1..steps)
        .map(|i| (from.0 + sx * i, from.1 + sy * i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_geometry() {
        assert!(PieceKind::Rook.reaches(0, 3));
        assert!(PieceKind::Rook.reaches(-5, 0));
        assert!(!PieceKind::Rook.reaches(1, 1));
        assert!(!PieceKind::Rook.reaches(0, 0));
    }

    #[test]
    fn bishop_geometry() {
        assert!(PieceKind::Bishop.reaches(2, 2));
        assert!(PieceKind::Bishop.reaches(-3, 3));
        assert!(!PieceKind::Bishop.reaches(2, 1));
        assert!(!PieceKind::Bishop.reaches(0, 0));
    }

    #[test]
    fn knight_geometry() {
        for (dx, dy) in [(2, 1), (1, 2), (-2, 1), (2, -1), (-1, -2)] {
            assert!(PieceKind::Knight.reaches(dx, dy), "({dx}, {dy})");
        }
        assert!(!PieceKind::Knight.reaches(2, 2));
        assert!(!PieceKind::Knight.reaches(0, 0));
    }

    #[test]
    fn rook_path_is_open_interval() {
        assert_eq!(
            path_between(PieceKind::Rook, (0, 0), (0, 3)),
            vec![(0, 1), (0, 2)]
        );
        assert_eq!(
            path_between(PieceKind::Rook, (5, 2), (2, 2)),
            vec![(4, 2), (3, 2)]
        );
        assert!(path_between(PieceKind::Rook, (0, 0), (1, 0)).is_empty());
    }

    #[test]
    fn bishop_path_walks_diagonal() {
        assert_eq!(
            path_between(PieceKind::Bishop, (2, 2), (5, 5)),
            vec![(3, 3), (4, 4)]
        );
        assert_eq!(
            path_between(PieceKind::Bishop, (4, 1), (1, 4)),
            vec![(3, 2), (2, 3)]
        );
    }

    #[test]
    fn knight_and_bad_shapes_have_no_path() {
        assert!(path_between(PieceKind::Knight, (4, 4), (2, 3)).is_empty());
        assert!(path_between(PieceKind::Rook, (0, 0), (2, 2)).is_empty());
        assert!(path_between(PieceKind::Bishop, (0, 0), (2, 1)).is_empty());
    }
}
