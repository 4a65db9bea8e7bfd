//! Move validation.
//!
//! Checks run in a fixed order and stop at the first failure: bounds, walls,
//! occupancy, geometry, then the sliding path. Any integer target is
//! accepted; out-of-range input simply answers `false`.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::movement::path_between;
use crate::piece::{piece_at, sides_present, Piece};

/// Which variant of the rules a level plays under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Single color: walls exist and every piece blocks every other.
    Solo,
    /// Two colors: no walls, alternating turns, captures of the other color.
    Duel,
}

impl Ruleset {
    /// Duel when both sides are on a wall-free board and every piece is
    /// colored. Anything else plays as Solo with colors ignored.
    pub fn detect(grid: &Grid, pieces: &[Piece]) -> Ruleset {
        let (white, black) = sides_present(pieces);
        let all_colored = pieces.iter().all(|p| p.color.is_some());
        if white && black && all_colored && grid.wall_count() == 0 {
            Ruleset::Duel
        } else {
            Ruleset::Solo
        }
    }
}

/// Whether `pieces[mover]` may move to `(tx, ty)`.
pub fn is_legal(
    ruleset: Ruleset,
    grid: &Grid,
    pieces: &[Piece],
    mover: usize,
    tx: i32,
    ty: i32,
) -> bool {
    let Some(piece) = pieces.get(mover) else {
        return false;
    };

    if !grid.in_bounds(tx, ty) {
        return false;
    }

    if ruleset == Ruleset::Solo && grid.is_wall(tx, ty) {
        return false;
    }

    if let Some(occupant) = piece_at(pieces, tx, ty) {
        let blocks = match ruleset {
            Ruleset::Solo => true,
            Ruleset::Duel => occupant.color == piece.color,
        };
        if blocks {
            return false;
        }
    }

    if !piece.kind.reaches(tx - piece.x, ty - piece.y) {
        return false;
    }

    path_between(piece.kind, piece.position(), (tx, ty))
        .into_iter()
        .all(|(x, y)| !grid.is_wall(x, y) && piece_at(pieces, x, y).is_none())
}

/// Every legal destination of `pieces[mover]`, in row-major order.
pub fn legal_targets(
    ruleset: Ruleset,
    grid: &Grid,
    pieces: &[Piece],
    mover: usize,
) -> Vec<(i32, i32)> {
    let mut targets = Vec::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            if is_legal(ruleset, grid, pieces, mover, x, y) {
                targets.push((x, y));
            }
        }
    }
    targets
}
