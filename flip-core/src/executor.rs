//! Applying a validated move to the board.
//!
//! The whole transition happens in one call. Renderers that animate a piece
//! sliding across the board do so on their own, after this has returned.

use serde::Serialize;

use crate::config::{EngineConfig, KnightRule};
use crate::grid::Grid;
use crate::movement::path_between;
use crate::piece::{index_at, Piece, PieceKind};
use crate::rules::{is_legal, Ruleset};

/// Everything a single move changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveEffect {
    pub from: (i32, i32),
    pub to: (i32, i32),
    /// Squares flipped, path first and destination last.
    pub toggled: Vec<(i32, i32)>,
    pub captured: Option<Piece>,
    /// Grid is uniform after the move.
    pub cleared: bool,
}

/// Move `pieces[mover]` to `(tx, ty)` without checking legality.
///
/// Callers validate with [`is_legal`] first; [`try_execute`] does both.
pub fn execute(
    config: &EngineConfig,
    ruleset: Ruleset,
    grid: &mut Grid,
    pieces: &mut Vec<Piece>,
    mut mover: usize,
    tx: i32,
    ty: i32,
) -> MoveEffect {
    let from = pieces[mover].position();

    let mut captured = None;
    if ruleset == Ruleset::Duel
        && let Some(victim) = index_at(pieces, tx, ty)
        && victim != mover
    {
        captured = Some(pieces.remove(victim));
        if victim < mover {
            mover -= 1;
        }
    }

    let kind = pieces[mover].kind;
    let mut toggled = path_between(kind, from, (tx, ty));
    let lands = kind != PieceKind::Knight || config.knight_rule == KnightRule::ToggleLanding;
    if lands {
        toggled.push((tx, ty));
    }
    toggled.retain(|&(x, y)| grid.toggle(x, y));

    let piece = &mut pieces[mover];
    piece.x = tx;
    piece.y = ty;

    MoveEffect {
        from,
        to: (tx, ty),
        toggled,
        captured,
        cleared: grid.is_uniform(),
    }
}

/// Validate then execute; `None` leaves everything untouched.
pub fn try_execute(
    config: &EngineConfig,
    ruleset: Ruleset,
    grid: &mut Grid,
    pieces: &mut Vec<Piece>,
    mover: usize,
    tx: i32,
    ty: i32,
) -> Option<MoveEffect> {
    is_legal(ruleset, grid, pieces, mover, tx, ty)
        .then(|| execute(config, ruleset, grid, pieces, mover, tx, ty))
}
