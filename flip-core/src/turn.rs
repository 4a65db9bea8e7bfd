//! Whose turn it is in two-color levels.
//!
//! Nothing here is stored: the turn is recomputed from the move count and
//! the pieces left on the board, so undo can never leave it out of step.

use crate::piece::{sides_present, Piece, Side};
use crate::rules::Ruleset;

/// Side allowed to move next, or `None` when any piece may move.
///
/// White moves on even move counts. Once one color has no pieces left the
/// restriction is lifted.
pub fn side_to_move(ruleset: Ruleset, moves_made: usize, pieces: &[Piece]) -> Option<Side> {
    if ruleset == Ruleset::Solo {
        return None;
    }
    match sides_present(pieces) {
        (true, true) if moves_made % 2 == 0 => Some(Side::White),
        (true, true) => Some(Side::Black),
        _ => None,
    }
}

/// Whether `piece` may be picked up as the source of a move.
pub fn may_select(ruleset: Ruleset, moves_made: usize, pieces: &[Piece], piece: &Piece) -> bool {
    match side_to_move(ruleset, moves_made, pieces) {
        Some(side) => piece.color == Some(side),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn both() -> Vec<Piece> {
        vec![
            Piece::new(PieceKind::Rook, 0, 0).with_color(Side::White),
            Piece::new(PieceKind::Rook, 7, 7).with_color(Side::Black),
        ]
    }

    #[test]
    fn parity_decides_turn() {
        let pieces = both();
        for n in 0..6 {
            let expected = if n % 2 == 0 { Side::White } else { Side::Black };
            assert_eq!(side_to_move(Ruleset::Duel, n, &pieces), Some(expected));
        }
    }

    #[test]
    fn solo_and_eliminated_colors_are_unrestricted() {
        let pieces = both();
        assert_eq!(side_to_move(Ruleset::Solo, 1, &pieces), None);
        assert_eq!(side_to_move(Ruleset::Duel, 1, &pieces[..1]), None);
        assert!(may_select(Ruleset::Duel, 1, &pieces[..1], &pieces[0]));
    }

    #[test]
    fn wrong_color_cannot_be_selected() {
        let pieces = both();
        assert!(may_select(Ruleset::Duel, 0, &pieces, &pieces[0]));
        assert!(!may_select(Ruleset::Duel, 0, &pieces, &pieces[1]));
        assert!(may_select(Ruleset::Duel, 1, &pieces, &pieces[1]));
    }
}
