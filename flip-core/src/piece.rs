use serde::{Deserialize, Serialize};

/// Movement family of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Rook,
    Bishop,
    Knight,
}

impl PieceKind {
    /// Single-letter label used by text renderers.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
        }
    }

    /// Sliding pieces travel through the squares between start and target.
    pub fn slides(self) -> bool {
        !matches!(self, PieceKind::Knight)
    }
}

/// Owner of a piece in two-color levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// A piece on the board. `color` only matters in two-color levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Side>,
}

impl Piece {
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Piece {
            kind,
            x,
            y,
            color: None,
        }
    }

    pub fn with_color(mut self, side: Side) -> Self {
        self.color = Some(side);
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

pub fn index_at(pieces: &[Piece], x: i32, y: i32) -> Option<usize> {
    pieces.iter().position(|p| p.is_at(x, y))
}

pub fn piece_at(pieces: &[Piece], x: i32, y: i32) -> Option<&Piece> {
    pieces.iter().find(|p| p.is_at(x, y))
}

/// Which colors still have at least one piece: `(white, black)`.
pub fn sides_present(pieces: &[Piece]) -> (bool, bool) {
    let white = pieces.iter().any(|p| p.color == Some(Side::White));
    let black = pieces.iter().any(|p| p.color == Some(Side::Black));
    (white, black)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_json_uses_type_field() {
        let p: Piece = serde_json::from_str(r#"{"type":"knight","x":4,"y":4}"#).unwrap();
        assert_eq!(p, Piece::new(PieceKind::Knight, 4, 4));
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"type":"knight","x":4,"y":4}"#
        );

        let p: Piece =
            serde_json::from_str(r#"{"type":"rook","x":1,"y":2,"color":"black"}"#).unwrap();
        assert_eq!(p.color, Some(Side::Black));
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        assert!(serde_json::from_str::<Piece>(r#"{"type":"queen","x":0,"y":0}"#).is_err());
    }

    #[test]
    fn lookup_helpers() {
        let pieces = vec![
            Piece::new(PieceKind::Rook, 0, 0).with_color(Side::White),
            Piece::new(PieceKind::Bishop, 2, 3).with_color(Side::White),
        ];
        assert_eq!(index_at(&pieces, 2, 3), Some(1));
        assert!(piece_at(&pieces, 1, 1).is_none());
        assert_eq!(sides_present(&pieces), (true, false));
        assert_eq!(Side::White.opponent(), Side::Black);
    }
}
