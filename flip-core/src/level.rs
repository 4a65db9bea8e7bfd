//! Level definitions and the ordered level pack.
//!
//! Level text is parsed and checked in full before anything is handed back,
//! so a malformed definition never reaches a running session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FlipError, FlipResult};
use crate::grid::Grid;
use crate::piece::{index_at, Piece};
use crate::rules::Ruleset;

/// Static layout of one puzzle plus its best recorded clear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub width: usize,
    pub height: usize,
    pub par: u32,
    pub grid: Grid,
    #[serde(default)]
    pub pieces: Vec<Piece>,
    #[serde(rename = "bestMoves", default)]
    pub best_moves: Option<u32>,
}

impl Level {
    /// Build a level from an existing grid; width and height follow the grid.
    pub fn new(id: impl Into<String>, par: u32, grid: Grid, pieces: Vec<Piece>) -> FlipResult<Self> {
        let level = Level {
            id: id.into(),
            width: grid.width(),
            height: grid.height(),
            par,
            grid,
            pieces,
            best_moves: None,
        };
        level.validate()?;
        Ok(level)
    }

    pub fn from_json(text: &str) -> FlipResult<Self> {
        let level: Level = serde_json::from_str(text)?;
        level.validate()?;
        Ok(level)
    }

    /// Check the invariants serde alone cannot express.
    pub fn validate(&self) -> FlipResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FlipError::invalid("width and height must be positive"));
        }
        if self.grid.width() != self.width || self.grid.height() != self.height {
            return Err(FlipError::invalid(format!(
                "grid is {}x{} but level declares {}x{}",
                self.grid.width(),
                self.grid.height(),
                self.width,
                self.height
            )));
        }

        for (i, p) in self.pieces.iter().enumerate() {
            if !self.grid.in_bounds(p.x, p.y) {
                return Err(FlipError::invalid(format!(
                    "piece {i} at ({}, {}) is off the board",
                    p.x, p.y
                )));
            }
            if self.grid.is_wall(p.x, p.y) {
                return Err(FlipError::invalid(format!(
                    "piece {i} at ({}, {}) stands on a wall",
                    p.x, p.y
                )));
            }
            if index_at(&self.pieces, p.x, p.y) != Some(i) {
                return Err(FlipError::invalid(format!(
                    "two pieces share square ({}, {})",
                    p.x, p.y
                )));
            }
        }

        Ok(())
    }

    pub fn ruleset(&self) -> Ruleset {
        Ruleset::detect(&self.grid, &self.pieces)
    }

    /// Lower the best score to `moves` if it beats the current one.
    pub fn record_clear(&mut self, moves: u32) -> bool {
        match self.best_moves {
            Some(best) if best <= moves => false,
            _ => {
                self.best_moves = Some(moves);
                true
            }
        }
    }

    /// Best clear is at or under par.
    pub fn is_perfect(&self) -> bool {
        self.best_moves.is_some_and(|b| b <= self.par)
    }

    /// Pretty JSON for the level editor: four-space indentation, every grid
    /// row on one line and every piece on one line.
    pub fn to_compact_json(&self) -> String {
        let id = serde_json::to_string(&self.id).unwrap_or_else(|_| "\"\"".to_string());
        let mut out = String::from("{\n");
        out.push_str(&format!("    \"id\": {id},\n"));
        out.push_str(&format!("    \"width\": {},\n", self.width));
        out.push_str(&format!("    \"height\": {},\n", self.height));
        out.push_str(&format!("    \"par\": {},\n", self.par));

        let rows: Vec<String> = self
            .grid
            .rows()
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|&c| i8::from(c).to_string()).collect();
                format!("        [{}]", cells.join(", "))
            })
            .collect();
        out.push_str(&format!("    \"grid\": [\n{}\n    ],\n", rows.join(",\n")));

        if self.pieces.is_empty() {
            out.push_str("    \"pieces\": [],\n");
        } else {
            let pieces: Vec<String> = self
                .pieces
                .iter()
                .map(|p| {
                    let kind = serde_json::to_string(&p.kind).unwrap_or_default();
                    let color = p
                        .color
                        .and_then(|c| serde_json::to_string(&c).ok())
                        .map(|c| format!(", \"color\": {c}"))
                        .unwrap_or_default();
                    format!("        {{\"type\": {kind}, \"x\": {}, \"y\": {}{color}}}", p.x, p.y)
                })
                .collect();
            out.push_str(&format!("    \"pieces\": [\n{}\n    ],\n", pieces.join(",\n")));
        }

        let best = self
            .best_moves
            .map_or_else(|| "null".to_string(), |b| b.to_string());
        out.push_str(&format!("    \"bestMoves\": {best}\n}}"));
        out
    }
}

/// Best score of one level, as exchanged with the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub id: String,
    #[serde(rename = "bestMoves", default)]
    pub best_moves: Option<u32>,
}

/// Ordered level pack. Index order is unlock order.
#[derive(Clone, Debug, Default)]
pub struct LevelRepository {
    levels: Vec<Level>,
}

impl LevelRepository {
    pub fn new(levels: Vec<Level>) -> FlipResult<Self> {
        let mut seen = HashSet::new();
        for level in &levels {
            level.validate()?;
            if !seen.insert(level.id.as_str()) {
                return Err(FlipError::DuplicateLevelId {
                    id: level.id.clone(),
                });
            }
        }
        Ok(LevelRepository { levels })
    }

    /// Parse a JSON array of level definitions.
    pub fn from_json(text: &str) -> FlipResult<Self> {
        let levels: Vec<Level> = serde_json::from_str(text)?;
        Self::new(levels)
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The first level is always open; later ones open once the previous
    /// level has been cleared at least once.
    pub fn is_unlocked(&self, index: usize) -> bool {
        match index {
            0 => !self.levels.is_empty(),
            i if i < self.levels.len() => self.levels[i - 1].best_moves.is_some(),
            _ => false,
        }
    }

    /// Record a clear; true when the best score improved.
    pub fn record_clear(&mut self, index: usize, moves: u32) -> bool {
        self.levels
            .get_mut(index)
            .is_some_and(|l| l.record_clear(moves))
    }

    /// Best scores of every level cleared so far.
    pub fn progress(&self) -> Vec<Progress> {
        self.levels
            .iter()
            .filter(|l| l.best_moves.is_some())
            .map(|l| Progress {
                id: l.id.clone(),
                best_moves: l.best_moves,
            })
            .collect()
    }

    /// Merge stored scores by id. Unknown ids are skipped and scores only
    /// ever go down. Returns how many entries matched a level.
    pub fn apply_progress(&mut self, entries: &[Progress]) -> usize {
        let mut applied = 0;
        for entry in entries {
            match self.levels.iter_mut().find(|l| l.id == entry.id) {
                Some(level) => {
                    if let Some(best) = entry.best_moves {
                        level.record_clear(best);
                    }
                    applied += 1;
                }
                None => tracing::warn!(id = %entry.id, "ignoring progress for unknown level"),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::piece::{PieceKind, Side};

    const LEVEL: &str = r#"{
        "id": "first",
        "width": 3,
        "height": 2,
        "par": 2,
        "grid": [[0, 1, 0], [-1, 0, 0]],
        "pieces": [{"type": "rook", "x": 0, "y": 0}, {"type": "knight", "x": 2, "y": 1}],
        "bestMoves": null
    }"#;

    fn with(text: &str, from: &str, to: &str) -> String {
        text.replace(from, to)
    }

    #[test]
    fn parses_schema() {
        let level = Level::from_json(LEVEL).unwrap();
        assert_eq!(level.id, "first");
        assert_eq!(level.grid.get(0, 1), Some(Cell::Wall));
        assert_eq!(level.pieces[1].kind, PieceKind::Knight);
        assert_eq!(level.best_moves, None);
        assert_eq!(level.ruleset(), Ruleset::Solo);
    }

    #[test]
    fn rejects_malformed_levels() {
        let cases = [
            with(LEVEL, "\"width\": 3", "\"width\": 4"),
            with(LEVEL, "[-1, 0, 0]", "[-1, 0]"),
            with(LEVEL, "[-1, 0, 0]", "[-1, 0, 2]"),
            with(LEVEL, "\"x\": 2, \"y\": 1", "\"x\": 3, \"y\": 1"),
            with(LEVEL, "\"x\": 2, \"y\": 1", "\"x\": 0, \"y\": 1"),
            with(LEVEL, "\"x\": 2, \"y\": 1", "\"x\": 0, \"y\": 0"),
            with(LEVEL, "\"type\": \"knight\"", "\"type\": \"queen\""),
            with(LEVEL, "\"par\": 2", "\"par\": -2"),
            "{not json".to_string(),
        ];
        for text in cases {
            let err = Level::from_json(&text).unwrap_err();
            assert!(err.is_invalid_level(), "{text}: {err}");
        }
    }

    #[test]
    fn duel_needs_both_colors_on_an_open_board() {
        let grid = Grid::filled(4, 4, Cell::Light);
        let pieces = vec![
            Piece::new(PieceKind::Rook, 0, 0).with_color(Side::White),
            Piece::new(PieceKind::Rook, 3, 3).with_color(Side::Black),
        ];
        let level = Level::new("duel", 4, grid.clone(), pieces.clone()).unwrap();
        assert_eq!(level.ruleset(), Ruleset::Duel);

        let mut walled = grid;
        walled.set(1, 1, Cell::Wall);
        let level = Level::new("walled", 4, walled, pieces).unwrap();
        assert_eq!(level.ruleset(), Ruleset::Solo);
    }

    #[test]
    fn colors_are_cosmetic_on_a_walled_single_color_level() {
        let text = with(LEVEL, r#""y": 0}"#, r#""y": 0, "color": "white"}"#);
        let text = with(&text, r#""y": 1}"#, r#""y": 1, "color": "white"}"#);
        let level = Level::from_json(&text).unwrap();
        assert_eq!(level.grid.wall_count(), 1);
        assert!(level.pieces.iter().all(|p| p.color == Some(Side::White)));
        assert_eq!(level.ruleset(), Ruleset::Solo);
        assert_eq!(Level::from_json(&level.to_compact_json()).unwrap(), level);
    }

    #[test]
    fn partly_colored_pieces_play_single_color() {
        let grid = Grid::filled(3, 2, Cell::Light);
        let pieces = vec![
            Piece::new(PieceKind::Rook, 0, 0).with_color(Side::White),
            Piece::new(PieceKind::Rook, 2, 1),
        ];
        let level = Level::new("mixed", 2, grid, pieces).unwrap();
        assert_eq!(level.ruleset(), Ruleset::Solo);
    }

    #[test]
    fn best_moves_only_decreases() {
        let mut level = Level::from_json(LEVEL).unwrap();
        assert!(!level.is_perfect());
        assert!(level.record_clear(5));
        assert!(!level.is_perfect());
        assert!(!level.record_clear(7));
        assert_eq!(level.best_moves, Some(5));
        assert!(level.record_clear(2));
        assert!(!level.record_clear(2));
        assert_eq!(level.best_moves, Some(2));
        assert!(level.is_perfect());
    }

    #[test]
    fn compact_export_round_trips_and_keeps_rows_on_one_line() {
        let mut level = Level::from_json(LEVEL).unwrap();
        level.best_moves = Some(3);
        let text = level.to_compact_json();

        assert!(text.contains("        [0, 1, 0],\n        [-1, 0, 0]\n"));
        assert!(text.contains("{\"type\": \"rook\", \"x\": 0, \"y\": 0},"));
        assert!(text.contains("    \"bestMoves\": 3\n"));
        assert_eq!(Level::from_json(&text).unwrap(), level);
    }

    #[test]
    fn compact_export_layout() {
        let mut grid = Grid::filled(2, 2, Cell::Light);
        grid.set(1, 1, Cell::Dark);
        let empty = Level::new("bare", 1, grid.clone(), Vec::new()).unwrap();
        assert_eq!(
            empty.to_compact_json(),
            "{\n    \"id\": \"bare\",\n    \"width\": 2,\n    \"height\": 2,\n    \"par\": 1,\n    \"grid\": [\n        [0, 0],\n        [0, 1]\n    ],\n    \"pieces\": [],\n    \"bestMoves\": null\n}"
        );

        let pieces = vec![Piece::new(PieceKind::Knight, 0, 0).with_color(Side::Black)];
        let tagged = Level::new("tagged", 1, grid, pieces).unwrap();
        assert!(tagged.to_compact_json().contains(
            "    \"pieces\": [\n        {\"type\": \"knight\", \"x\": 0, \"y\": 0, \"color\": \"black\"}\n    ],\n"
        ));
    }

    #[test]
    fn repository_unlocks_in_order() {
        let a = Level::from_json(LEVEL).unwrap();
        let mut b = a.clone();
        b.id = "second".into();
        let mut repo = LevelRepository::new(vec![a, b]).unwrap();

        assert!(repo.is_unlocked(0));
        assert!(!repo.is_unlocked(1));
        assert!(!repo.is_unlocked(2));
        assert!(repo.record_clear(0, 4));
        assert!(repo.is_unlocked(1));
        assert!(!repo.record_clear(9, 1));
    }

    #[test]
    fn repository_rejects_duplicate_ids() {
        let a = Level::from_json(LEVEL).unwrap();
        let err = LevelRepository::new(vec![a.clone(), a]).unwrap_err();
        assert!(matches!(err, FlipError::DuplicateLevelId { id } if id == "first"));
    }

    #[test]
    fn progress_merges_by_id_and_never_raises() {
        let a = Level::from_json(LEVEL).unwrap();
        let mut b = a.clone();
        b.id = "second".into();
        let mut repo = LevelRepository::new(vec![a, b]).unwrap();
        repo.record_clear(0, 3);

        let stored: Vec<Progress> = serde_json::from_str(
            r#"[{"id":"first","bestMoves":6},{"id":"second","bestMoves":4},{"id":"gone","bestMoves":1}]"#,
        )
        .unwrap();
        assert_eq!(repo.apply_progress(&stored), 2);
        assert_eq!(repo.get(0).unwrap().best_moves, Some(3));
        assert_eq!(repo.get(1).unwrap().best_moves, Some(4));

        let out = serde_json::to_string(&repo.progress()).unwrap();
        assert_eq!(
            out,
            r#"[{"id":"first","bestMoves":3},{"id":"second","bestMoves":4}]"#
        );
    }
}
