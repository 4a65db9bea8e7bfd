/// Application-wide display constants.
/// Lengths are in canvas pixels.
pub const CELL_SIZE: f64 = 50.0;
/// Radius of the dots marking legal destinations.
pub const HINT_RADIUS: f64 = CELL_SIZE / 6.0;
/// `localStorage` key holding the `[{id, bestMoves}]` progress list.
pub const PROGRESS_KEY: &str = "flip.progress";

pub const LIGHT_SQUARE: &str = "#eeeed2";
pub const DARK_SQUARE: &str = "#769656";
pub const WALL_SQUARE: &str = "#3a3a3a";
pub const GRID_LINE: &str = "#222";
pub const SELECTED_OUTLINE: &str = "#f6c026";
pub const HINT_ON_LIGHT: &str = "rgba(90, 129, 121, 0.8)";
pub const HINT_ON_DARK: &str = "rgba(54, 135, 107, 0.8)";
pub const PERFECT_SCORE: &str = "#4caf50";
