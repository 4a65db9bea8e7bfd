//! Puzzle engine for a grid of two-state squares flipped by chess pieces.
//!
//! Rooks, bishops and knights move by the usual chess geometry and flip
//! every square they slide over and land on. A level is cleared when every
//! open square shows the same side. [`Session`] ties the pieces together;
//! the other modules are usable on their own.

pub mod config;
pub mod error;
pub mod executor;
pub mod grid;
pub mod history;
pub mod level;
pub mod movement;
pub mod piece;
pub mod rules;
pub mod session;
pub mod turn;

pub use config::{EngineConfig, KnightRule};
pub use error::{FlipError, FlipResult};
pub use executor::MoveEffect;
pub use grid::{Cell, Grid};
pub use level::{Level, LevelRepository, Progress};
pub use piece::{Piece, PieceKind, Side};
pub use rules::Ruleset;
pub use session::{BoardView, Click, MoveOutcome, MoveReport, Selection, Session};
