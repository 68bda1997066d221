pub mod board;

pub use board::{Board, BoardView};
