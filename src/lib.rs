//! Baduk: a rules engine for the game of Go.
//!
//! The engine places stones, tracks groups and their liberties, resolves
//! captures, rejects suicide and positional-superko repetitions, and scores
//! finished games by area.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size, komi and engine limits
//! - [`grid`] - Colours, coordinates and the intersection grid
//! - [`group`] - Stone groups and their liberties, stored in an index arena
//! - [`zobrist`] - Position fingerprints and the superko history
//! - [`board`] - The board engine: play, pass, move analysis
//! - [`territory`] - Area scoring
//! - [`playout`] - Random game simulation on top of the board API
//! - [`error`] - Move and setup errors
//!
//! ## Example
//!
//! ```
//! use baduk::board::Board;
//! use baduk::error::MoveError;
//! use baduk::grid::Color;
//!
//! let mut board = Board::new(9, 7.5).unwrap();
//! assert!(board.play(1, 0)); // Black
//! assert!(board.play(4, 4)); // White
//! assert!(board.play(0, 1)); // Black
//!
//! // White may not fill the corner: it would have no liberties.
//! assert_eq!(board.try_play(0, 0), Err(MoveError::Suicide));
//! assert_eq!(board.next_to_play(), Color::White);
//!
//! let analysis = board.is_valid_move(4, 5);
//! assert!(analysis.legal);
//! println!("score: {:?}", board.score());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod grid;
pub mod group;
pub mod playout;
pub mod territory;
pub mod zobrist;
