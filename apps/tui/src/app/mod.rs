pub mod actions;
pub mod input;
pub mod probe;
pub mod state;

pub use actions::{load_board, LoadedBoard};
pub use input::{handle_input, Command};
pub use state::App;
