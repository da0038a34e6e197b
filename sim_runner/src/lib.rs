pub mod cli;
pub mod clicker;
pub mod output;
pub mod runner;

pub use cli::{Args, OutputFormat};
pub use clicker::RandomClicker;
pub use runner::run;
