//! Order book simulation for prediction market trading interfaces.
//!
//! A fixed-depth book is seeded around a base price, perturbed on a timer,
//! and partially filled when a user clicks a level. Every mutation keeps the
//! book sorted, uncrossed and at a constant depth per side.

mod book;
mod config;
mod enforcer;
mod error;
mod level;
mod session;
mod side;
mod simulator;
mod view;

pub mod mutator;
pub mod trade;

pub use book::*;
pub use config::*;
pub use enforcer::*;
pub use error::*;
pub use level::*;
pub use mutator::{tick, TickReport};
pub use session::*;
pub use side::*;
pub use simulator::*;
pub use trade::{on_order_click, ClickOutcome};
pub use view::*;
