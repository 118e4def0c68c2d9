//! Terminal front end over the calculation engine

pub mod calculate;
pub mod funds;
pub mod setup;
pub mod ui;
