pub mod club;
pub mod clubs;
pub mod setup;
pub mod ui;
