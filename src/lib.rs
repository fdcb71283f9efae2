pub mod board;
pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod session;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);
