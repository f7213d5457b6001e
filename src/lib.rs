//! Core of a small vertical arcade shooter: entity model, update and
//! collision engine, spawn control and the menu/play/game-over state
//! machine.  Rendering, audio and input go through the [`port::Port`]
//! trait; the binary ships a terminal implementation.

pub mod background;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod port;
pub mod render;
pub mod scene;
pub mod spawn;
pub mod timer;
