// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod ai;
pub mod alphabet;
pub mod bag;
pub mod board;
pub mod display;
pub mod extract;
pub mod game;
pub mod json;
pub mod level;
pub mod lexicon;
pub mod matrix;
pub mod oracle;
pub mod play;
pub mod validate;
