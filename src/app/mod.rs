// Presentation layer: console commands, text rendering and export.

pub mod command;
pub mod console;
pub mod export;
pub mod render;
