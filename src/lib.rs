// src/lib.rs

pub mod data;
pub mod document;
pub mod editor;
pub mod render;
pub mod ui;
