// src/ui/mod.rs
pub mod app;
pub mod canvas_panel;
pub mod dialog;
pub mod picker_modal;
pub mod symbols_tab;
pub mod zones_tab;

pub use app::EditorApp;
pub use dialog::DialogManager;
