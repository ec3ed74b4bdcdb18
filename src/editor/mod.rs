// src/editor/mod.rs

pub mod picker;
pub mod reducers;
pub mod state;

pub use picker::{filter_candidates, subsequence_match, PickerSession, PickerTarget};
pub use reducers::{apply_all, Reducer};
pub use state::{AppState, Tab, ZoneOptions, SPACE_SYMBOL};
