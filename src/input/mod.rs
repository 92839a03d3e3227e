//! Input processing module
//! Handles batch file detection, parsing and loading

pub mod batch_parser;
pub mod file_detector;
pub mod manager;

pub use manager::InputManager;
