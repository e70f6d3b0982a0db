//! Core system components for the radio front panel
pub mod event;
pub mod input;
pub mod lights;
pub mod panel;
#[cfg(target_os = "none")]
pub mod resources;
pub mod rotary;
pub mod settings;
pub mod state;
