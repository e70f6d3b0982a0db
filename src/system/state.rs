//! Radio state
//!
//! Global playback-facing state updated by the control loop, plus the small
//! lock-free registers the input tasks publish for the consumer: the live
//! held-flags used for repeat-while-held behavior and the most recent rotary
//! menu switch reading.
//!
//! The state is protected by a mutex; the registers are atomics because they
//! are written from input tasks racing the control loop.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use defmt::Format;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};

/// Active playback source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Source {
    /// Nothing selected
    Idle,
    /// FIP radio stream
    Fip,
    /// Spotify playback
    Spotify,
}

/// Global radio state protected by a mutex.
pub static RADIO_STATE: Mutex<CriticalSectionRawMutex, RadioState> = Mutex::new(RadioState {
    volume: 50,
    channel: 1,
    muted: false,
    source: Source::Idle,
    menu_position: 0,
    shutting_down: false,
});

/// Runtime state the event consumer maintains.
#[derive(Format)]
pub struct RadioState {
    /// Volume percentage (0-100)
    pub volume: u8,
    /// Current channel number, 1-based
    pub channel: u8,
    pub muted: bool,
    pub source: Source,
    /// Menu item selected by the rotary menu switch (0-7)
    pub menu_position: u8,
    /// Set once a shutdown event has been handled
    pub shutting_down: bool,
}

// Live pressed-ness mirrors, re-published by the button tasks on every
// debounced edge. The consumer polls these for repeat-while-held volume and
// for the menu-hold-to-shutdown watch; it never touches the pins.
static VOLUME_UP_HELD: AtomicBool = AtomicBool::new(false);
static VOLUME_DOWN_HELD: AtomicBool = AtomicBool::new(false);
static MENU_HELD: AtomicBool = AtomicBool::new(false);

pub fn set_volume_up_held(held: bool) {
    VOLUME_UP_HELD.store(held, Ordering::Relaxed);
}

pub fn volume_up_held() -> bool {
    VOLUME_UP_HELD.load(Ordering::Relaxed)
}

pub fn set_volume_down_held(held: bool) {
    VOLUME_DOWN_HELD.store(held, Ordering::Relaxed);
}

pub fn volume_down_held() -> bool {
    VOLUME_DOWN_HELD.load(Ordering::Relaxed)
}

pub fn set_menu_held(held: bool) {
    MENU_HELD.store(held, Ordering::Relaxed);
}

pub fn menu_held() -> bool {
    MENU_HELD.load(Ordering::Relaxed)
}

/// Most recent settled rotary menu switch reading (0-7).
static ROTARY_VALUE: AtomicU8 = AtomicU8::new(0);

pub fn set_rotary_value(value: u8) {
    ROTARY_VALUE.store(value, Ordering::Relaxed);
}

pub fn rotary_value() -> u8 {
    ROTARY_VALUE.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_flags_mirror_the_latest_write() {
        set_volume_up_held(true);
        assert!(volume_up_held());
        set_volume_up_held(false);
        assert!(!volume_up_held());

        set_menu_held(true);
        assert!(menu_held());
        set_menu_held(false);
        assert!(!menu_held());
    }

    #[test]
    fn rotary_register_holds_last_reading() {
        set_rotary_value(5);
        assert_eq!(rotary_value(), 5);
    }
}
