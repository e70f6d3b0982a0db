//! Light commands
//!
//! Signals carrying on/off and status commands to the output tasks. The
//! lights hold no state machine of their own; they obey the most recent
//! command.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// On/off command for the disco light relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum LightCommand {
    On,
    Off,
}

/// Status shown on the RGB status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum LedStatus {
    /// All off
    Clear,
    /// Green: playing normally
    Normal,
    /// Blue: busy, e.g. loading a source
    Busy,
    /// Red
    Error,
    /// Green + red: selection in progress
    Select,
}

static DISCO_LIGHT: Signal<CriticalSectionRawMutex, LightCommand> = Signal::new();
static STATUS_LED: Signal<CriticalSectionRawMutex, LedStatus> = Signal::new();

/// Commands the disco light relay.
pub fn set_disco(command: LightCommand) {
    DISCO_LIGHT.signal(command);
}

/// Waits for the next disco light command.
pub async fn wait_disco() -> LightCommand {
    DISCO_LIGHT.wait().await
}

/// Commands the status LED.
pub fn set_status(status: LedStatus) {
    STATUS_LED.signal(status);
}

/// Waits for the next status LED command.
pub async fn wait_status() -> LedStatus {
    STATUS_LED.wait().await
}
