//! Hardware resource management
//!
//! Allocates the front panel pins to the input and output tasks. Assignment
//! is fixed at build time; `radio.conf` decides which of these lines are
//! actually used (a role with gpio 0 is disabled and its pins stay idle).
//!
//! # Resource groups
//! - Momentary buttons: volume, channel, mute, menu and the aux spares
//! - Selector bank: five latching switches, left to right
//! - Rotary menu switch: three binary-weighted lines
//! - Disco light relay and RGB status LED outputs

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// Volume / channel / mute push buttons
    buttons: ButtonResources {
        left: PIN_14,
        right: PIN_15,
        mute: PIN_4,
        up: PIN_24,
        down: PIN_23,
    },
    /// Menu push button (hold to power off)
    menu_button: MenuButtonResources {
        pin: PIN_17,
    },
    /// Spare buttons, disabled in the default wiring
    aux_buttons: AuxButtonResources {
        aux1: PIN_9,
        aux2: PIN_10,
        aux3: PIN_11,
    },
    /// Latching selector bank, left to right on the panel
    panel: PanelResources {
        off: PIN_27,
        fip: PIN_22,
        spotify: PIN_6,
        unused: PIN_18,
        disco: PIN_5,
    },
    /// Rotary menu switch lines, weights 1/2/4
    rotary: RotarySwitchResources {
        value1: PIN_16,
        value2: PIN_8,
        value4: PIN_7,
    },
    /// Relay driving the 220V disco light
    disco_light: DiscoLightResources {
        relay: PIN_26,
    },
    /// RGB status LED
    status_led: StatusLedResources {
        red: PIN_0,
        green: PIN_1,
        blue: PIN_2,
    },
}
