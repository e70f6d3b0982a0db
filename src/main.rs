//! Radio front panel firmware entry point
//!
//! Loads the panel configuration and spawns one task per wired input line
//! plus the output drivers and the control loop.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use crate::system::panel::PanelRole;
#[cfg(target_os = "none")]
use crate::system::settings::{self, ButtonRole, Settings};
#[cfg(target_os = "none")]
use crate::task::{
    buttons::momentary_button,
    control::control,
    front_panel::panel_switch,
    light_output::{disco_light, status_led},
    rotary_menu::rotary_menu,
};
#[cfg(target_os = "none")]
use defmt::info;
#[cfg(target_os = "none")]
use embassy_executor::Spawner;
#[cfg(target_os = "none")]
use embassy_rp::block::ImageDef;
#[cfg(target_os = "none")]
use embassy_rp::config::Config;
#[cfg(target_os = "none")]
use embassy_rp::gpio::Pin;
#[cfg(target_os = "none")]
use system::resources::{
    AssignedResources, AuxButtonResources, ButtonResources, DiscoLightResources,
    MenuButtonResources, PanelResources, RotarySwitchResources, StatusLedResources,
};
#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[cfg(target_os = "none")]
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
#[cfg(target_os = "none")]
mod task;

/// Host-side defmt sink so the pure-logic tests link; logs are dropped.
#[cfg(not(target_os = "none"))]
mod host_logger {
    #[defmt::global_logger]
    struct NullLogger;

    unsafe impl defmt::Logger for NullLogger {
        fn acquire() {}
        unsafe fn flush() {}
        unsafe fn release() {}
        unsafe fn write(_bytes: &[u8]) {}
    }
}

/// Host stand-in entry point; the firmware only runs on the target.
#[cfg(not(target_os = "none"))]
fn main() {}

/// Firmware entry point
#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    let settings = Settings::load();
    info!("radio front panel starting");

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // Outputs and the consumer first, so no input event is ever dropped on
    // the floor for lack of a reader.
    spawner.spawn(control(settings)).unwrap();
    spawner.spawn(status_led(r.status_led)).unwrap();
    if settings::enabled(settings.disco_light) {
        spawner.spawn(disco_light(r.disco_light)).unwrap();
    }

    // Momentary buttons; a role configured to gpio 0 stays unwired.
    let b = r.buttons;
    if settings::enabled(settings.left_switch) {
        spawner
            .spawn(momentary_button(b.left.degrade(), ButtonRole::Left, settings))
            .unwrap();
    }
    if settings::enabled(settings.right_switch) {
        spawner
            .spawn(momentary_button(b.right.degrade(), ButtonRole::Right, settings))
            .unwrap();
    }
    if settings::enabled(settings.mute_switch) {
        spawner
            .spawn(momentary_button(b.mute.degrade(), ButtonRole::Mute, settings))
            .unwrap();
    }
    if settings::enabled(settings.up_switch) {
        spawner
            .spawn(momentary_button(b.up.degrade(), ButtonRole::Up, settings))
            .unwrap();
    }
    if settings::enabled(settings.down_switch) {
        spawner
            .spawn(momentary_button(b.down.degrade(), ButtonRole::Down, settings))
            .unwrap();
    }
    if settings::enabled(settings.menu_switch) {
        spawner
            .spawn(momentary_button(r.menu_button.pin.degrade(), ButtonRole::Menu, settings))
            .unwrap();
    }
    let aux = r.aux_buttons;
    if settings::enabled(settings.aux_switch1) {
        spawner
            .spawn(momentary_button(aux.aux1.degrade(), ButtonRole::Aux1, settings))
            .unwrap();
    }
    if settings::enabled(settings.aux_switch2) {
        spawner
            .spawn(momentary_button(aux.aux2.degrade(), ButtonRole::Aux2, settings))
            .unwrap();
    }
    if settings::enabled(settings.aux_switch3) {
        spawner
            .spawn(momentary_button(aux.aux3.degrade(), ButtonRole::Aux3, settings))
            .unwrap();
    }

    // Latching selector bank.
    let panel = r.panel;
    if settings::enabled(settings.off_switch) {
        spawner
            .spawn(panel_switch(panel.off.degrade(), PanelRole::Off, settings))
            .unwrap();
    }
    if settings::enabled(settings.fip_switch) {
        spawner
            .spawn(panel_switch(panel.fip.degrade(), PanelRole::Fip, settings))
            .unwrap();
    }
    if settings::enabled(settings.spotify_switch) {
        spawner
            .spawn(panel_switch(panel.spotify.degrade(), PanelRole::Spotify, settings))
            .unwrap();
    }
    if settings::enabled(settings.unused_switch) {
        spawner
            .spawn(panel_switch(panel.unused.degrade(), PanelRole::Unused, settings))
            .unwrap();
    }
    if settings::enabled(settings.disco_switch) {
        spawner
            .spawn(panel_switch(panel.disco.degrade(), PanelRole::Disco, settings))
            .unwrap();
    }

    // Rotary menu switch, only when all three lines are wired.
    if settings.rotary_switch_wired() {
        spawner.spawn(rotary_menu(r.rotary, settings)).unwrap();
    }
}
