//! Light output drivers
//!
//! Consume light commands and drive the disco light relay and the RGB status
//! LED. No state machine here; the most recent command wins.

use crate::system::lights::{self, LedStatus, LightCommand};
use crate::system::resources::{DiscoLightResources, StatusLedResources};
use defmt::info;
use embassy_rp::gpio::{Level, Output};

/// Disco light relay driver
#[embassy_executor::task]
pub async fn disco_light(r: DiscoLightResources) {
    let mut relay = Output::new(r.relay, Level::Low);
    info!("disco light started (off)");

    loop {
        match lights::wait_disco().await {
            LightCommand::On => {
                relay.set_high();
                info!("disco light on");
            }
            LightCommand::Off => {
                relay.set_low();
                info!("disco light off");
            }
        }
    }
}

/// RGB status LED driver
#[embassy_executor::task]
pub async fn status_led(r: StatusLedResources) {
    let mut red = Output::new(r.red, Level::Low);
    let mut green = Output::new(r.green, Level::Low);
    let mut blue = Output::new(r.blue, Level::Low);
    info!("status led started");

    loop {
        let status = lights::wait_status().await;
        red.set_low();
        green.set_low();
        blue.set_low();
        match status {
            LedStatus::Clear => {}
            LedStatus::Normal => green.set_high(),
            LedStatus::Busy => blue.set_high(),
            LedStatus::Error => red.set_high(),
            LedStatus::Select => {
                green.set_high();
                red.set_high();
            }
        }
    }
}
