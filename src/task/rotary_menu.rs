//! Rotary menu switch handling
//!
//! Three binary-weighted active-low lines share one handler. After any line
//! falls, the task waits for the contacts to settle before decoding the
//! position; rotation passes through transient intermediate codes.

use crate::system::event::{self, Event};
use crate::system::resources::RotarySwitchResources;
use crate::system::rotary;
use crate::system::settings::Settings;
use crate::system::state;
use defmt::{debug, info};
use embassy_futures::select::select3;
use embassy_rp::gpio::{Input, Level, Pull};
use embassy_time::{Duration, Timer};

/// Per-line bounce interval for the rotary switch
const ROTARY_BOUNCE: Duration = Duration::from_millis(100);

/// Rotary menu switch handler
#[embassy_executor::task]
pub async fn rotary_menu(r: RotarySwitchResources, settings: Settings) {
    // The rotary switch common is wired to ground; the lines are active low
    // regardless of the button pull mode.
    let mut line1 = Input::new(r.value1, Pull::Up);
    let mut line2 = Input::new(r.value2, Pull::Up);
    let mut line4 = Input::new(r.value4, Pull::Up);

    let value = read(&mut line1, &mut line2, &mut line4);
    state::set_rotary_value(value);
    info!("rotary menu switch started at position {=u8}", value);

    loop {
        select3(
            line1.wait_for_falling_edge(),
            line2.wait_for_falling_edge(),
            line4.wait_for_falling_edge(),
        )
        .await;

        // Settle delay before trusting the code.
        Timer::after(settings.settle_time).await;
        let value = read(&mut line1, &mut line2, &mut line4);
        if value != state::rotary_value() {
            state::set_rotary_value(value);
            event::set(Event::RotarySwitchChanged);
            debug!("rotary menu switch moved to {=u8}", value);
        }

        Timer::after(ROTARY_BOUNCE).await;
    }
}

fn read(line1: &mut Input<'static>, line2: &mut Input<'static>, line4: &mut Input<'static>) -> u8 {
    rotary::value(
        line1.get_level() == Level::High,
        line2.get_level() == Level::High,
        line4.get_level() == Level::High,
    )
}
