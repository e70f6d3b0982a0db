//! Push button handling
//!
//! One task per momentary button. Each debounced active edge is forwarded to
//! the event translator by gpio identity; the hardware bounce interval is the
//! only dedup for buttons. Pressed-ness of the volume and menu buttons is
//! mirrored into the held-flag registers; the control loop polls those for
//! repeat-while-held volume and for the menu-hold-to-shutdown watch.

use crate::system::event;
use crate::system::input::PullMode;
use crate::system::settings::{ButtonRole, Settings};
use crate::system::state;
use defmt::info;
use embassy_rp::gpio::{AnyPin, Input, Level, Pull};
use embassy_time::{Duration, Timer};

/// Poll interval for the long-press timers
pub(crate) const HOLD_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Maps the configured pull mode to the hardware pull resistor.
pub(crate) fn hardware_pull(mode: PullMode) -> Pull {
    match mode {
        PullMode::Up => Pull::Up,
        PullMode::Down => Pull::Down,
    }
}

/// Waits for a stable level change and returns the settled level.
pub(crate) async fn debounce(input: &mut Input<'static>, bounce: Duration) -> Level {
    loop {
        let st_level = input.get_level();
        input.wait_for_any_edge().await;
        Timer::after(bounce).await;
        let end_level = input.get_level();
        if st_level != end_level {
            break end_level;
        }
    }
}

/// Momentary button handler
#[embassy_executor::task(pool_size = 9)]
pub async fn momentary_button(pin: AnyPin, role: ButtonRole, settings: Settings) {
    let mut input = Input::new(pin, hardware_pull(settings.pull_up_down));
    let gpio = settings.button_gpio(role);
    info!("button {=str} started on gpio {=i32}", role.name(), gpio);

    loop {
        let level = debounce(&mut input, settings.bounce_time).await;
        let pressed = settings.pull_up_down.is_active(level == Level::High);
        publish_held(role, pressed);
        if pressed {
            event::on_button(gpio, &settings);
        }
    }
}

/// Mirrors pressed-ness into the registers the consumer polls.
fn publish_held(role: ButtonRole, held: bool) {
    match role {
        ButtonRole::Right => state::set_volume_up_held(held),
        ButtonRole::Left => state::set_volume_down_held(held),
        ButtonRole::Menu => state::set_menu_held(held),
        _ => {}
    }
}
