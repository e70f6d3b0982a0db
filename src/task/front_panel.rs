//! Selector bank switch handling
//!
//! One task per latching switch. Raw edges pass the hardware debounce, then
//! the stability window of `SwitchCore`; accepted transitions update the
//! shared bank (mutual exclusion, disco light) and raise the translated
//! event. Selector activations must additionally survive the configured hold
//! before the source switches.

use crate::system::event;
use crate::system::input::{HoldPoll, HoldTimer, PullMode, SwitchCore};
use crate::system::lights;
use crate::system::panel::{PanelRole, BANK};
use crate::system::settings::Settings;
use crate::task::buttons::{debounce, hardware_pull, HOLD_POLL_INTERVAL};
use defmt::{debug, info, warn};
use embassy_rp::gpio::{AnyPin, Input, Level};
use embassy_time::{Instant, Timer};

/// Selector bank switch handler
#[embassy_executor::task(pool_size = 5)]
pub async fn panel_switch(pin: AnyPin, role: PanelRole, settings: Settings) {
    let mut input = Input::new(pin, hardware_pull(settings.pull_up_down));
    let gpio = settings.panel_gpio(role);
    // With a pull-up the closed contact reads low, so the logical state is
    // the inverted raw level.
    let invert = settings.pull_up_down == PullMode::Up;
    let mut core = SwitchCore::new(
        input.get_level() == Level::High,
        invert,
        settings.stable_time,
        Instant::now(),
    );
    info!(
        "panel switch {=str} started on gpio {=i32}, initial state {=bool}",
        role.name(),
        gpio,
        core.state()
    );

    // Seed the bank with the state the panel powered up in.
    if core.state() {
        let outcome = BANK.lock().await.apply(role, true);
        if let Some(command) = outcome.light {
            lights::set_disco(command);
        }
    }

    loop {
        let level = debounce(&mut input, settings.bounce_time).await;
        let now = Instant::now();
        let Some(new_state) = core.on_edge(level == Level::High, now) else {
            debug!(
                "panel switch {=str}: reading discarded as chatter",
                role.name()
            );
            continue;
        };

        if new_state && role.is_selector() && !confirm_hold(&mut input, &settings).await {
            core.force(false, Instant::now());
            debug!(
                "panel switch {=str}: released before hold threshold",
                role.name()
            );
            continue;
        }

        let outcome = BANK.lock().await.apply(role, new_state);
        if let Some(previous) = outcome.deactivated {
            info!(
                "panel: {=str} deactivated by {=str}",
                previous.name(),
                role.name()
            );
        }
        if let Some(command) = outcome.light {
            lights::set_disco(command);
        }
        event::on_switch(gpio, new_state, &settings);

        if role == PanelRole::Off && new_state {
            // momentary member: never stays latched
            core.force(false, Instant::now());
        }
    }
}

/// Long-press gate for the selector trio: the press must persist for the
/// configured hold before the activation is committed.
async fn confirm_hold(input: &mut Input<'static>, settings: &Settings) -> bool {
    let mut hold = HoldTimer::new(settings.selector_hold);
    hold.press(Instant::now());
    loop {
        Timer::after(HOLD_POLL_INTERVAL).await;
        if !settings
            .pull_up_down
            .is_active(input.get_level() == Level::High)
        {
            return false;
        }
        match hold.poll(Instant::now()) {
            HoldPoll::Fired => return true,
            HoldPoll::Anomaly => warn!("selector hold poll: press start in the future"),
            HoldPoll::Armed | HoldPoll::Idle => {}
        }
    }
}
