//! Control loop
//!
//! Single consumer of the pending-event register. Polls, takes, handles.
//! Repeat-while-held volume and the menu-hold-to-shutdown watch run off the
//! live held-flags, not off repeated events; the register only ever carries
//! the most recent event.

use crate::system::event::{self, Event};
use crate::system::input::{HoldPoll, HoldTimer};
use crate::system::lights::{self, LedStatus, LightCommand};
use crate::system::settings::Settings;
use crate::system::state::{self, Source, RADIO_STATE};
use crate::task::buttons::HOLD_POLL_INTERVAL;
use defmt::{info, warn};
use embassy_time::{Duration, Instant, Timer};

/// Sleep between register polls while no event is pending
const IDLE_POLL: Duration = Duration::from_millis(10);
/// Interval between repeated volume steps while a volume button is held
const REPEAT_INTERVAL: Duration = Duration::from_millis(150);
/// Volume percentage change per step
const VOLUME_STEP: i8 = 5;
/// Number of rotary menu positions
const MENU_POSITIONS: u8 = 8;

/// Event consumer loop
#[embassy_executor::task]
pub async fn control(settings: Settings) {
    lights::set_status(LedStatus::Normal);
    info!("control loop started");

    loop {
        if !event::detected() {
            Timer::after(IDLE_POLL).await;
            continue;
        }
        // take and clear in one step; a newer arrival stays pending
        let ev = event::clear();
        info!("handling event {=str}", ev.name());
        handle(ev, &settings).await;
    }
}

async fn handle(ev: Event, settings: &Settings) {
    if RADIO_STATE.lock().await.shutting_down {
        return;
    }
    match ev {
        Event::NoEvent => {}
        Event::VolumeUp => repeat_volume(VOLUME_STEP, state::volume_up_held).await,
        Event::VolumeDown => repeat_volume(-VOLUME_STEP, state::volume_down_held).await,
        Event::MuteDown => {
            let mut s = RADIO_STATE.lock().await;
            s.muted = !s.muted;
            info!("muted: {=bool}", s.muted);
        }
        // mute release carries no state change
        Event::MuteUp => {}
        Event::ChannelUp => {
            let mut s = RADIO_STATE.lock().await;
            s.channel = s.channel.saturating_add(1);
            info!("channel {=u8}", s.channel);
        }
        Event::ChannelDown => {
            let mut s = RADIO_STATE.lock().await;
            if s.channel > 1 {
                s.channel -= 1;
            }
            info!("channel {=u8}", s.channel);
        }
        Event::MenuDown => {
            {
                let mut s = RADIO_STATE.lock().await;
                s.menu_position = (s.menu_position + 1) % MENU_POSITIONS;
                info!("menu position {=u8}", s.menu_position);
            }
            lights::set_status(LedStatus::Select);
            watch_menu_hold(settings.menu_hold).await;
        }
        Event::MenuUp => lights::set_status(LedStatus::Normal),
        Event::RotarySwitchChanged => {
            let mut s = RADIO_STATE.lock().await;
            s.menu_position = state::rotary_value();
            info!("menu position {=u8} (rotary)", s.menu_position);
        }
        Event::Aux1 => info!("aux 1 pressed"),
        Event::Aux2 => info!("aux 2 pressed"),
        Event::Aux3 => info!("aux 3 pressed"),
        Event::LoadFip => switch_source(Source::Fip).await,
        Event::LoadSpotify => switch_source(Source::Spotify).await,
        Event::SourceUnused => switch_source(Source::Idle).await,
        // the bank path drives the light directly; nothing to do here
        Event::DiscoToggled => info!("disco toggled"),
        Event::Shutdown => shutdown().await,
    }
}

/// Applies one volume step, then keeps stepping while the button stays held.
async fn repeat_volume(step: i8, held: fn() -> bool) {
    adjust_volume(step).await;
    while held() {
        Timer::after(REPEAT_INTERVAL).await;
        if held() {
            adjust_volume(step).await;
        }
    }
}

async fn adjust_volume(step: i8) {
    let mut s = RADIO_STATE.lock().await;
    let volume = (s.volume as i16 + step as i16).clamp(0, 100);
    s.volume = volume as u8;
    info!("volume {=u8}", s.volume);
}

/// Polls the menu held-flag after a menu press. Holding past the threshold
/// raises the shutdown event once; releasing earlier ends the watch.
async fn watch_menu_hold(threshold: Duration) {
    let mut hold = HoldTimer::new(threshold);
    hold.press(Instant::now());
    while state::menu_held() {
        Timer::after(HOLD_POLL_INTERVAL).await;
        match hold.poll(Instant::now()) {
            HoldPoll::Fired => {
                event::set(Event::Shutdown);
                break;
            }
            HoldPoll::Anomaly => warn!("menu hold poll: press start in the future"),
            HoldPoll::Armed | HoldPoll::Idle => {}
        }
    }
}

async fn switch_source(source: Source) {
    let mut s = RADIO_STATE.lock().await;
    if s.source != source {
        s.source = source;
        info!("source changed to {}", source);
    }
    drop(s);
    lights::set_status(LedStatus::Normal);
}

/// Handles the shutdown event exactly once. Later events are ignored by the
/// shutting_down guard in `handle`.
async fn shutdown() {
    let mut s = RADIO_STATE.lock().await;
    if s.shutting_down {
        return;
    }
    s.shutting_down = true;
    info!("shutting down");
    drop(s);
    lights::set_disco(LightCommand::Off);
    lights::set_status(LedStatus::Clear);
}
