//! Unified events and the pending-event register
//!
//! Every physical input source (buttons, the selector bank, the rotary menu
//! switch, external rotary encoders) is translated into one `Event`
//! enumeration and written into a single-slot register. The register is
//! last-write-wins by design: a new event overwrites an unconsumed one, the
//! consumer polls `detected` and must `clear` after handling. There is no
//! queueing and no ordering across sources, only recency.

use crate::system::settings::Settings;
use core::cell::Cell;
use defmt::{debug, Format};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Normalized application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Event {
    NoEvent,
    VolumeUp,
    VolumeDown,
    MuteDown,
    MuteUp,
    ChannelUp,
    ChannelDown,
    MenuDown,
    MenuUp,
    RotarySwitchChanged,
    Aux1,
    Aux2,
    Aux3,
    Shutdown,
    LoadFip,
    LoadSpotify,
    SourceUnused,
    DiscoToggled,
}

impl Event {
    pub fn name(self) -> &'static str {
        match self {
            Event::NoEvent => "NO_EVENT",
            Event::VolumeUp => "VOLUME_UP",
            Event::VolumeDown => "VOLUME_DOWN",
            Event::MuteDown => "MUTE_BUTTON_DOWN",
            Event::MuteUp => "MUTE_BUTTON_UP",
            Event::ChannelUp => "CHANNEL_UP",
            Event::ChannelDown => "CHANNEL_DOWN",
            Event::MenuDown => "MENU_BUTTON_DOWN",
            Event::MenuUp => "MENU_BUTTON_UP",
            Event::RotarySwitchChanged => "ROTARY_SWITCH_CHANGED",
            Event::Aux1 => "AUX_SWITCH1",
            Event::Aux2 => "AUX_SWITCH2",
            Event::Aux3 => "AUX_SWITCH3",
            Event::Shutdown => "SHUTDOWN",
            Event::LoadFip => "LOAD_FIP",
            Event::LoadSpotify => "LOAD_SPOTIFY",
            Event::SourceUnused => "SOURCE_UNUSED",
            Event::DiscoToggled => "DISCO_TOGGLED",
        }
    }
}

/// Signals delivered by an external rotary encoder driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum EncoderSignal {
    Clockwise,
    AntiClockwise,
    ButtonDown,
    ButtonUp,
}

#[derive(Clone, Copy)]
struct Slot {
    kind: Event,
    triggered: bool,
}

const IDLE: Slot = Slot {
    kind: Event::NoEvent,
    triggered: false,
};

/// Single-slot event register.
///
/// The (kind, triggered) pair is updated under a blocking mutex so a producer
/// racing the consumer can never expose a kind that does not match the
/// triggered flag.
pub struct PendingEvent {
    slot: Mutex<CriticalSectionRawMutex, Cell<Slot>>,
}

impl PendingEvent {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(IDLE)),
        }
    }

    /// Overwrites the pending event unconditionally.
    pub fn set(&self, event: Event) {
        self.slot.lock(|slot| {
            slot.set(Slot {
                kind: event,
                triggered: true,
            })
        });
    }

    /// True while an unconsumed event exists.
    pub fn detected(&self) -> bool {
        self.slot.lock(|slot| slot.get().triggered)
    }

    /// Kind of the pending event, `NoEvent` when idle.
    pub fn get(&self) -> Event {
        self.slot.lock(|slot| slot.get().kind)
    }

    pub fn name(&self) -> &'static str {
        self.get().name()
    }

    /// Resets the register to idle and returns what was pending.
    pub fn clear(&self) -> Event {
        self.slot.lock(|slot| slot.replace(IDLE)).kind
    }
}

static PENDING: PendingEvent = PendingEvent::new();

/// Overwrites the pending event and marks it triggered.
pub fn set(event: Event) {
    debug!("event {=str}", event.name());
    PENDING.set(event);
}

/// Reports whether an unconsumed event exists.
pub fn detected() -> bool {
    PENDING.detected()
}

/// Kind of the pending event.
pub fn get() -> Event {
    PENDING.get()
}

/// Name of the pending event.
pub fn name() -> &'static str {
    PENDING.name()
}

/// Clears the pending event and returns what was pending, in one step. The
/// consumer must handle the returned event; reading first and clearing later
/// would destroy anything arriving in between.
pub fn clear() -> Event {
    let cleared = PENDING.clear();
    if cleared != Event::NoEvent {
        debug!("clear event {=str}", cleared.name());
    }
    cleared
}

/// Maps a momentary button line to its event, by configured gpio identity.
pub fn button_event_for(gpio: i32, settings: &Settings) -> Option<Event> {
    if gpio <= 0 {
        return None;
    }
    let event = if gpio == settings.right_switch {
        Event::VolumeUp
    } else if gpio == settings.left_switch {
        Event::VolumeDown
    } else if gpio == settings.mute_switch {
        Event::MuteDown
    } else if gpio == settings.up_switch {
        Event::ChannelUp
    } else if gpio == settings.down_switch {
        Event::ChannelDown
    } else if gpio == settings.menu_switch {
        Event::MenuDown
    } else if gpio == settings.aux_switch1 {
        Event::Aux1
    } else if gpio == settings.aux_switch2 {
        Event::Aux2
    } else if gpio == settings.aux_switch3 {
        Event::Aux3
    } else {
        return None;
    };
    Some(event)
}

/// Maps a selector bank state change to its event. Releases carry no event;
/// the activation of the newly selected member covers the transition.
pub fn switch_event_for(gpio: i32, state: bool, settings: &Settings) -> Option<Event> {
    if !state || gpio <= 0 {
        return None;
    }
    let event = if gpio == settings.off_switch {
        Event::Shutdown
    } else if gpio == settings.fip_switch {
        Event::LoadFip
    } else if gpio == settings.spotify_switch {
        Event::LoadSpotify
    } else if gpio == settings.unused_switch {
        Event::SourceUnused
    } else if gpio == settings.disco_switch {
        Event::DiscoToggled
    } else {
        return None;
    };
    Some(event)
}

/// Maps a volume knob encoder signal to its event.
pub fn volume_knob_event_for(signal: EncoderSignal) -> Event {
    match signal {
        EncoderSignal::Clockwise => Event::VolumeUp,
        EncoderSignal::AntiClockwise => Event::VolumeDown,
        EncoderSignal::ButtonDown => Event::MuteDown,
        EncoderSignal::ButtonUp => Event::MuteUp,
    }
}

/// Maps a tuner knob encoder signal to its event. Menu-hold-to-shutdown is
/// the consumer's obligation via the menu held-flag, not encoded here.
pub fn tuner_knob_event_for(signal: EncoderSignal) -> Event {
    match signal {
        EncoderSignal::Clockwise => Event::ChannelUp,
        EncoderSignal::AntiClockwise => Event::ChannelDown,
        EncoderSignal::ButtonDown => Event::MenuDown,
        EncoderSignal::ButtonUp => Event::MenuUp,
    }
}

/// Translator callback for a debounced button press. Unknown identities are
/// discarded without raising an event; shared lines may deliver edges for
/// lines owned by other subsystems.
pub fn on_button(gpio: i32, settings: &Settings) {
    match button_event_for(gpio, settings) {
        Some(event) => set(event),
        None => debug!("button event for unknown gpio {=i32} discarded", gpio),
    }
}

/// Translator callback for a selector bank state change.
pub fn on_switch(gpio: i32, state: bool, settings: &Settings) {
    match switch_event_for(gpio, state, settings) {
        Some(event) => set(event),
        None => debug!(
            "switch event gpio {=i32} state {=bool} raised no event",
            gpio, state
        ),
    }
}

/// Translator callback for the volume knob (external encoder source).
pub fn on_volume_knob(signal: EncoderSignal) {
    set(volume_knob_event_for(signal));
}

/// Translator callback for the tuner knob (external encoder source).
pub fn on_tuner_knob(signal: EncoderSignal) {
    set(tuner_knob_event_for(signal));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_conf(
            "left_switch=14\nright_switch=15\nmute_switch=4\nup_switch=24\ndown_switch=23\n\
             menu_switch=17\noff_switch=27\nfip_switch=22\nspotify_switch=6\n\
             unused_switch=18\ndisco_switch=5\n",
        )
    }

    #[test]
    fn last_write_wins_until_cleared() {
        let pending = PendingEvent::new();
        assert!(!pending.detected());
        assert_eq!(pending.get(), Event::NoEvent);

        pending.set(Event::VolumeUp);
        pending.set(Event::ChannelDown);
        assert!(pending.detected());
        assert_eq!(pending.get(), Event::ChannelDown);
        assert_eq!(pending.name(), "CHANNEL_DOWN");

        pending.clear();
        assert!(!pending.detected());
        assert_eq!(pending.get(), Event::NoEvent);
    }

    #[test]
    fn clear_reports_what_was_pending() {
        let pending = PendingEvent::new();
        pending.set(Event::Shutdown);
        assert_eq!(pending.clear(), Event::Shutdown);
        assert_eq!(pending.clear(), Event::NoEvent);
    }

    #[test]
    fn clear_consumes_exactly_one_event() {
        let pending = PendingEvent::new();
        pending.set(Event::VolumeUp);
        let taken = pending.clear();
        // an arrival after the consume is a fresh pending event
        pending.set(Event::MenuDown);
        assert_eq!(taken, Event::VolumeUp);
        assert!(pending.detected());
        assert_eq!(pending.clear(), Event::MenuDown);
    }

    #[test]
    fn button_lookup_by_gpio_identity() {
        let s = settings();
        assert_eq!(button_event_for(15, &s), Some(Event::VolumeUp));
        assert_eq!(button_event_for(14, &s), Some(Event::VolumeDown));
        assert_eq!(button_event_for(4, &s), Some(Event::MuteDown));
        assert_eq!(button_event_for(17, &s), Some(Event::MenuDown));
        // unknown identity is discarded, not an error
        assert_eq!(button_event_for(99, &s), None);
        // a disabled role can never match
        assert_eq!(button_event_for(0, &s), None);
        assert_eq!(button_event_for(-1, &s), None);
    }

    #[test]
    fn switch_lookup_ignores_releases() {
        let s = settings();
        assert_eq!(switch_event_for(22, true, &s), Some(Event::LoadFip));
        assert_eq!(switch_event_for(22, false, &s), None);
        assert_eq!(switch_event_for(27, true, &s), Some(Event::Shutdown));
        assert_eq!(switch_event_for(5, true, &s), Some(Event::DiscoToggled));
        assert_eq!(switch_event_for(99, true, &s), None);
    }

    #[test]
    fn encoder_signals_map_to_knob_events() {
        assert_eq!(
            volume_knob_event_for(EncoderSignal::Clockwise),
            Event::VolumeUp
        );
        assert_eq!(volume_knob_event_for(EncoderSignal::ButtonUp), Event::MuteUp);
        assert_eq!(
            tuner_knob_event_for(EncoderSignal::AntiClockwise),
            Event::ChannelDown
        );
        assert_eq!(
            tuner_knob_event_for(EncoderSignal::ButtonDown),
            Event::MenuDown
        );
    }
}
