//! Front panel selector bank
//!
//! Five latching switches in a fixed order: {off, fip, spotify, unused,
//! disco}. The three regular members are mutually exclusive; activating one
//! logically deactivates the previously active one. `off` is momentary and
//! never stays latched, `disco` is independent and only drives the disco
//! light. The bank tracks logical state; the physical lines belong to the
//! switch tasks.

use crate::system::lights::LightCommand;
use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Shared bank state, updated by the panel switch tasks.
pub static BANK: Mutex<CriticalSectionRawMutex, Bank> = Mutex::new(Bank::new());

/// Selector bank members, left to right on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum PanelRole {
    /// Momentary; shuts the radio down.
    Off,
    /// Selects the FIP radio stream.
    Fip,
    /// Selects Spotify playback.
    Spotify,
    /// Spare position.
    Unused,
    /// Toggles the disco light relay; excludes nothing.
    Disco,
}

impl PanelRole {
    pub fn name(self) -> &'static str {
        match self {
            PanelRole::Off => "off",
            PanelRole::Fip => "fip",
            PanelRole::Spotify => "spotify",
            PanelRole::Unused => "unused",
            PanelRole::Disco => "disco",
        }
    }

    /// True for the mutually exclusive trio.
    pub fn is_selector(self) -> bool {
        matches!(self, PanelRole::Fip | PanelRole::Spotify | PanelRole::Unused)
    }

    fn index(self) -> usize {
        match self {
            PanelRole::Off => 0,
            PanelRole::Fip => 1,
            PanelRole::Spotify => 2,
            PanelRole::Unused => 3,
            PanelRole::Disco => 4,
        }
    }
}

const SELECTORS: [PanelRole; 3] = [PanelRole::Fip, PanelRole::Spotify, PanelRole::Unused];

/// Result of applying one state change to the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct BankOutcome {
    /// Selector that was logically switched off by this activation.
    pub deactivated: Option<PanelRole>,
    /// Command for the disco light relay, if any.
    pub light: Option<LightCommand>,
}

impl BankOutcome {
    const NONE: Self = Self {
        deactivated: None,
        light: None,
    };
}

/// Logical states of the five bank members.
pub struct Bank {
    states: [bool; 5],
}

impl Bank {
    pub const fn new() -> Self {
        Self { states: [false; 5] }
    }

    /// Applies an accepted state change for one member.
    pub fn apply(&mut self, role: PanelRole, state: bool) -> BankOutcome {
        match role {
            // Momentary: registers the press but never latches.
            PanelRole::Off => BankOutcome::NONE,
            PanelRole::Disco => {
                self.states[role.index()] = state;
                BankOutcome {
                    deactivated: None,
                    light: Some(if state {
                        LightCommand::On
                    } else {
                        LightCommand::Off
                    }),
                }
            }
            _ => {
                let mut deactivated = None;
                if state {
                    for other in SELECTORS {
                        if other != role && self.states[other.index()] {
                            self.states[other.index()] = false;
                            deactivated = Some(other);
                        }
                    }
                }
                self.states[role.index()] = state;
                BankOutcome {
                    deactivated,
                    light: None,
                }
            }
        }
    }

    pub fn off(&self) -> bool {
        self.states[PanelRole::Off.index()]
    }

    pub fn fip(&self) -> bool {
        self.states[PanelRole::Fip.index()]
    }

    pub fn spotify(&self) -> bool {
        self.states[PanelRole::Spotify.index()]
    }

    pub fn unused(&self) -> bool {
        self.states[PanelRole::Unused.index()]
    }

    pub fn disco(&self) -> bool {
        self.states[PanelRole::Disco.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activating_fip_deactivates_spotify() {
        let mut bank = Bank::new();
        bank.apply(PanelRole::Spotify, true);
        assert!(bank.spotify());

        let outcome = bank.apply(PanelRole::Fip, true);
        assert!(bank.fip());
        assert!(!bank.spotify());
        assert_eq!(outcome.deactivated, Some(PanelRole::Spotify));
    }

    #[test]
    fn off_never_latches() {
        let mut bank = Bank::new();
        let outcome = bank.apply(PanelRole::Off, true);
        assert!(!bank.off());
        assert_eq!(outcome, BankOutcome::NONE);
    }

    #[test]
    fn disco_is_independent() {
        let mut bank = Bank::new();
        bank.apply(PanelRole::Fip, true);

        let outcome = bank.apply(PanelRole::Disco, true);
        assert!(bank.disco());
        assert!(bank.fip());
        assert_eq!(outcome.deactivated, None);
        assert_eq!(outcome.light, Some(LightCommand::On));

        let outcome = bank.apply(PanelRole::Disco, false);
        assert!(!bank.disco());
        assert!(bank.fip());
        assert_eq!(outcome.light, Some(LightCommand::Off));
    }

    #[test]
    fn selector_release_only_clears_itself() {
        let mut bank = Bank::new();
        bank.apply(PanelRole::Unused, true);
        let outcome = bank.apply(PanelRole::Unused, false);
        assert!(!bank.unused());
        assert_eq!(outcome.deactivated, None);
    }

    #[test]
    fn at_most_one_selector_active() {
        let mut bank = Bank::new();
        for role in [PanelRole::Fip, PanelRole::Spotify, PanelRole::Unused, PanelRole::Fip] {
            bank.apply(role, true);
            let active = [bank.fip(), bank.spotify(), bank.unused()]
                .iter()
                .filter(|s| **s)
                .count();
            assert_eq!(active, 1);
        }
        assert!(bank.fip());
    }
}
