//! Panel configuration
//!
//! Read-only settings built once at startup from the embedded `radio.conf`
//! and passed by value to every task. A gpio value of zero or less means the
//! role is disabled: no task is spawned for it and no hardware is touched.
//! Physical pin assignment is fixed at build time (see `resources`); the
//! configured gpio numbers are the line identities used by the event
//! translation lookups.

use crate::system::input::PullMode;
use crate::system::panel::PanelRole;
use defmt::{error, Format};
use embassy_time::Duration;

/// Momentary push button roles on the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ButtonRole {
    /// Volume down
    Left,
    /// Volume up
    Right,
    Mute,
    /// Channel up
    Up,
    /// Channel down
    Down,
    Menu,
    Aux1,
    Aux2,
    Aux3,
}

impl ButtonRole {
    pub fn name(self) -> &'static str {
        match self {
            ButtonRole::Left => "left",
            ButtonRole::Right => "right",
            ButtonRole::Mute => "mute",
            ButtonRole::Up => "up",
            ButtonRole::Down => "down",
            ButtonRole::Menu => "menu",
            ButtonRole::Aux1 => "aux1",
            ButtonRole::Aux2 => "aux2",
            ButtonRole::Aux3 => "aux3",
        }
    }
}

/// Immutable panel configuration.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub pull_up_down: PullMode,

    // Momentary buttons
    pub left_switch: i32,
    pub right_switch: i32,
    pub mute_switch: i32,
    pub up_switch: i32,
    pub down_switch: i32,
    pub menu_switch: i32,
    pub aux_switch1: i32,
    pub aux_switch2: i32,
    pub aux_switch3: i32,

    // Latching selector bank
    pub off_switch: i32,
    pub fip_switch: i32,
    pub spotify_switch: i32,
    pub unused_switch: i32,
    pub disco_switch: i32,

    /// Relay output for the disco light
    pub disco_light: i32,

    // Rotary menu switch lines, binary weighted
    pub menu_switch_value_1: i32,
    pub menu_switch_value_2: i32,
    pub menu_switch_value_4: i32,

    /// Hardware-level minimum spacing between recognized edges
    pub bounce_time: Duration,
    /// Minimum duration a candidate switch state must persist
    pub stable_time: Duration,
    /// Hold duration before a selector press switches the source
    pub selector_hold: Duration,
    /// Hold duration before the menu button powers the radio off
    pub menu_hold: Duration,
    /// Settle delay after a rotary switch edge before trusting a read
    pub settle_time: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pull_up_down: PullMode::Down,
            left_switch: 14,
            right_switch: 15,
            mute_switch: 22,
            up_switch: 24,
            down_switch: 23,
            menu_switch: 17,
            aux_switch1: 0,
            aux_switch2: 0,
            aux_switch3: 0,
            off_switch: 0,
            fip_switch: 0,
            spotify_switch: 0,
            unused_switch: 0,
            disco_switch: 0,
            disco_light: 0,
            menu_switch_value_1: 0,
            menu_switch_value_2: 0,
            menu_switch_value_4: 0,
            bounce_time: Duration::from_millis(200),
            stable_time: Duration::from_millis(50),
            selector_hold: Duration::from_millis(100),
            menu_hold: Duration::from_millis(3000),
            settle_time: Duration::from_millis(100),
        }
    }
}

impl Settings {
    /// Parses the configuration embedded in the firmware image.
    pub fn load() -> Self {
        Self::from_conf(include_str!("../../radio.conf"))
    }

    /// Parses `key=value` lines. Unknown keys are ignored, malformed values
    /// are reported and replaced by the safe default.
    pub fn from_conf(conf: &str) -> Self {
        let mut settings = Self::default();
        for line in conf.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            settings.apply(key.trim(), value.trim());
        }
        settings
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "pull_up_down" => match value {
                "up" => self.pull_up_down = PullMode::Up,
                "down" => self.pull_up_down = PullMode::Down,
                _ => {
                    error!("invalid pull_up_down value, using down");
                    self.pull_up_down = PullMode::Down;
                }
            },
            "left_switch" => parse_gpio(key, value, &mut self.left_switch),
            "right_switch" => parse_gpio(key, value, &mut self.right_switch),
            "mute_switch" => parse_gpio(key, value, &mut self.mute_switch),
            "up_switch" => parse_gpio(key, value, &mut self.up_switch),
            "down_switch" => parse_gpio(key, value, &mut self.down_switch),
            "menu_switch" => parse_gpio(key, value, &mut self.menu_switch),
            "aux_switch1" => parse_gpio(key, value, &mut self.aux_switch1),
            "aux_switch2" => parse_gpio(key, value, &mut self.aux_switch2),
            "aux_switch3" => parse_gpio(key, value, &mut self.aux_switch3),
            "off_switch" => parse_gpio(key, value, &mut self.off_switch),
            "fip_switch" => parse_gpio(key, value, &mut self.fip_switch),
            "spotify_switch" => parse_gpio(key, value, &mut self.spotify_switch),
            "unused_switch" => parse_gpio(key, value, &mut self.unused_switch),
            "disco_switch" => parse_gpio(key, value, &mut self.disco_switch),
            "disco_light" => parse_gpio(key, value, &mut self.disco_light),
            "menu_switch_value_1" => parse_gpio(key, value, &mut self.menu_switch_value_1),
            "menu_switch_value_2" => parse_gpio(key, value, &mut self.menu_switch_value_2),
            "menu_switch_value_4" => parse_gpio(key, value, &mut self.menu_switch_value_4),
            "bounce_time_ms" => parse_duration(key, value, &mut self.bounce_time),
            "stable_time_ms" => parse_duration(key, value, &mut self.stable_time),
            "selector_hold_ms" => parse_duration(key, value, &mut self.selector_hold),
            "menu_hold_ms" => parse_duration(key, value, &mut self.menu_hold),
            "settle_time_ms" => parse_duration(key, value, &mut self.settle_time),
            _ => {}
        }
    }

    /// Line identity for a momentary button role.
    pub fn button_gpio(&self, role: ButtonRole) -> i32 {
        match role {
            ButtonRole::Left => self.left_switch,
            ButtonRole::Right => self.right_switch,
            ButtonRole::Mute => self.mute_switch,
            ButtonRole::Up => self.up_switch,
            ButtonRole::Down => self.down_switch,
            ButtonRole::Menu => self.menu_switch,
            ButtonRole::Aux1 => self.aux_switch1,
            ButtonRole::Aux2 => self.aux_switch2,
            ButtonRole::Aux3 => self.aux_switch3,
        }
    }

    /// Line identity for a selector bank member.
    pub fn panel_gpio(&self, role: PanelRole) -> i32 {
        match role {
            PanelRole::Off => self.off_switch,
            PanelRole::Fip => self.fip_switch,
            PanelRole::Spotify => self.spotify_switch,
            PanelRole::Unused => self.unused_switch,
            PanelRole::Disco => self.disco_switch,
        }
    }

    /// True when all three rotary menu switch lines are wired.
    pub fn rotary_switch_wired(&self) -> bool {
        self.menu_switch_value_1 > 0 && self.menu_switch_value_2 > 0 && self.menu_switch_value_4 > 0
    }
}

/// True when the configured gpio names a usable line.
pub fn enabled(gpio: i32) -> bool {
    gpio > 0
}

fn parse_gpio(key: &str, value: &str, slot: &mut i32) {
    match value.parse::<i32>() {
        Ok(gpio) => *slot = gpio,
        Err(_) => error!("invalid gpio for {=str}, keeping default", key),
    }
}

fn parse_duration(key: &str, value: &str, slot: &mut Duration) {
    match value.parse::<u64>() {
        Ok(ms) => *slot = Duration::from_millis(ms),
        Err(_) => error!("invalid duration for {=str}, keeping default", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_and_timings() {
        let conf = "\
# wiring
pull_up_down=up
left_switch=14
off_switch=27
disco_light=26
menu_switch_value_1=16
menu_switch_value_2=8
menu_switch_value_4=7
bounce_time_ms=150
menu_hold_ms=2500
";
        let s = Settings::from_conf(conf);
        assert_eq!(s.pull_up_down, PullMode::Up);
        assert_eq!(s.left_switch, 14);
        assert_eq!(s.off_switch, 27);
        assert_eq!(s.disco_light, 26);
        assert!(s.rotary_switch_wired());
        assert_eq!(s.bounce_time, Duration::from_millis(150));
        assert_eq!(s.menu_hold, Duration::from_millis(2500));
        // untouched keys keep their defaults
        assert_eq!(s.menu_switch, 17);
        assert_eq!(s.stable_time, Duration::from_millis(50));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let s = Settings::from_conf("pull_up_down=sideways\nleft_switch=banana\n");
        assert_eq!(s.pull_up_down, PullMode::Down);
        assert_eq!(s.left_switch, Settings::default().left_switch);
    }

    #[test]
    fn zero_gpio_disables_a_role() {
        let s = Settings::from_conf("aux_switch1=0\nmenu_switch_value_1=0\n");
        assert!(!enabled(s.aux_switch1));
        assert!(!s.rotary_switch_wired());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let s = Settings::from_conf("\n# left_switch=9\n  \nright_switch=21\n");
        assert_eq!(s.left_switch, Settings::default().left_switch);
        assert_eq!(s.right_switch, 21);
    }

    #[test]
    fn gpio_lookup_by_role() {
        let s = Settings::from_conf("mute_switch=4\nfip_switch=22\n");
        assert_eq!(s.button_gpio(ButtonRole::Mute), 4);
        assert_eq!(s.panel_gpio(PanelRole::Fip), 22);
    }
}
