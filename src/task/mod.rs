pub mod buttons;
pub mod control;
pub mod front_panel;
pub mod light_output;
pub mod rotary_menu;
