#![no_std]

extern crate alloc;

pub mod config;
pub mod display;
pub mod leds;
pub mod net;
pub mod sensor;
pub mod wifi;
