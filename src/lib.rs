//! Board support for the encoder panel firmware.
#![no_std]

pub mod hardware;
