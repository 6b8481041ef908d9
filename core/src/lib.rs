#![no_std]

pub mod app;
pub mod color;
pub mod config;
pub mod frame;
pub mod palette;
pub mod pipeline;
pub mod quantize;
pub mod resize;
pub mod sink;
pub mod source;

extern crate alloc;
