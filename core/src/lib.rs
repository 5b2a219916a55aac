#![no_std]

extern crate alloc;

pub use error::*;
pub use memory::*;
pub use mode::*;
pub use platform::*;
pub use resolver::*;
pub use shared::*;

mod error;
mod memory;
mod mode;
mod platform;
mod resolver;
mod shared;
