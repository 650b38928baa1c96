//! Command handlers, one module per command family.

pub mod devices;
pub mod passwd;
pub mod sections;
pub mod status;
pub mod watch;

mod util;

pub use util::{Ctx, connect};
