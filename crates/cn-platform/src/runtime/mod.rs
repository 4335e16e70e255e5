pub mod clipboard;
mod ticker;

pub use ticker::{spawn_periodic, TickerHandle};
