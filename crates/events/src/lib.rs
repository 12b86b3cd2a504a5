//! Domain events and the decide/apply execution helper.

pub mod event;
pub mod handler;

pub use event::Event;
pub use handler::execute;
