//! Console actions: each one drives the client and prints the outcome.

mod configure;
mod search;
mod similar;

pub use configure::configure;
pub use search::search;
pub use similar::similar;
