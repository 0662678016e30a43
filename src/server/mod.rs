// Server module entry
// Listener setup, connection serving, accept loop, and signal handling

pub mod accept;
pub mod connection;
pub mod listener;
pub mod signal;

pub use accept::run_accept_loop;
pub use listener::create_listener;
pub use signal::{start_signal_handler, SignalHandler};
