mod api;
mod provider;
mod relayer;

pub use api::*;
pub use provider::*;
pub use relayer::*;
