//! Connection configurations: types, the encrypting codec, and the manager

mod codec;
mod manager;
mod types;

pub use codec::ConfigCodec;
pub use manager::ConnectionConfigManager;
pub use types::*;
