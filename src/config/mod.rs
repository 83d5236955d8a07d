pub mod load;
pub mod types;

pub use load::{ROOT_ENV_VAR, resolve_root};
pub use types::RenamerConfig;
