mod load;
mod types;

pub use load::{apply_env_overrides, load, load_default, CONFIG_FILE_NAME};
pub use types::*;
