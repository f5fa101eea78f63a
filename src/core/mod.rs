pub mod error;
pub mod path;
pub mod process;
pub mod settings;

pub use error::{Result, VshError};
pub use path::{absolutize, looks_like_path};
pub use process::ProcessExecutor;
pub use settings::Settings;
