pub mod activation;
pub mod prompt;
pub mod rc;
pub mod session;

pub use activation::activation_env;
pub use rc::RcFiles;
pub use session::{EphemeralGuard, SessionOptions, ShellSession};
