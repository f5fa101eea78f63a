pub mod builder;
pub mod home;
pub mod layout;

pub use builder::{remove_environment, VenvBuilder};
pub use home::{find_environments, resolve_target};
pub use layout::VenvLayout;
