pub mod create;
pub mod doctor;
pub mod enter;
pub mod list;
pub mod remove;
pub mod upgrade;
