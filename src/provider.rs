pub mod api;
pub mod cover;
