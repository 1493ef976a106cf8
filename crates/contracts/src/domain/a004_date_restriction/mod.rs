pub mod aggregate;
pub mod view;
