pub mod catalog;
pub mod event;
pub mod mode;
pub mod profile;
