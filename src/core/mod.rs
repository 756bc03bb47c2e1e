pub mod scoring;
pub mod select;
pub mod session;
pub mod timeline;
