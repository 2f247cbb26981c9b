pub mod header;
pub mod logs;
pub mod status_bar;
pub mod summary;
