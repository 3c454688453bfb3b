pub mod build;
pub mod target_box;
