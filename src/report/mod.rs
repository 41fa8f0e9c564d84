pub mod render;
pub mod stakes;
