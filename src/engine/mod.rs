pub mod camera;
pub mod controls;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod rendering;
pub mod scene;
pub mod utils;
