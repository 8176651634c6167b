pub mod frame_timer;
pub mod math;
