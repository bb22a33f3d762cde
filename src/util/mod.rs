// Utility modules

pub mod detect;
pub mod encode;
pub mod screenshot_store;
