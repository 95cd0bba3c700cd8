pub mod constants;
pub mod label;

pub use constants::*;
pub use label::sanitize_label;
