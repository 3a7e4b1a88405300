pub mod orchestration;

pub use orchestration::{run, Resolution, RunArgs};
