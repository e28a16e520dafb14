// Platform-independent backdrop logic; everything here builds on the host.
pub mod backdrop;
pub mod config;
pub mod motion;
pub mod particles;
pub mod scheduler;

pub use backdrop::*;
pub use config::*;
pub use motion::*;
pub use particles::*;
pub use scheduler::*;
