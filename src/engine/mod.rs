pub mod clock;
pub mod frame;

pub use clock::{EngineClock, ManualClock, VirtualClock, VirtualTime};
pub use frame::FrameLoop;
