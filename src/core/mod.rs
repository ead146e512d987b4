pub mod clock;
pub mod session;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use session::Session;
