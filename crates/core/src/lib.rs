#![forbid(unsafe_code)]

pub mod bank;
pub mod countdown;
pub mod model;
pub mod review;
pub mod session;

pub use countdown::{Countdown, Tick};
pub use review::{Progress, ReviewItem, ReviewSummary};
pub use session::{CerdasPhase, Session, Step};
