pub mod user;
pub use user::*;

pub mod referral;
pub use referral::*;
