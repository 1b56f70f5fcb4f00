#[macro_use]
extern crate log;

pub mod error;
pub mod form;
pub mod guard;
pub mod models;
pub mod referral;
pub mod route;
pub mod session;
