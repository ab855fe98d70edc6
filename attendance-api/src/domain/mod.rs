mod attendance;
mod auth;
mod company;
mod date_range;
mod employee;
mod location;
mod qr;

pub use attendance::*;
pub use auth::*;
pub use company::*;
pub use date_range::*;
pub use employee::*;
pub use location::*;
pub use qr::*;
