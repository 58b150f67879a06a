//! Domain model: the user being registered and the reference records it
//! links to.

mod gender;
mod reference;
mod user;

pub use gender::*;
pub use reference::*;
pub use user::*;
