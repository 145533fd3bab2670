pub mod authenticate;
pub mod error;
pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod two_factor;

pub use login::login;
pub use profile::profile;
pub use refresh::refresh;
pub use register::register;
pub use two_factor::{complete_two_factor, initiate_two_factor};
