pub mod account;
pub mod email;
pub mod otp;
pub mod password;
pub mod principal;
pub mod profile;
pub mod role;
