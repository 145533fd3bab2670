pub mod complete_two_factor;
#[cfg(test)]
pub(crate) mod test_support;
pub mod initiate_two_factor;
pub mod login;
pub mod refresh_token;
pub mod register;
