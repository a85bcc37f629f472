pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod business;
pub mod service;
pub mod request;

#[cfg(test)]
mod tests;
