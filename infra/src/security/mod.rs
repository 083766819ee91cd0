//! Security adapters

mod password;

pub use password::BcryptPasswordHasher;
