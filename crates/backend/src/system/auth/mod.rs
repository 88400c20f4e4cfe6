pub mod capability;
pub mod jwt;
pub mod middleware;
pub mod password;
