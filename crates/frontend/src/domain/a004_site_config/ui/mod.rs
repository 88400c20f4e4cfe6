pub mod logo;
pub mod social;
