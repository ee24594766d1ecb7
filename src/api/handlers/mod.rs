pub mod hello;
pub mod members;
pub mod teams;
