#![forbid(unsafe_code)]

pub mod alert;
pub mod common;
pub mod filedrop;
pub mod profile;
pub mod rule;
pub mod trend;
