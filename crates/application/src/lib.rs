#![forbid(unsafe_code)]

pub mod actions;
pub mod alerts_service_impl;
pub mod debounce;
pub mod filedrop_service_impl;
pub mod profile_service_impl;
pub mod render;
pub mod rules_service_impl;
