pub mod handlers;
pub mod keys;
pub mod selection;
pub mod service;
pub mod values;
