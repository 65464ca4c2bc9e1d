pub mod demo;
pub mod domain;
pub mod error;
pub mod history;
pub mod protocol;
