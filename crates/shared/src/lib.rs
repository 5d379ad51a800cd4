//! Types shared between the store, the views and the console front end.

pub mod domain;
pub mod error;
pub mod protocol;
