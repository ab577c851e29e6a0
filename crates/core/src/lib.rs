#![deny(warnings)]

pub mod action;
pub mod config;
pub mod delegate;
pub mod native;
pub mod prompt;
pub mod text;
pub mod text_field;
pub mod translate;
pub mod util;
