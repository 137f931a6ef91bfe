// src/lib.rs

//! busbot: relays live bus arrivals into a chat channel.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
