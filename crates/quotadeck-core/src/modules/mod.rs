//! Account quota, model discovery, and persistence modules.

pub mod account;
pub mod config;
pub mod discovery;
pub mod feed;
pub mod model_filter;
pub mod refresh;
pub mod repository;
pub mod view;
