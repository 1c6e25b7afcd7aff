pub mod analysis;
pub mod comprehend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod language;
pub mod live;
pub mod mock;
pub mod service;
pub mod web;
