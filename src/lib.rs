pub mod catalog;
pub mod config;
pub mod detail;
pub mod dom;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod nav;
pub mod net;
pub mod viewer;
