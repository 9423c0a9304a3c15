pub mod config;
pub mod consts;
pub mod container;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod io;
pub mod view;
