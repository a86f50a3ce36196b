//! Domain core of the Apprenti learning-catalog front end: everything the
//! browser pages do that does not touch the DOM.

pub mod api;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod errors;
pub mod handoff;
pub mod html;
pub mod models;
pub mod navigation;
pub mod schema;
pub mod service;
