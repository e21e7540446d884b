pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
pub mod settings;
