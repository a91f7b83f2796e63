pub mod alacritty;
pub mod apply;
pub mod branding;
pub mod error;
pub mod filter;
pub mod logging;
pub mod platform;
pub mod sanitize;
pub mod settings;
pub mod system;
pub mod terminals;
pub mod ui;

pub use error::{Error, Result};
