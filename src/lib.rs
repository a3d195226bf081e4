pub mod config;
pub mod content;
pub mod icons;
pub mod logger;
pub mod site_builder;
pub mod text_utils;
pub mod view;
mod test_data;
