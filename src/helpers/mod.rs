pub mod config_helper;
pub mod html;
pub mod json_extractor;
