pub mod base;
pub mod html;
pub mod http;
