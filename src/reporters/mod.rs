pub mod html;
pub mod mail;
pub mod writer;
