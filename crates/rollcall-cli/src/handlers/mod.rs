pub mod class_list;
pub mod command;
pub mod config;
pub mod export;
pub mod show;
pub mod tui;
