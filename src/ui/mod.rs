pub mod action;
pub mod panels;
pub mod view;
