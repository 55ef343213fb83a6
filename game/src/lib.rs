pub mod controller;
pub mod display;
pub mod letters;
pub mod settings;
pub mod sfx;
pub mod tile;
pub mod view;
