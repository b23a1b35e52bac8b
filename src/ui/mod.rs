/// Text rendering: menus, filter listings and statistics tables. Nothing in
/// here reads input or mutates a dataset.
pub mod menu;
pub mod table;
