pub mod board_actions;
pub mod page;
