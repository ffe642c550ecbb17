mod action_tests;
mod board_tests;
