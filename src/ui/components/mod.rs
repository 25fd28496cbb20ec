pub mod answer_area;
pub mod menu;
pub mod progress_bar;
pub mod summary;
pub mod token_bank;
