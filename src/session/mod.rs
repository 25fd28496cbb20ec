pub mod answer;
pub mod result;
pub mod scheduler;
pub mod token_bank;
