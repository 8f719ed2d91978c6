pub mod bingo;
pub mod validation;
