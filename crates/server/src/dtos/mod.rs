pub mod submission_dto;
pub mod user_dto;
