pub mod bcnf;
pub mod synthesis;
