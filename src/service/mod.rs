pub mod execute_service;
pub mod forms;
