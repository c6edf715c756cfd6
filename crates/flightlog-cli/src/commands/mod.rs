pub mod catalog;
pub mod init;
pub mod maintenance;
pub mod reports;
pub mod sections;
pub mod transfer;
pub mod weather;
