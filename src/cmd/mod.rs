pub mod init;
pub mod month;
pub mod phrases;
pub mod root;
pub mod speak;
