pub mod channel;
pub mod init;
pub mod interactive;
pub mod recent;
pub mod serve;
