pub mod end;
pub mod feedback;
pub mod init;
pub mod login;
pub mod logout;
pub mod register;
pub mod shifts;
pub mod start;
pub mod stores;
pub mod tally;
pub mod whoami;
