pub mod list;
pub mod resolve;
pub mod run;
pub mod script;
pub mod show;
pub mod validate;
