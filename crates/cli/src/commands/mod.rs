pub mod config_cmd;
pub mod lookup;
pub mod serve;
pub mod status;
