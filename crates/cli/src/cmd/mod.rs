mod generate;
mod status;

pub use generate::cmd_generate;
pub use status::cmd_status;
