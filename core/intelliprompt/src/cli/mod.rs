mod args;

pub use args::{parse_args, print_completion, Config, ParseOutcome};
#[allow(unused_imports)]
pub use args::parse_args_from;
