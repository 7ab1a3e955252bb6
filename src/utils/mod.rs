pub mod latex;
pub mod logging;

pub use latex::latex_to_text;
pub use logging::truncate_text;
