pub mod draw_record;
pub mod site;

pub use draw_record::*;
pub use site::*;
