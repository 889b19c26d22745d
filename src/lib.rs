pub mod layout;
pub mod ppi;
pub mod util;
