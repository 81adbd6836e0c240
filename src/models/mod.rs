pub mod analysis;
pub mod daily;
pub mod location;
pub mod request;

pub use analysis::*;
pub use daily::*;
pub use location::*;
pub use request::*;
