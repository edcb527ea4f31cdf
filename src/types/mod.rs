pub mod commodity;
pub mod forecast;
pub mod observation;

pub use commodity::*;
pub use forecast::*;
pub use observation::*;
