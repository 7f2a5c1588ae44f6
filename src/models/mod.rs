mod chapter;
mod follow;
mod history;
mod series;
mod user;

pub use chapter::*;
pub use follow::*;
pub use history::*;
pub use series::*;
pub use user::*;
