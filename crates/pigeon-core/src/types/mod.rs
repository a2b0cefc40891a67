//! Bot API wire types.
//! Docs: <https://core.telegram.org/bots/api#available-types>

mod inline;
mod markup;
mod message;
mod update;


pub use inline::*;
pub use markup::*;
pub use message::*;
pub use update::*;
