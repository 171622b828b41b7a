pub mod entry;
pub mod gem;
pub mod item;

pub use entry::FeedEntry;
pub use gem::Gem;
pub use item::{Comment, Item, Story};
