pub mod cache;
pub mod page;
pub mod table;

pub use cache::{Cache, NoopCache, TtlCache};
pub use page::Page;
pub use table::Table;
