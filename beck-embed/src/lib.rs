mod binder;
mod connection;
mod engine;
mod placeholder;
mod rewrite;
mod statement;
mod stream;
mod worker;

pub use binder::*;
pub use connection::*;
pub use engine::*;
pub use placeholder::*;
pub use rewrite::*;
pub use statement::*;
pub use stream::*;
