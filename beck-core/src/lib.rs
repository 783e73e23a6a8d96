mod as_value;
mod connection;
mod error;
mod metadata;
mod param;
mod query;
mod statement;
mod value;

pub use as_value::*;
pub use connection::*;
pub use error::*;
pub use metadata::*;
pub use param::*;
pub use query::*;
pub use statement::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
