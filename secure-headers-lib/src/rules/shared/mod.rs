mod array;
mod uri;
pub(crate) mod value;

pub use array::wrap_array;
pub use uri::{encode_strict_uri, StrictUriEncoder, UriEncoder};
