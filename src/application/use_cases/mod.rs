mod fetch_reply;
mod submit_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use fetch_reply::*;
pub use submit_message::*;
