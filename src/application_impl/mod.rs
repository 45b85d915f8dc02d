mod resolver_impl;
mod user_store_fake;

pub use resolver_impl::*;
pub use user_store_fake::*;
