pub mod lookup_request;

pub use lookup_request::LookupPreprocess;
