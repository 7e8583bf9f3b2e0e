pub mod dvla_api;

pub use dvla_api::DvlaApi;
