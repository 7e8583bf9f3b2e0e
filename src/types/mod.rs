pub mod dvla;
pub mod envelope;
pub mod vrm;

pub use dvla::{EnquiryRequest, LookupRequest};
pub use envelope::VehicleEnvelope;
pub use vrm::Vrm;
