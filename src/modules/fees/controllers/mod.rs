mod fee_controller;

pub use fee_controller::{CalculatePaymentRequest, CalculatePaymentResponse};

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    fee_controller::configure(cfg);
}
