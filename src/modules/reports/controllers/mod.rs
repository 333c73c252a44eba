mod report_controller;

pub use report_controller::ReportQuery;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    report_controller::configure(cfg);
}
