// ticket-server/src/api/mod.rs
pub mod ticket;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/api")
            .service(ticket::get_js_ticket)
    );
}
