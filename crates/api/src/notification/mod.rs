mod claim;
mod email_dispatcher;
mod push_dispatcher;
pub mod send_notifications;
mod sms_dispatcher;
mod subscribers;
mod templates;

use actix_web::web;
use send_notifications::send_notifications_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cron/notifications",
        web::get().to(send_notifications_controller),
    );
    cfg.route(
        "/cron/notifications",
        web::post().to(send_notifications_controller),
    );
}
