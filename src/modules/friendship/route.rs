use crate::modules::friendship::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friendships")
            .service(send_friend_request)
            .service(list_friend_requests)
            .service(accept_friend_request)
            .service(decline_friend_request)
            .service(list_friends)
            .service(friendship_status)
            .service(friend_count)
            .service(unfriend),
    );
}
