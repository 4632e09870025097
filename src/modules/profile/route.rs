use crate::modules::profile::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    // fixed paths before the username catch-all
    cfg.service(
        scope("/profiles").service(search_profiles).service(suggested_profiles).service(get_profile),
    );
}
