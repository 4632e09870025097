use actix_web::{get, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        account::repository_pg::AccountRepositoryPg,
        friendship::repository_pg::FriendshipRepositoryPg,
        profile::{
            model::{ProfileView, SearchQuery, UserCard},
            service::ProfileService,
        },
    },
    utils::ValidatedQuery,
};

pub type ProfileSvc = ProfileService<FriendshipRepositoryPg, AccountRepositoryPg>;

#[get("/search")]
pub async fn search_profiles(
    profiles: web::Data<ProfileSvc>,
    query: ValidatedQuery<SearchQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserCard>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let SearchQuery { q, limit } = query.0;
    let cards = profiles.search(viewer_id, q.as_deref(), limit).await?;

    Ok(success::Success::ok(Some(cards)))
}

#[get("/suggestions")]
pub async fn suggested_profiles(
    profiles: web::Data<ProfileSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserCard>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let cards = profiles.suggestions(viewer_id).await?;

    Ok(success::Success::ok(Some(cards)))
}

#[get("/{username}")]
pub async fn get_profile(
    profiles: web::Data<ProfileSvc>,
    username: web::Path<String>,
    req: HttpRequest,
) -> Result<success::Success<ProfileView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let view = profiles.profile(viewer_id, &username).await?;

    Ok(success::Success::ok(Some(view)).message("Profile retrieved successfully"))
}
