use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        account::{model::AccountSummary, repository_pg::AccountRepositoryPg},
        friendship::{
            model::{Decision, FriendCountResponse, FriendshipView, PendingRequest, SendRequestBody},
            repository_pg::FriendshipRepositoryPg,
            schema::FriendshipEntity,
            service::RelationshipManager,
        },
    },
    utils::ValidatedJson,
};

pub type RelationshipSvc = RelationshipManager<FriendshipRepositoryPg, AccountRepositoryPg>;

#[post("/requests")]
pub async fn send_friend_request(
    relationships: web::Data<RelationshipSvc>,
    body: ValidatedJson<SendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let requester_id = get_claims(&req)?.sub;
    let friendship = relationships.send_request(requester_id, body.0.addressee_id).await?;

    Ok(success::Success::created(Some(friendship)).message("Friend request sent successfully"))
}

#[get("/requests")]
pub async fn list_friend_requests(
    relationships: web::Data<RelationshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PendingRequest>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = relationships.list_pending_incoming(user_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_friend_request(
    relationships: web::Data<RelationshipSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let addressee_id = get_claims(&req)?.sub;
    let friendship =
        relationships.respond_to_request(*request_id, addressee_id, Decision::Accept).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friend request accepted successfully"))
}

#[post("/requests/{request_id}/decline")]
pub async fn decline_friend_request(
    relationships: web::Data<RelationshipSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let addressee_id = get_claims(&req)?.sub;
    let friendship =
        relationships.respond_to_request(*request_id, addressee_id, Decision::Decline).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friend request declined"))
}

#[get("")]
pub async fn list_friends(
    relationships: web::Data<RelationshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<AccountSummary>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = relationships.list_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/status/{user_id}")]
pub async fn friendship_status(
    relationships: web::Data<RelationshipSvc>,
    other_user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipView>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let view = relationships.get_status(user_id, *other_user_id).await?;

    Ok(success::Success::ok(Some(view)))
}

#[get("/count/{user_id}")]
pub async fn friend_count(
    relationships: web::Data<RelationshipSvc>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<FriendCountResponse>, error::Error> {
    let count = relationships.count_friends(*user_id).await?;

    Ok(success::Success::ok(Some(FriendCountResponse { count })))
}

#[delete("/{user_id}")]
pub async fn unfriend(
    relationships: web::Data<RelationshipSvc>,
    other_user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    relationships.unfriend(user_id, *other_user_id).await?;
    Ok(success::Success::no_content())
}
