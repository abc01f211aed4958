use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        catalog::{
            CATALOG_PAGE_SIZE, CarDetail, CatalogPage, CatalogQuery, CommentRequest, like_pattern,
            page_count, parse_page,
        },
        forms::comment_form,
    },
    entity::{
        cars::{Column as CarCol, Entity as Cars},
        comment_hashtags::{
            ActiveModel as CommentHashtagActive, Column as CommentHashtagCol,
            Entity as CommentHashtags,
        },
        comments::{
            ActiveModel as CommentActive, Column as CommentCol, Entity as Comments,
            Model as CommentModel,
        },
        hashtags::{Column as HashtagCol, Entity as Hashtags},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Comment, Hashtag, User, hashtag_from_entity, user_from_entity},
    response::{ApiResponse, Meta},
    services::car_service::{attach_images, car_with_images, find_car},
    state::AppState,
};

/// One catalog page: newest model year first, optionally filtered on brand or category.
pub async fn list_catalog(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<CatalogPage>> {
    let page = parse_page(query.page.as_deref())?;

    let mut finder = Cars::find();
    if let Some(search) = query.search() {
        let pattern = like_pattern(search);
        finder = finder.filter(
            Condition::any()
                .add(Expr::col(CarCol::Brand).ilike(pattern.clone()))
                .add(Expr::col(CarCol::Category).ilike(pattern)),
        );
    }
    let finder = finder
        .order_by_desc(CarCol::Year)
        .order_by_asc(CarCol::Id);

    let total = finder.clone().count(&state.orm).await?;
    let total_pages = page_count(total, CATALOG_PAGE_SIZE);
    if page > total_pages {
        return Err(AppError::NotFound);
    }

    let cars = finder
        .limit(CATALOG_PAGE_SIZE)
        .offset((page - 1) * CATALOG_PAGE_SIZE)
        .all(&state.orm)
        .await?;
    let items = attach_images(&state.orm, cars).await?;

    let meta = Meta::paged(
        page as i64,
        CATALOG_PAGE_SIZE as i64,
        total as i64,
        total_pages as i64,
    );
    Ok(ApiResponse::success(
        "Catalog",
        CatalogPage { items },
        Some(meta),
    ))
}

pub async fn car_detail(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CarDetail>> {
    let detail = load_detail(&state.orm, id).await?;
    Ok(ApiResponse::success("Car", detail, None))
}

/// Store a comment with its hashtags and return the refreshed detail view.
pub async fn add_comment(
    state: &AppState,
    user: &AuthUser,
    car_id: Uuid,
    payload: CommentRequest,
) -> AppResult<ApiResponse<CarDetail>> {
    let txn = state.orm.begin().await?;
    find_car(&txn, car_id).await?;
    let comment = payload.validate()?;

    if !comment.hashtag_ids.is_empty() {
        let found = Hashtags::find()
            .filter(HashtagCol::Id.is_in(comment.hashtag_ids.clone()))
            .count(&txn)
            .await?;
        if found != comment.hashtag_ids.len() as u64 {
            return Err(AppError::field(
                "hashtags",
                "Select a valid choice. One or more hashtags do not exist.",
            ));
        }
    }

    let saved = CommentActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        car_id: Set(car_id),
        text: Set(comment.text),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    if !comment.hashtag_ids.is_empty() {
        let links = comment.hashtag_ids.iter().map(|hashtag_id| CommentHashtagActive {
            comment_id: Set(saved.id),
            hashtag_id: Set(*hashtag_id),
        });
        CommentHashtags::insert_many(links).exec(&txn).await?;
    }
    txn.commit().await?;

    tracing::info!(comment_id = %saved.id, car_id = %car_id, user_id = %user.user_id, "comment added");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "comment_create",
        "comments",
        serde_json::json!({ "comment_id": saved.id, "car_id": car_id }),
    )
    .await;

    let detail = load_detail(&state.orm, car_id).await?;
    Ok(ApiResponse::success(
        "Comment added",
        detail,
        Some(Meta::empty()),
    ))
}

async fn load_detail<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<CarDetail> {
    let car = find_car(conn, id).await?;
    let owner = match car.owner_id {
        Some(owner_id) => Users::find_by_id(owner_id)
            .one(conn)
            .await?
            .map(user_from_entity),
        None => None,
    };
    let car = car_with_images(conn, car).await?;

    let comments = Comments::find()
        .filter(CommentCol::CarId.eq(id))
        .order_by_asc(CommentCol::CreatedAt)
        .order_by_asc(CommentCol::Id)
        .all(conn)
        .await?;
    let comments = hydrate_comments(conn, comments).await?;

    let available_hashtags: Vec<Hashtag> = Hashtags::find()
        .order_by_asc(HashtagCol::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(hashtag_from_entity)
        .collect();
    let comment_form = comment_form(&available_hashtags);

    Ok(CarDetail {
        car,
        owner,
        comments,
        available_hashtags,
        comment_form,
    })
}

/// Attach authors and hashtags to comments with one query per relation.
async fn hydrate_comments<C: ConnectionTrait>(
    conn: &C,
    comments: Vec<CommentModel>,
) -> AppResult<Vec<Comment>> {
    if comments.is_empty() {
        return Ok(Vec::new());
    }

    let comment_ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
    let author_ids: Vec<Uuid> = comments
        .iter()
        .map(|c| c.user_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<Uuid, User> = Users::find()
        .filter(UserCol::Id.is_in(author_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, user_from_entity(u)))
        .collect();

    let links = CommentHashtags::find()
        .filter(CommentHashtagCol::CommentId.is_in(comment_ids))
        .all(conn)
        .await?;

    let mut tags_by_comment: HashMap<Uuid, Vec<Hashtag>> = HashMap::new();
    if !links.is_empty() {
        let tag_ids: Vec<Uuid> = links
            .iter()
            .map(|l| l.hashtag_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let tags: HashMap<Uuid, Hashtag> = Hashtags::find()
            .filter(HashtagCol::Id.is_in(tag_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|t| (t.id, hashtag_from_entity(t)))
            .collect();
        for link in links {
            if let Some(tag) = tags.get(&link.hashtag_id) {
                tags_by_comment
                    .entry(link.comment_id)
                    .or_default()
                    .push(tag.clone());
            }
        }
        for tags in tags_by_comment.values_mut() {
            tags.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    Ok(comments
        .into_iter()
        .map(|c| Comment {
            id: c.id,
            car_id: c.car_id,
            author: authors.get(&c.user_id).cloned(),
            text: c.text,
            hashtags: tags_by_comment.remove(&c.id).unwrap_or_default(),
            created_at: c.created_at.with_timezone(&chrono::Utc),
        })
        .collect())
}
