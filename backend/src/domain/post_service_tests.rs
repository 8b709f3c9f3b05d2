//! Tests for the post service.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPostRepository, PostSlice};
use crate::domain::{
    AuthorSummary, EmailAddress, ErrorCode, PostChanges, PostContent, PostDraft, PostParts,
    PostStatus, PostTitle, UserName,
};

fn uid(raw: i64) -> UserId {
    UserId::new(raw).expect("valid id")
}

fn pid(raw: i64) -> PostId {
    PostId::new(raw).expect("valid id")
}

fn build_post(id: i64, owner: i64) -> Post {
    let now = Utc::now();
    Post::new(PostParts {
        id: pid(id),
        title: PostTitle::parse("A title").expect("valid title"),
        content: PostContent::parse("Enough content here").expect("valid content"),
        excerpt: None,
        status: PostStatus::Draft,
        author: AuthorSummary {
            id: uid(owner),
            name: UserName::parse("Owner").expect("valid name"),
            email: EmailAddress::parse("owner@example.com").expect("valid email"),
        },
        created_at: now,
        updated_at: now,
    })
}

#[fixture]
fn publish() -> PostChanges {
    PostChanges::try_from_draft(PostDraft {
        status: Some("published"),
        ..PostDraft::default()
    })
    .expect("valid changes")
}

fn service(repo: MockPostRepository) -> PostService<MockPostRepository> {
    PostService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn list_derives_page_count_from_total() {
    let mut repo = MockPostRepository::new();
    repo.expect_list().times(1).return_once(|_| {
        Ok(PostSlice {
            posts: (1..=5).map(|id| build_post(id, 1)).collect(),
            total: 25,
        })
    });

    let query = PostListQuery {
        page: PageRequest::new(3, 10).expect("valid page"),
        ..PostListQuery::default()
    };
    let page = service(repo).list(query).await.expect("list succeeds");

    assert_eq!(page.items().len(), 5);
    assert_eq!(page.info().total(), 25);
    assert_eq!(page.info().pages(), 3);
    assert_eq!(page.info().page(), 3);
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_post() {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(repo).get(pid(4)).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), POST_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn create_maps_unknown_author_to_not_found() {
    let mut repo = MockPostRepository::new();
    repo.expect_create()
        .return_once(|_| Err(PostRepositoryError::unknown_author(9_i64)));

    let new_post = NewPost::try_from_draft(
        PostDraft {
            title: Some("Title"),
            content: Some("Long enough content"),
            ..PostDraft::default()
        },
        uid(9),
    )
    .expect("valid draft");
    let error = service(repo).create(new_post).await.expect_err("unknown author");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owner_can_update(publish: PostChanges) {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(build_post(1, 1))));
    repo.expect_update().times(1).return_once(|_, changes| {
        Ok(Some(
            build_post(1, 1).with_changes(changes, Utc::now()),
        ))
    });

    let post = service(repo)
        .update(UpdatePostRequest {
            post_id: pid(1),
            actor: Some(uid(1)),
            changes: publish,
        })
        .await
        .expect("owner update succeeds");
    assert_eq!(post.status(), PostStatus::Published);
}

#[rstest]
#[case(Some(2), ErrorCode::Forbidden, "You do not have permission to update this post")]
#[case(None, ErrorCode::Unauthorized, NO_TOKEN)]
#[tokio::test]
async fn update_is_refused_without_ownership(
    publish: PostChanges,
    #[case] actor: Option<i64>,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(build_post(1, 1))));
    repo.expect_update().never();

    let error = service(repo)
        .update(UpdatePostRequest {
            post_id: pid(1),
            actor: actor.map(uid),
            changes: publish,
        })
        .await
        .expect_err("refused");
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case(Some(2))]
#[case(None)]
#[tokio::test]
async fn missing_post_is_reported_before_permission(#[case] actor: Option<i64>) {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_delete().never();

    let error = service(repo)
        .delete(DeletePostRequest {
            post_id: pid(8),
            actor: actor.map(uid),
        })
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn non_owner_cannot_delete() {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(build_post(1, 1))));
    repo.expect_delete().never();

    let error = service(repo)
        .delete(DeletePostRequest {
            post_id: pid(1),
            actor: Some(uid(3)),
        })
        .await
        .expect_err("forbidden");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(
        error.message(),
        "You do not have permission to delete this post"
    );
}

#[rstest]
#[tokio::test]
async fn owner_can_delete() {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(build_post(1, 1))));
    repo.expect_delete().times(1).return_once(|_| Ok(true));

    service(repo)
        .delete(DeletePostRequest {
            post_id: pid(1),
            actor: Some(uid(1)),
        })
        .await
        .expect("owner delete succeeds");
}
