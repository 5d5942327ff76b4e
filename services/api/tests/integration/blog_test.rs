use uuid::Uuid;

use mol_api::domain::types::BlogPostPatch;
use mol_api::error::ApiError;
use mol_api::usecase::blog::{
    CreateBlogPostInput, CreateBlogPostUseCase, DeleteBlogPostUseCase, GetBlogPostUseCase,
    ListBlogPostsUseCase, UpdateBlogPostUseCase,
};
use mol_domain::pagination::PageRequest;
use mol_domain::permission::Actor;
use mol_domain::role::Role;

use crate::helpers::{MockBlogRepo, test_post};

const WRITER: Uuid = Uuid::from_u128(10);
const OTHER_WRITER: Uuid = Uuid::from_u128(11);

fn actor(id: Uuid, role: Option<Role>) -> Actor {
    Actor { id, role }
}

fn input(title: &str, body: &str) -> CreateBlogPostInput {
    CreateBlogPostInput {
        title: title.to_owned(),
        description: None,
        body: body.to_owned(),
        thumbnail_url: None,
    }
}

fn retitle(title: &str) -> BlogPostPatch {
    BlogPostPatch {
        title: Some(title.to_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn should_attribute_new_post_to_writer() {
    let post = CreateBlogPostUseCase {
        repo: MockBlogRepo::empty(),
    }
    .execute(&actor(WRITER, Some(Role::Writer)), input("Hello", "First post"))
    .await
    .unwrap();
    assert_eq!(post.created_by, WRITER);
}

#[tokio::test]
async fn should_forbid_members_from_posting() {
    let repo = MockBlogRepo::empty();
    let handle = repo.posts_handle();

    let result = CreateBlogPostUseCase { repo }
        .execute(&actor(WRITER, Some(Role::Member)), input("Hello", "Body"))
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_require_title_and_body() {
    let usecase = CreateBlogPostUseCase {
        repo: MockBlogRepo::empty(),
    };
    let writer = actor(WRITER, Some(Role::Writer));

    let result = usecase.execute(&writer, input("", "Body")).await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );

    let result = usecase.execute(&writer, input("Title", "   ")).await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_let_writer_edit_own_post_only() {
    let repo = MockBlogRepo::new(vec![test_post(1, WRITER), test_post(2, OTHER_WRITER)]);
    let handle = repo.posts_handle();
    let usecase = UpdateBlogPostUseCase { repo };
    let writer = actor(WRITER, Some(Role::Writer));

    let updated = usecase.execute(&writer, 1, retitle("Mine")).await.unwrap();
    assert_eq!(updated.title, "Mine");

    let result = usecase.execute(&writer, 2, retitle("Theirs")).await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(handle.lock().unwrap()[1].title, "Post 2");
}

#[tokio::test]
async fn should_let_admin_edit_and_delete_any_post() {
    let repo = MockBlogRepo::new(vec![test_post(1, OTHER_WRITER)]);
    let handle = repo.posts_handle();
    let admin = actor(Uuid::from_u128(1), Some(Role::Admin));

    UpdateBlogPostUseCase {
        repo: MockBlogRepo {
            posts: handle.clone(),
        },
    }
    .execute(&admin, 1, retitle("Edited by admin"))
    .await
    .unwrap();

    DeleteBlogPostUseCase { repo }
        .execute(&admin, 1)
        .await
        .unwrap();
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_writer_deleting_foreign_post() {
    let repo = MockBlogRepo::new(vec![test_post(1, OTHER_WRITER)]);
    let handle = repo.posts_handle();

    let result = DeleteBlogPostUseCase { repo }
        .execute(&actor(WRITER, Some(Role::Writer)), 1)
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_missing_post_before_checking_ownership() {
    let member = actor(WRITER, Some(Role::Member));

    let result = UpdateBlogPostUseCase {
        repo: MockBlogRepo::empty(),
    }
    .execute(&member, 5, retitle("x"))
    .await;
    assert!(
        matches!(result, Err(ApiError::BlogPostNotFound)),
        "expected BlogPostNotFound, got {result:?}"
    );

    let result = GetBlogPostUseCase {
        repo: MockBlogRepo::empty(),
    }
    .execute(5)
    .await;
    assert!(
        matches!(result, Err(ApiError::BlogPostNotFound)),
        "expected BlogPostNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_resolve_page_before_first_to_last_page() {
    let repo = MockBlogRepo::new((1..=12).map(|id| test_post(id, WRITER)).collect());

    let page = ListBlogPostsUseCase { repo }
        .execute(PageRequest::parse(Some("0"), Some("5")))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 3);
    assert_eq!(page.results.len(), 2);
}
