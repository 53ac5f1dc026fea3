#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::sea_orm_repo::{SeaOrmPostRepository, SeaOrmUserRepository};
    use quill_core::error::RepoError;
    use quill_core::ports::{PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            description: "Body".to_owned(),
            short_description: "Teaser".to_owned(),
            category: "Tech".to_owned(),
            image_url: String::new(),
            post_date: now.into(),
            author: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_to_domain() {
        let model = post_model("Test Post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = SeaOrmPostRepository::new(std::sync::Arc::new(db));

        let result = repo.find_by_id(post_id).await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.title, "Test Post");
        assert_eq!(found.id, post_id);
    }

    #[tokio::test]
    async fn delete_with_no_rows_affected_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SeaOrmPostRepository::new(std::sync::Arc::new(db));

        let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn find_user_by_email_maps_to_domain() {
        let now = chrono::Utc::now();
        let user_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                name: "Ana".to_owned(),
                email: "a@x.com".to_owned(),
                password_hash: "$argon2$hash".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = SeaOrmUserRepository::new(std::sync::Arc::new(db));

        let user = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name, "Ana");
    }
}
