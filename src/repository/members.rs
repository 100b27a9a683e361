//! Members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// Check if a member with the given code already exists
    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List all members
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(members)
    }

    /// Create a new member
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (code, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&member.code)
        .bind(&member.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partially update an existing member
    pub async fn update(&self, id: i32, member: &UpdateMember) -> AppResult<Member> {
        let mut sets = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(member.code, "code");
        add_field!(member.name, "name");
        add_field!(member.penalty, "penalty");
        add_field!(member.penalty_end_date, "penalty_end_date");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE members SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(member.code);
        bind_field!(member.name);
        bind_field!(member.penalty);
        bind_field!(member.penalty_end_date);

        builder.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    /// Delete a member. Refused while the member has open borrowings.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let open_borrowings: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE member_id = $1 AND returned_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if open_borrowings > 0 {
            return Err(AppError::BusinessRule(
                "Member has borrowed books that have not been returned".to_string(),
            ));
        }

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
