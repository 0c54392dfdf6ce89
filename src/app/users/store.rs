//! 用户存储层
//!
//! `UserStore` 是文档存储的接口：id 和时间戳由存储层分配维护，
//! email 唯一性由存储层保证。提供两个实现：
//! - `MemoryStore`：进程内 HashMap 存储，默认后端，也是测试后端
//! - `PgStore`：PostgreSQL 存储，位于 `database` feature 之下

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};

/// 存储层错误
///
/// 唯一性冲突不设专门变体，统一归入 `Backend`。
#[derive(Debug)]
pub enum StoreError {
    NotFound,
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "记录不存在"),
            StoreError::Backend(msg) => write!(f, "存储后端错误: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// 文档存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
    /// 按创建时间排序返回全部用户
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    /// 局部更新：None 字段保持原值，updatedAt 由存储层刷新
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    /// 后端类型标识，供健康检查上报
    fn kind(&self) -> &'static str;
    async fn count(&self) -> Result<u64, StoreError>;
}

/// 进程内存储
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // 唯一性约束：email 不得与已有用户重复
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Backend(format!(
                "duplicate key: email \"{}\" already exists",
                new_user.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            age: new_user.age,
            mobile: new_user.mobile,
            email: new_user.email,
            interests: new_user.interests,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }

        // email 变更时同样要保持唯一
        if let Some(email) = &patch.email {
            let taken = users
                .iter()
                .any(|(other_id, other)| *other_id != id && other.email == *email);
            if taken {
                return Err(StoreError::Backend(format!(
                    "duplicate key: email \"{}\" already exists",
                    email
                )));
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(age) = patch.age {
            user.age = age;
        }
        if let Some(mobile) = patch.mobile {
            user.mobile = mobile;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(interests) = patch.interests {
            user.interests = interests;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn kind(&self) -> &'static str {
        "in-memory"
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(users.len() as u64)
    }
}

#[cfg(feature = "database")]
pub use postgres::PgStore;

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use chrono::{DateTime, Utc};
    use sqlx::postgres::PgPool;

    /// PostgreSQL 存储
    pub struct PgStore {
        pool: PgPool,
    }

    #[derive(sqlx::FromRow)]
    struct UserRow {
        id: Uuid,
        name: String,
        age: i32,
        mobile: String,
        email: String,
        interests: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl From<UserRow> for User {
        fn from(row: UserRow) -> Self {
            User {
                id: row.id,
                name: row.name,
                age: row.age.max(0) as u32,
                mobile: row.mobile,
                email: row.email,
                interests: row.interests,
                created_at: row.created_at,
                updated_at: row.updated_at,
            }
        }
    }

    impl PgStore {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }

        /// 启动时建表，email 上带唯一约束
        pub async fn ensure_schema(&self) -> Result<(), StoreError> {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id UUID PRIMARY KEY,
                    name TEXT NOT NULL,
                    age INT NOT NULL,
                    mobile TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    interests TEXT[] NOT NULL DEFAULT '{}',
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL
                )
                "#,
            )
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            Ok(())
        }
    }

    #[async_trait]
    impl UserStore for PgStore {
        async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (id, name, age, mobile, email, interests, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, now(), now())
                RETURNING id, name, age, mobile, email, interests, created_at, updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&new_user.name)
            .bind(new_user.age as i32)
            .bind(&new_user.mobile)
            .bind(&new_user.email)
            .bind(&new_user.interests)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            Ok(row.into())
        }

        async fn find_all(&self) -> Result<Vec<User>, StoreError> {
            let rows = sqlx::query_as::<_, UserRow>(
                "SELECT id, name, age, mobile, email, interests, created_at, updated_at \
                 FROM users ORDER BY created_at, id",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            Ok(rows.into_iter().map(User::from).collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
            let row = sqlx::query_as::<_, UserRow>(
                "SELECT id, name, age, mobile, email, interests, created_at, updated_at \
                 FROM users WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            row.map(User::from).ok_or(StoreError::NotFound)
        }

        async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError> {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                UPDATE users SET
                    name = COALESCE($2, name),
                    age = COALESCE($3, age),
                    mobile = COALESCE($4, mobile),
                    email = COALESCE($5, email),
                    interests = COALESCE($6, interests),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, name, age, mobile, email, interests, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(patch.name)
            .bind(patch.age.map(|a| a as i32))
            .bind(patch.mobile)
            .bind(patch.email)
            .bind(patch.interests)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            row.map(User::from).ok_or(StoreError::NotFound)
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }

        fn kind(&self) -> &'static str {
            "postgresql"
        }

        async fn count(&self) -> Result<u64, StoreError> {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            Ok(count.max(0) as u64)
        }
    }
}
