//! SQLite database layer (embedded, no external dependencies)
//!
//! Tags and the JSON sub-objects are stored as JSON text, timestamps as
//! integer microseconds so ordering is numeric. `rowid` breaks ties.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use financeai_core::ports::storage::FEATURED_LIMIT;
use financeai_core::ports::{
    BlogStore, BudgetPlanStore, FinanceAdviceStore, NewsletterStore, StockAnalysisStore, UserStore,
};
use financeai_core::utils::new_id;
use financeai_core::{
    BlogPost, BlogPostPatch, BudgetPlan, FinanceAdvice, FinanceError, NewBlogPost, NewBudgetPlan,
    NewFinanceAdvice, NewStockAnalysis, NewSubscription, NewUser, NewsletterSubscription, Result,
    StockAnalysis, User,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

const USER_COLUMNS: &str = "id, username, email, password, is_admin, created_at";

const BLOG_COLUMNS: &str = "id, title, slug, excerpt, content, category, tags, author, \
     featured, published, read_time, seo_title, seo_description, created_at, updated_at";

const ADVICE_COLUMNS: &str = "id, user_id, income, expenses, savings_goal, risk_tolerance, \
     advice, investment_plan, created_at";

const STOCK_COLUMNS: &str = "id, symbol, company_name, current_price, analysis, \
     recommendation, risk_level, target_price, created_at";

const BUDGET_COLUMNS: &str = "id, user_id, monthly_income, expenses, savings_target, \
     recommendations, chart_data, created_at";

const NEWSLETTER_COLUMNS: &str = "id, email, subscribed, created_at";

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        let parent = std::path::Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));

        tracing::info!("Creating parent directory: {}", parent.display());
        tokio::fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;

        // Check if directory is writable
        let test_file = parent.join(".write_test");
        match tokio::fs::write(&test_file, b"test").await {
            Ok(_) => {
                let _ = tokio::fs::remove_file(&test_file).await;
                tracing::info!("Database directory is writable");
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Database directory is not writable: {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection that never expires
    /// keeps the data alive for the lifetime of the pool.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blog_posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                excerpt TEXT NOT NULL,
                content TEXT NOT NULL,
                category TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                author TEXT NOT NULL DEFAULT 'AI Assistant',
                featured INTEGER NOT NULL DEFAULT 0,
                published INTEGER NOT NULL DEFAULT 1,
                read_time INTEGER NOT NULL DEFAULT 5,
                seo_title TEXT,
                seo_description TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_blog_posts_created_at ON blog_posts (created_at)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS finance_advice (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                income INTEGER NOT NULL,
                expenses INTEGER NOT NULL,
                savings_goal INTEGER NOT NULL,
                risk_tolerance TEXT NOT NULL,
                advice TEXT NOT NULL,
                investment_plan TEXT,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stock_analysis (
                id TEXT PRIMARY KEY,
                symbol TEXT NOT NULL,
                company_name TEXT NOT NULL,
                current_price INTEGER NOT NULL,
                analysis TEXT NOT NULL,
                recommendation TEXT NOT NULL,
                risk_level TEXT NOT NULL,
                target_price INTEGER,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_stock_analysis_symbol ON stock_analysis (UPPER(symbol))
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budget_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                monthly_income INTEGER NOT NULL,
                expenses TEXT NOT NULL,
                savings_target INTEGER NOT NULL,
                recommendations TEXT NOT NULL,
                chart_data TEXT,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS newsletter (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                subscribed INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

/// Unique-constraint violations become conflicts, everything else a 500
fn db_error(e: sqlx::Error) -> FinanceError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return FinanceError::Conflict(db.message().to_string());
        }
    }
    FinanceError::Database(e.to_string())
}

/// Current time at the precision the database keeps
fn now() -> DateTime<Utc> {
    from_micros(Utc::now().timestamp_micros())
}

fn from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}

fn parse_enum<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    value.parse().map_err(FinanceError::Serialization)
}

fn parse_json_opt<T: serde::de::DeserializeOwned>(value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| serde_json::from_str(&v))
        .transpose()
        .map_err(Into::into)
}

fn to_json_opt<T: serde::Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

/// `%query%` with LIKE metacharacters escaped by `\`
fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = FinanceError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl UserStore for Database {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = user.into_user(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_admin)
        .bind(user.created_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(user)
    }
}

#[async_trait]
impl BlogStore for Database {
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let sql = format!(
            "SELECT {} FROM blog_posts WHERE published = 1 ORDER BY created_at DESC, rowid DESC",
            BLOG_COLUMNS
        );
        let rows: Vec<BlogPostRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }

    async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>> {
        let sql = format!("SELECT {} FROM blog_posts WHERE id = ?1", BLOG_COLUMNS);
        let row: Option<BlogPostRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let sql = format!("SELECT {} FROM blog_posts WHERE slug = ?1", BLOG_COLUMNS);
        let row: Option<BlogPostRow> = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost> {
        let post = post.into_post(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, slug, excerpt, content, category, tags, author,
                                    featured, published, read_time, seo_title, seo_description,
                                    created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(serde_json::to_string(&post.tags)?)
        .bind(&post.author)
        .bind(post.featured)
        .bind(post.published)
        .bind(post.read_time)
        .bind(&post.seo_title)
        .bind(&post.seo_description)
        .bind(post.created_at.timestamp_micros())
        .bind(post.updated_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(post)
    }

    async fn update_blog_post(&self, id: &str, patch: BlogPostPatch) -> Result<Option<BlogPost>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let sql = format!("SELECT {} FROM blog_posts WHERE id = ?1", BLOG_COLUMNS);
        let row: Option<BlogPostRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut post = BlogPost::try_from(row)?;
        patch.apply(&mut post, now());

        sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?1, slug = ?2, excerpt = ?3, content = ?4, category = ?5, tags = ?6,
                author = ?7, featured = ?8, published = ?9, read_time = ?10, seo_title = ?11,
                seo_description = ?12, updated_at = ?13
            WHERE id = ?14
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(serde_json::to_string(&post.tags)?)
        .bind(&post.author)
        .bind(post.featured)
        .bind(post.published)
        .bind(post.read_time)
        .bind(&post.seo_title)
        .bind(&post.seo_description)
        .bind(post.updated_at.timestamp_micros())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(Some(post))
    }

    async fn delete_blog_post(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blog_posts WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let sql = format!(
            "SELECT {} FROM blog_posts WHERE featured = 1 AND published = 1 \
             ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            BLOG_COLUMNS
        );
        let rows: Vec<BlogPostRow> = sqlx::query_as(&sql)
            .bind(FEATURED_LIMIT as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }

    async fn get_blog_posts_by_category(&self, category: &str) -> Result<Vec<BlogPost>> {
        let sql = format!(
            "SELECT {} FROM blog_posts WHERE category = ?1 AND published = 1 \
             ORDER BY created_at DESC, rowid DESC",
            BLOG_COLUMNS
        );
        let rows: Vec<BlogPostRow> = sqlx::query_as(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }

    // SQLite LOWER only folds ASCII, so matching happens in Rust
    async fn search_blog_posts(&self, query: &str) -> Result<Vec<BlogPost>> {
        let needle = query.to_lowercase();
        let mut posts = self.get_all_blog_posts().await?;
        posts.retain(|post| post.matches(&needle));
        Ok(posts)
    }
}

#[async_trait]
impl FinanceAdviceStore for Database {
    async fn create_finance_advice(&self, advice: NewFinanceAdvice) -> Result<FinanceAdvice> {
        let advice = advice.into_record(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO finance_advice (id, user_id, income, expenses, savings_goal,
                                        risk_tolerance, advice, investment_plan, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&advice.id)
        .bind(&advice.user_id)
        .bind(advice.income)
        .bind(advice.expenses)
        .bind(advice.savings_goal)
        .bind(advice.risk_tolerance.to_string())
        .bind(&advice.advice)
        .bind(to_json_opt(advice.investment_plan.as_ref())?)
        .bind(advice.created_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(advice)
    }

    async fn get_finance_advice_by_user_id(&self, user_id: &str) -> Result<Vec<FinanceAdvice>> {
        let sql = format!(
            "SELECT {} FROM finance_advice WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            ADVICE_COLUMNS
        );
        let rows: Vec<FinanceAdviceRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }
}

#[async_trait]
impl StockAnalysisStore for Database {
    async fn create_stock_analysis(&self, analysis: NewStockAnalysis) -> Result<StockAnalysis> {
        let analysis = analysis.into_record(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO stock_analysis (id, symbol, company_name, current_price, analysis,
                                        recommendation, risk_level, target_price, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&analysis.id)
        .bind(&analysis.symbol)
        .bind(&analysis.company_name)
        .bind(analysis.current_price)
        .bind(&analysis.analysis)
        .bind(analysis.recommendation.to_string())
        .bind(analysis.risk_level.to_string())
        .bind(analysis.target_price)
        .bind(analysis.created_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(analysis)
    }

    async fn get_stock_analysis(&self, symbol: &str) -> Result<Option<StockAnalysis>> {
        let sql = format!(
            "SELECT {} FROM stock_analysis WHERE UPPER(symbol) = UPPER(?1) \
             ORDER BY created_at, rowid LIMIT 1",
            STOCK_COLUMNS
        );
        let row: Option<StockAnalysisRow> = sqlx::query_as(&sql)
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_all_stock_analyses(&self) -> Result<Vec<StockAnalysis>> {
        let sql = format!(
            "SELECT {} FROM stock_analysis ORDER BY created_at DESC, rowid DESC",
            STOCK_COLUMNS
        );
        let rows: Vec<StockAnalysisRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }
}

#[async_trait]
impl BudgetPlanStore for Database {
    async fn create_budget_plan(&self, plan: NewBudgetPlan) -> Result<BudgetPlan> {
        let plan = plan.into_record(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO budget_plans (id, user_id, monthly_income, expenses, savings_target,
                                      recommendations, chart_data, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.user_id)
        .bind(plan.monthly_income)
        .bind(serde_json::to_string(&plan.expenses)?)
        .bind(plan.savings_target)
        .bind(&plan.recommendations)
        .bind(to_json_opt(plan.chart_data.as_ref())?)
        .bind(plan.created_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(plan)
    }

    async fn get_budget_plans_by_user_id(&self, user_id: &str) -> Result<Vec<BudgetPlan>> {
        let sql = format!(
            "SELECT {} FROM budget_plans WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            BUDGET_COLUMNS
        );
        let rows: Vec<BudgetPlanRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        collect(rows)
    }
}

#[async_trait]
impl NewsletterStore for Database {
    async fn subscribe_to_newsletter(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription> {
        let record = subscription.into_record(new_id(), now());

        sqlx::query(
            r#"
            INSERT INTO newsletter (id, email, subscribed, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.id)
        .bind(&record.email)
        .bind(record.subscribed)
        .bind(record.created_at.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(record)
    }

    async fn get_newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscription>> {
        let sql = format!(
            "SELECT {} FROM newsletter WHERE subscribed = 1 ORDER BY created_at DESC, rowid DESC",
            NEWSLETTER_COLUMNS
        );
        let rows: Vec<NewsletterRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn unsubscribe_from_newsletter(&self, email: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE newsletter SET subscribed = 0 WHERE email = ?1
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password: String,
    is_admin: bool,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
            email: r.email,
            password: r.password,
            is_admin: r.is_admin,
            created_at: from_micros(r.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct BlogPostRow {
    id: String,
    title: String,
    slug: String,
    excerpt: String,
    content: String,
    category: String,
    tags: String,
    author: String,
    featured: bool,
    published: bool,
    read_time: i32,
    seo_title: Option<String>,
    seo_description: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<BlogPostRow> for BlogPost {
    type Error = FinanceError;

    fn try_from(r: BlogPostRow) -> Result<Self> {
        Ok(BlogPost {
            id: r.id,
            title: r.title,
            slug: r.slug,
            excerpt: r.excerpt,
            content: r.content,
            category: r.category,
            tags: serde_json::from_str(&r.tags)?,
            author: r.author,
            featured: r.featured,
            published: r.published,
            read_time: r.read_time,
            seo_title: r.seo_title,
            seo_description: r.seo_description,
            created_at: from_micros(r.created_at),
            updated_at: from_micros(r.updated_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct FinanceAdviceRow {
    id: String,
    user_id: Option<String>,
    income: i64,
    expenses: i64,
    savings_goal: i64,
    risk_tolerance: String,
    advice: String,
    investment_plan: Option<String>,
    created_at: i64,
}

impl TryFrom<FinanceAdviceRow> for FinanceAdvice {
    type Error = FinanceError;

    fn try_from(r: FinanceAdviceRow) -> Result<Self> {
        Ok(FinanceAdvice {
            id: r.id,
            user_id: r.user_id,
            income: r.income,
            expenses: r.expenses,
            savings_goal: r.savings_goal,
            risk_tolerance: parse_enum(&r.risk_tolerance)?,
            advice: r.advice,
            investment_plan: parse_json_opt(r.investment_plan)?,
            created_at: from_micros(r.created_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct StockAnalysisRow {
    id: String,
    symbol: String,
    company_name: String,
    current_price: i64,
    analysis: String,
    recommendation: String,
    risk_level: String,
    target_price: Option<i64>,
    created_at: i64,
}

impl TryFrom<StockAnalysisRow> for StockAnalysis {
    type Error = FinanceError;

    fn try_from(r: StockAnalysisRow) -> Result<Self> {
        Ok(StockAnalysis {
            id: r.id,
            symbol: r.symbol,
            company_name: r.company_name,
            current_price: r.current_price,
            analysis: r.analysis,
            recommendation: parse_enum(&r.recommendation)?,
            risk_level: parse_enum(&r.risk_level)?,
            target_price: r.target_price,
            created_at: from_micros(r.created_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct BudgetPlanRow {
    id: String,
    user_id: Option<String>,
    monthly_income: i64,
    expenses: String,
    savings_target: i64,
    recommendations: String,
    chart_data: Option<String>,
    created_at: i64,
}

impl TryFrom<BudgetPlanRow> for BudgetPlan {
    type Error = FinanceError;

    fn try_from(r: BudgetPlanRow) -> Result<Self> {
        Ok(BudgetPlan {
            id: r.id,
            user_id: r.user_id,
            monthly_income: r.monthly_income,
            expenses: serde_json::from_str(&r.expenses)?,
            savings_target: r.savings_target,
            recommendations: r.recommendations,
            chart_data: parse_json_opt(r.chart_data)?,
            created_at: from_micros(r.created_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct NewsletterRow {
    id: String,
    email: String,
    subscribed: bool,
    created_at: i64,
}

impl From<NewsletterRow> for NewsletterSubscription {
    fn from(r: NewsletterRow) -> Self {
        NewsletterSubscription {
            id: r.id,
            email: r.email,
            subscribed: r.subscribed,
            created_at: from_micros(r.created_at),
        }
    }
}
