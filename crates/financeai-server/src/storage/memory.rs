//! In-memory store using DashMap
//!
//! Uniqueness of usernames, emails, slugs and newsletter addresses is only
//! checked when the store is built with [`MemoryStore::with_unique_constraints`].
//! The default store accepts duplicates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
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
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Records that can be listed newest first
trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! timestamped {
    ($($ty:ty),*) => {
        $(impl Timestamped for $ty {
            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        })*
    };
}

timestamped!(User, BlogPost, FinanceAdvice, StockAnalysis, BudgetPlan, NewsletterSubscription);

struct Entry<T> {
    /// Insertion order, breaks ties between equal timestamps
    seq: u64,
    record: T,
}

struct Table<T> {
    rows: DashMap<String, Entry<T>>,
}

impl<T: Clone + Timestamped> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    fn insert(&self, seq: u64, id: String, record: T) {
        self.rows.insert(id, Entry { seq, record });
    }

    fn get(&self, id: &str) -> Option<T> {
        self.rows.get(id).map(|entry| entry.record.clone())
    }

    fn remove(&self, id: &str) -> bool {
        self.rows.remove(id).is_some()
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.iter().any(|entry| pred(&entry.record))
    }

    /// Matching records, newest first
    fn select(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let mut matched: Vec<(DateTime<Utc>, u64, T)> = self
            .rows
            .iter()
            .filter(|entry| pred(&entry.record))
            .map(|entry| (entry.record.created_at(), entry.seq, entry.record.clone()))
            .collect();
        matched.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        matched.into_iter().map(|(_, _, record)| record).collect()
    }

    /// First matching record in insertion order
    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .iter()
            .filter(|entry| pred(&entry.record))
            .min_by_key(|entry| entry.seq)
            .map(|entry| entry.record.clone())
    }

    fn update_where(&self, pred: impl Fn(&T) -> bool, mut f: impl FnMut(&mut T)) -> usize {
        let mut updated = 0;
        for mut entry in self.rows.iter_mut() {
            if pred(&entry.record) {
                f(&mut entry.record);
                updated += 1;
            }
        }
        updated
    }
}

/// DashMap-backed implementation of every store trait
pub struct MemoryStore {
    users: Table<User>,
    blog_posts: Table<BlogPost>,
    finance_advice: Table<FinanceAdvice>,
    stock_analyses: Table<StockAnalysis>,
    budget_plans: Table<BudgetPlan>,
    newsletter: Table<NewsletterSubscription>,
    seq: AtomicU64,
    enforce_unique: bool,
    /// Serializes check-then-insert when uniqueness is enforced
    unique_guard: Mutex<()>,
}

impl MemoryStore {
    /// Store without uniqueness checks
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Store that rejects duplicate usernames, emails, slugs and subscriptions
    pub fn with_unique_constraints() -> Self {
        Self::build(true)
    }

    fn build(enforce_unique: bool) -> Self {
        Self {
            users: Table::new(),
            blog_posts: Table::new(),
            finance_advice: Table::new(),
            stock_analyses: Table::new(),
            budget_plans: Table::new(),
            newsletter: Table::new(),
            seq: AtomicU64::new(0),
            enforce_unique,
            unique_guard: Mutex::new(()),
        }
    }

    pub fn enforces_unique(&self) -> bool {
        self.enforce_unique
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Run `insert` after `conflict` reports no clash, holding the guard
    /// throughout. Without enforcement `insert` runs unconditionally.
    fn insert_unique<R>(
        &self,
        conflict: impl FnOnce() -> Option<String>,
        insert: impl FnOnce() -> R,
    ) -> Result<R> {
        if !self.enforce_unique {
            return Ok(insert());
        }
        let _guard = self
            .unique_guard
            .lock()
            .map_err(|_| FinanceError::Database("unique guard poisoned".to_string()))?;
        if let Some(reason) = conflict() {
            return Err(FinanceError::Conflict(reason));
        }
        Ok(insert())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.find(|u| u.username == username))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.find(|u| u.email == email))
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = user.into_user(new_id(), Utc::now());
        self.insert_unique(
            || {
                if self.users.any(|u| u.username == user.username) {
                    Some(format!("username {} already exists", user.username))
                } else if self.users.any(|u| u.email == user.email) {
                    Some(format!("email {} already exists", user.email))
                } else {
                    None
                }
            },
            || {
                self.users
                    .insert(self.next_seq(), user.id.clone(), user.clone())
            },
        )?;
        debug!("Created user {}", user.id);
        Ok(user)
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>> {
        Ok(self.blog_posts.select(|p| p.published))
    }

    async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>> {
        Ok(self.blog_posts.get(id))
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        Ok(self.blog_posts.find(|p| p.slug == slug))
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost> {
        let post = post.into_post(new_id(), Utc::now());
        self.insert_unique(
            || {
                self.blog_posts
                    .any(|p| p.slug == post.slug)
                    .then(|| format!("slug {} already exists", post.slug))
            },
            || {
                self.blog_posts
                    .insert(self.next_seq(), post.id.clone(), post.clone())
            },
        )?;
        debug!("Created blog post {} ({})", post.id, post.slug);
        Ok(post)
    }

    async fn update_blog_post(&self, id: &str, patch: BlogPostPatch) -> Result<Option<BlogPost>> {
        let Some(mut post) = self.blog_posts.get(id) else {
            return Ok(None);
        };
        patch.apply(&mut post, Utc::now());

        let slug_taken = |slug: &str| self.blog_posts.any(|p| p.slug == slug && p.id != id);
        let updated = self.insert_unique(
            || {
                slug_taken(&post.slug).then(|| format!("slug {} already exists", post.slug))
            },
            || {
                // The post may have been deleted since it was read
                let mut written = None;
                if let Some(mut entry) = self.blog_posts.rows.get_mut(id) {
                    entry.record = post.clone();
                    written = Some(post.clone());
                }
                written
            },
        )?;
        Ok(updated)
    }

    async fn delete_blog_post(&self, id: &str) -> Result<bool> {
        Ok(self.blog_posts.remove(id))
    }

    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let mut posts = self.blog_posts.select(|p| p.featured && p.published);
        posts.truncate(FEATURED_LIMIT);
        Ok(posts)
    }

    async fn get_blog_posts_by_category(&self, category: &str) -> Result<Vec<BlogPost>> {
        Ok(self
            .blog_posts
            .select(|p| p.published && p.category == category))
    }

    async fn search_blog_posts(&self, query: &str) -> Result<Vec<BlogPost>> {
        let needle = query.to_lowercase();
        Ok(self
            .blog_posts
            .select(|p| p.published && p.matches(&needle)))
    }
}

#[async_trait]
impl FinanceAdviceStore for MemoryStore {
    async fn create_finance_advice(&self, advice: NewFinanceAdvice) -> Result<FinanceAdvice> {
        let advice = advice.into_record(new_id(), Utc::now());
        self.finance_advice
            .insert(self.next_seq(), advice.id.clone(), advice.clone());
        Ok(advice)
    }

    async fn get_finance_advice_by_user_id(&self, user_id: &str) -> Result<Vec<FinanceAdvice>> {
        Ok(self
            .finance_advice
            .select(|a| a.user_id.as_deref() == Some(user_id)))
    }
}

#[async_trait]
impl StockAnalysisStore for MemoryStore {
    async fn create_stock_analysis(&self, analysis: NewStockAnalysis) -> Result<StockAnalysis> {
        let analysis = analysis.into_record(new_id(), Utc::now());
        self.stock_analyses
            .insert(self.next_seq(), analysis.id.clone(), analysis.clone());
        Ok(analysis)
    }

    async fn get_stock_analysis(&self, symbol: &str) -> Result<Option<StockAnalysis>> {
        Ok(self
            .stock_analyses
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol)))
    }

    async fn get_all_stock_analyses(&self) -> Result<Vec<StockAnalysis>> {
        Ok(self.stock_analyses.select(|_| true))
    }
}

#[async_trait]
impl BudgetPlanStore for MemoryStore {
    async fn create_budget_plan(&self, plan: NewBudgetPlan) -> Result<BudgetPlan> {
        let plan = plan.into_record(new_id(), Utc::now());
        self.budget_plans
            .insert(self.next_seq(), plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn get_budget_plans_by_user_id(&self, user_id: &str) -> Result<Vec<BudgetPlan>> {
        Ok(self
            .budget_plans
            .select(|p| p.user_id.as_deref() == Some(user_id)))
    }
}

#[async_trait]
impl NewsletterStore for MemoryStore {
    async fn subscribe_to_newsletter(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription> {
        let record = subscription.into_record(new_id(), Utc::now());
        self.insert_unique(
            || {
                self.newsletter
                    .any(|s| s.email == record.email)
                    .then(|| format!("{} already subscribed", record.email))
            },
            || {
                self.newsletter
                    .insert(self.next_seq(), record.id.clone(), record.clone())
            },
        )?;
        Ok(record)
    }

    async fn get_newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscription>> {
        Ok(self.newsletter.select(|s| s.subscribed))
    }

    async fn unsubscribe_from_newsletter(&self, email: &str) -> Result<bool> {
        let updated = self
            .newsletter
            .update_where(|s| s.email == email, |s| s.subscribed = false);
        Ok(updated > 0)
    }
}
