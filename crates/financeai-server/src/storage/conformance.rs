//! Behaviour every storage backend must share
//!
//! `storage_conformance_tests!` expands to one `#[tokio::test]` per check,
//! each against a fresh store built by the given expression.

use financeai_core::ports::Storage;
use financeai_core::{
    BlogPostPatch, BudgetPlanRequest, ChartData, ChartDataset, FinanceError, InvestmentPlan,
    NewBlogPost, NewBudgetPlan, NewFinanceAdvice, NewStockAnalysis, NewSubscription, NewUser,
    Recommendation, RiskLevel, RiskTolerance,
};
use std::collections::BTreeMap;

macro_rules! storage_conformance_tests {
    ($make:expr) => {
        #[tokio::test]
        async fn conformance_blog_roundtrip_by_slug() {
            let store = $make;
            $crate::storage::conformance::blog_roundtrip_by_slug(&store).await;
        }

        #[tokio::test]
        async fn conformance_blog_defaults() {
            let store = $make;
            $crate::storage::conformance::blog_defaults(&store).await;
        }

        #[tokio::test]
        async fn conformance_featured_posts() {
            let store = $make;
            $crate::storage::conformance::featured_posts(&store).await;
        }

        #[tokio::test]
        async fn conformance_published_listing() {
            let store = $make;
            $crate::storage::conformance::published_listing(&store).await;
        }

        #[tokio::test]
        async fn conformance_category_filter() {
            let store = $make;
            $crate::storage::conformance::category_filter(&store).await;
        }

        #[tokio::test]
        async fn conformance_search() {
            let store = $make;
            $crate::storage::conformance::search(&store).await;
        }

        #[tokio::test]
        async fn conformance_search_treats_wildcards_literally() {
            let store = $make;
            $crate::storage::conformance::search_wildcards(&store).await;
        }

        #[tokio::test]
        async fn conformance_update_blog_post() {
            let store = $make;
            $crate::storage::conformance::update_blog_post(&store).await;
        }

        #[tokio::test]
        async fn conformance_delete_blog_post() {
            let store = $make;
            $crate::storage::conformance::delete_blog_post(&store).await;
        }

        #[tokio::test]
        async fn conformance_users() {
            let store = $make;
            $crate::storage::conformance::users(&store).await;
        }

        #[tokio::test]
        async fn conformance_finance_advice() {
            let store = $make;
            $crate::storage::conformance::finance_advice(&store).await;
        }

        #[tokio::test]
        async fn conformance_stock_analysis() {
            let store = $make;
            $crate::storage::conformance::stock_analysis(&store).await;
        }

        #[tokio::test]
        async fn conformance_budget_plans() {
            let store = $make;
            $crate::storage::conformance::budget_plans(&store).await;
        }

        #[tokio::test]
        async fn conformance_newsletter() {
            let store = $make;
            $crate::storage::conformance::newsletter(&store).await;
        }
    };
}

pub(crate) use storage_conformance_tests;

pub fn new_post(slug: &str, category: &str) -> NewBlogPost {
    NewBlogPost {
        title: format!("Post {}", slug),
        slug: slug.to_string(),
        excerpt: "An excerpt".to_string(),
        content: "<p>Body</p>".to_string(),
        category: category.to_string(),
        tags: Some(vec!["investing".to_string()]),
        author: None,
        featured: None,
        published: None,
        read_time: None,
        seo_title: None,
        seo_description: None,
    }
}

fn featured_post(slug: &str, published: bool) -> NewBlogPost {
    NewBlogPost {
        featured: Some(true),
        published: Some(published),
        ..new_post(slug, "featured")
    }
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.in", username),
        password: "secret".to_string(),
        is_admin: None,
    }
}

fn new_analysis(symbol: &str, recommendation: Recommendation) -> NewStockAnalysis {
    NewStockAnalysis {
        symbol: symbol.to_string(),
        company_name: format!("{} Ltd.", symbol),
        current_price: 512,
        analysis: "Stable cash flows".to_string(),
        recommendation,
        risk_level: RiskLevel::Medium,
        target_price: Some(640),
    }
}

pub async fn blog_roundtrip_by_slug(store: &dyn Storage) {
    let created = store
        .create_blog_post(new_post("sip-basics", "investing"))
        .await
        .unwrap();

    let by_slug = store.get_blog_post_by_slug("sip-basics").await.unwrap();
    assert_eq!(by_slug.as_ref(), Some(&created));

    let by_id = store.get_blog_post(&created.id).await.unwrap();
    assert_eq!(by_id, Some(created));

    assert!(store.get_blog_post_by_slug("missing").await.unwrap().is_none());
    assert!(store.get_blog_post("missing").await.unwrap().is_none());
}

pub async fn blog_defaults(store: &dyn Storage) {
    let post = store
        .create_blog_post(NewBlogPost {
            tags: None,
            ..new_post("defaults", "basics")
        })
        .await
        .unwrap();

    assert_eq!(post.author, "AI Assistant");
    assert!(!post.featured);
    assert!(post.published);
    assert_eq!(post.read_time, 5);
    assert!(post.tags.is_empty());
    assert_eq!(post.seo_title.as_deref(), Some("Post defaults"));
    assert_eq!(post.seo_description.as_deref(), Some("An excerpt"));
}

pub async fn featured_posts(store: &dyn Storage) {
    for i in 0..5 {
        store
            .create_blog_post(featured_post(&format!("featured-{}", i), true))
            .await
            .unwrap();
    }
    store
        .create_blog_post(featured_post("featured-draft", false))
        .await
        .unwrap();
    store
        .create_blog_post(new_post("plain", "featured"))
        .await
        .unwrap();

    let featured = store.get_featured_blog_posts().await.unwrap();
    assert_eq!(featured.len(), 3);
    assert!(featured.iter().all(|p| p.featured && p.published));

    let slugs: Vec<_> = featured.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["featured-4", "featured-3", "featured-2"]);
}

pub async fn published_listing(store: &dyn Storage) {
    store.create_blog_post(new_post("first", "a")).await.unwrap();
    store
        .create_blog_post(NewBlogPost {
            published: Some(false),
            ..new_post("draft", "a")
        })
        .await
        .unwrap();
    store.create_blog_post(new_post("second", "a")).await.unwrap();

    let all = store.get_all_blog_posts().await.unwrap();
    let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["second", "first"]);
}

pub async fn category_filter(store: &dyn Storage) {
    store.create_blog_post(new_post("tax-1", "tax")).await.unwrap();
    store.create_blog_post(new_post("mf-1", "mutual-funds")).await.unwrap();
    store.create_blog_post(new_post("tax-2", "tax")).await.unwrap();
    store
        .create_blog_post(NewBlogPost {
            published: Some(false),
            ..new_post("tax-draft", "tax")
        })
        .await
        .unwrap();

    let tax = store.get_blog_posts_by_category("tax").await.unwrap();
    let slugs: Vec<_> = tax.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["tax-2", "tax-1"]);

    // Exact match, not substring or case-folded
    assert!(store.get_blog_posts_by_category("Tax").await.unwrap().is_empty());
    assert!(store.get_blog_posts_by_category("unknown").await.unwrap().is_empty());
}

pub async fn search(store: &dyn Storage) {
    let in_title = NewBlogPost {
        title: "Income TAX slabs explained".to_string(),
        ..new_post("in-title", "x")
    };
    let in_excerpt = NewBlogPost {
        excerpt: "Save Tax with ELSS".to_string(),
        ..new_post("in-excerpt", "x")
    };
    let in_content = NewBlogPost {
        content: "<p>Section 80C tax deductions</p>".to_string(),
        ..new_post("in-content", "x")
    };
    let in_tags = NewBlogPost {
        tags: Some(vec!["Taxation".to_string()]),
        ..new_post("in-tags", "x")
    };
    let unrelated = new_post("unrelated", "x");
    let draft = NewBlogPost {
        title: "Tax draft".to_string(),
        published: Some(false),
        ..new_post("draft", "x")
    };
    for post in [in_title, in_excerpt, in_content, in_tags, unrelated, draft] {
        store.create_blog_post(post).await.unwrap();
    }

    for query in ["tax", "TAX"] {
        let found = store.search_blog_posts(query).await.unwrap();
        let slugs: Vec<_> = found.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["in-tags", "in-content", "in-excerpt", "in-title"],
            "query {}",
            query
        );
        assert!(found.iter().all(|p| p.matches("tax")));
    }

    assert!(store.search_blog_posts("nifty").await.unwrap().is_empty());

    let accented = store
        .create_blog_post(NewBlogPost {
            title: "ÉPARGNE retraite".to_string(),
            tags: Some(vec!["Économies".to_string()]),
            ..new_post("epargne", "x")
        })
        .await
        .unwrap();
    for query in ["épargne", "ÉPARGNE", "économies"] {
        let found = store.search_blog_posts(query).await.unwrap();
        assert_eq!(found, vec![accented.clone()], "query {}", query);
    }
}

pub async fn search_wildcards(store: &dyn Storage) {
    store
        .create_blog_post(NewBlogPost {
            title: "100% equity portfolios".to_string(),
            ..new_post("percent", "x")
        })
        .await
        .unwrap();
    store
        .create_blog_post(NewBlogPost {
            title: "1000 rupee SIP".to_string(),
            ..new_post("thousand", "x")
        })
        .await
        .unwrap();
    store
        .create_blog_post(NewBlogPost {
            title: "short_term gains".to_string(),
            ..new_post("underscore", "x")
        })
        .await
        .unwrap();

    let found = store.search_blog_posts("100%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slug, "percent");

    let found = store.search_blog_posts("t_t").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slug, "underscore");

    // "_" must not act as a single-character wildcard ("equ" would match)
    assert!(store.search_blog_posts("e_u").await.unwrap().is_empty());
}

pub async fn update_blog_post(store: &dyn Storage) {
    let created = store.create_blog_post(new_post("to-edit", "a")).await.unwrap();

    let updated = store
        .update_blog_post(
            &created.id,
            BlogPostPatch {
                title: Some("Edited".to_string()),
                featured: Some(true),
                tags: Some(vec!["ppf".to_string(), "epf".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("post exists");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Edited");
    assert!(updated.featured);
    assert_eq!(updated.tags, vec!["ppf", "epf"]);
    assert_eq!(updated.slug, "to-edit");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let fetched = store.get_blog_post(&created.id).await.unwrap();
    assert_eq!(fetched, Some(updated));

    let missing = store
        .update_blog_post("missing", BlogPostPatch::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

pub async fn delete_blog_post(store: &dyn Storage) {
    let created = store.create_blog_post(new_post("to-delete", "a")).await.unwrap();

    assert!(store.delete_blog_post(&created.id).await.unwrap());
    assert!(!store.delete_blog_post(&created.id).await.unwrap());
    assert!(store.get_blog_post(&created.id).await.unwrap().is_none());
    assert!(store.get_blog_post_by_slug("to-delete").await.unwrap().is_none());
}

pub async fn users(store: &dyn Storage) {
    let user = store.create_user(new_user("priya")).await.unwrap();
    assert!(!user.is_admin);
    assert_eq!(user.password, "secret");

    let by_id = store.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "priya");
    assert_eq!(by_id.created_at, user.created_at);

    let by_name = store.get_user_by_username("priya").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    let by_email = store.get_user_by_email("priya@example.in").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    assert!(store.get_user_by_username("nobody").await.unwrap().is_none());

    let admin = store
        .create_user(NewUser {
            is_admin: Some(true),
            ..new_user("root")
        })
        .await
        .unwrap();
    assert!(store.get_user(&admin.id).await.unwrap().unwrap().is_admin);
}

pub async fn finance_advice(store: &dyn Storage) {
    let plan = InvestmentPlan {
        emergency: "6 months in a liquid fund".to_string(),
        short_term: "Short duration debt funds".to_string(),
        long_term: "Index fund SIP".to_string(),
        tax_saving: "ELSS up to 1.5 lakh".to_string(),
    };
    let advice = |user_id: Option<&str>| NewFinanceAdvice {
        user_id: user_id.map(str::to_string),
        income: 100000,
        expenses: 60000,
        savings_goal: 1000000,
        risk_tolerance: RiskTolerance::High,
        advice: "Invest the surplus".to_string(),
        investment_plan: Some(plan.clone()),
    };

    let first = store.create_finance_advice(advice(Some("u1"))).await.unwrap();
    store.create_finance_advice(advice(None)).await.unwrap();
    let second = store.create_finance_advice(advice(Some("u1"))).await.unwrap();

    let for_user = store.get_finance_advice_by_user_id("u1").await.unwrap();
    assert_eq!(for_user, vec![second, first]);
    assert_eq!(for_user[0].investment_plan.as_ref(), Some(&plan));
    assert!(store.get_finance_advice_by_user_id("u2").await.unwrap().is_empty());
}

pub async fn stock_analysis(store: &dyn Storage) {
    let older = store
        .create_stock_analysis(new_analysis("TCS", Recommendation::Hold))
        .await
        .unwrap();
    let newer = store
        .create_stock_analysis(new_analysis("TCS", Recommendation::Buy))
        .await
        .unwrap();
    let other = store
        .create_stock_analysis(new_analysis("INFY", Recommendation::Sell))
        .await
        .unwrap();

    // Duplicate symbols resolve to the first analysis stored
    let found = store.get_stock_analysis("tcs").await.unwrap();
    assert_eq!(found, Some(older.clone()));
    assert!(store.get_stock_analysis("WIPRO").await.unwrap().is_none());

    let all = store.get_all_stock_analyses().await.unwrap();
    assert_eq!(all, vec![other, newer, older]);
}

pub async fn budget_plans(store: &dyn Storage) {
    let request = BudgetPlanRequest {
        monthly_income: 75000,
        expenses: BTreeMap::from([("rent".to_string(), 20000), ("food".to_string(), 10000)]),
        savings_target: 20000,
    };
    let chart = ChartData {
        labels: vec!["Rent".to_string(), "Food".to_string(), "Savings".to_string()],
        datasets: vec![ChartDataset {
            label: "Monthly Budget (₹)".to_string(),
            data: vec![20000.0, 10000.0, 20000.0],
            background_color: vec!["#3B82F6".to_string(); 3],
        }],
    };

    let plan = store
        .create_budget_plan(NewBudgetPlan {
            user_id: Some("u9".to_string()),
            monthly_income: request.monthly_income,
            expenses: request.expenses.clone(),
            savings_target: request.savings_target,
            recommendations: "Cut dining out".to_string(),
            chart_data: Some(chart.clone()),
        })
        .await
        .unwrap();
    store
        .create_budget_plan(NewBudgetPlan {
            user_id: None,
            monthly_income: 1,
            expenses: BTreeMap::new(),
            savings_target: 0,
            recommendations: String::new(),
            chart_data: None,
        })
        .await
        .unwrap();

    let plans = store.get_budget_plans_by_user_id("u9").await.unwrap();
    assert_eq!(plans, vec![plan]);
    assert_eq!(plans[0].expenses, request.expenses);
    assert_eq!(plans[0].chart_data.as_ref(), Some(&chart));
}

pub async fn newsletter(store: &dyn Storage) {
    let sub = store
        .subscribe_to_newsletter(NewSubscription {
            email: "reader@example.in".to_string(),
            subscribed: None,
        })
        .await
        .unwrap();
    assert!(sub.subscribed);

    let active = store.get_newsletter_subscribers().await.unwrap();
    assert_eq!(active, vec![sub]);

    assert!(store.unsubscribe_from_newsletter("reader@example.in").await.unwrap());
    assert!(store.get_newsletter_subscribers().await.unwrap().is_empty());

    // The record is kept, so it still matches
    assert!(store.unsubscribe_from_newsletter("reader@example.in").await.unwrap());
    assert!(!store.unsubscribe_from_newsletter("nobody@example.in").await.unwrap());
}

/// Only for backends that enforce uniqueness
pub async fn unique_constraints(store: &dyn Storage) {
    store.create_blog_post(new_post("taken", "a")).await.unwrap();
    let err = store.create_blog_post(new_post("taken", "b")).await.unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)), "{:?}", err);

    let other = store.create_blog_post(new_post("other", "a")).await.unwrap();
    let err = store
        .update_blog_post(
            &other.id,
            BlogPostPatch {
                slug: Some("taken".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)), "{:?}", err);

    store.create_user(new_user("asha")).await.unwrap();
    let err = store.create_user(new_user("asha")).await.unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)), "{:?}", err);

    let same_email = NewUser {
        username: "asha2".to_string(),
        ..new_user("asha")
    };
    let err = store.create_user(same_email).await.unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)), "{:?}", err);

    let sub = || NewSubscription {
        email: "once@example.in".to_string(),
        subscribed: None,
    };
    store.subscribe_to_newsletter(sub()).await.unwrap();
    let err = store.subscribe_to_newsletter(sub()).await.unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)), "{:?}", err);
}
