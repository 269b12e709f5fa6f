//! What to show for one account right now.
//!
//! Each section resolves to exactly one display state. "No data",
//! "no custom models yet" and "no results for query" stay distinct so a
//! renderer never has to guess which one it is looking at.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quotadeck_types::{Account, QuotaTier};
use serde::Serialize;

use super::config::DiscoverySettings;
use super::model_filter::filter_models;
use super::refresh::{RefreshCoordinator, RefreshNotice};
use crate::utils::format::format_reset_time;

/// One per-model quota line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotaRow {
    pub name: String,
    /// Percentage as stored in the snapshot.
    pub percentage: f64,
    /// Clamped to `[0, 100]` for progress bars.
    pub display_percentage: f64,
    pub tier: QuotaTier,
    pub reset_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum QuotaSection {
    NoData,
    Rows(Vec<QuotaRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "models", rename_all = "snake_case")]
pub enum ModelSection {
    /// Nothing to show and nothing to offer.
    Hidden,
    /// Custom provider that has never discovered models.
    NoCustomModels,
    /// Models exist but none match the query.
    NoResults,
    Chips(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryControl {
    pub visible: bool,
    pub busy: bool,
}

impl DiscoveryControl {
    pub const fn enabled(self) -> bool {
        self.visible && !self.busy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub account_id: String,
    pub quota: QuotaSection,
    pub models: ModelSection,
    pub discovery: DiscoveryControl,
}

/// Derive the view for `account` given the live search `query`.
///
/// `busy` is whether a refresh is in flight for this account; `now` anchors
/// the reset countdowns.
pub fn build_account_view(
    account: &Account,
    query: &str,
    busy: bool,
    now: DateTime<Utc>,
) -> AccountView {
    AccountView {
        account_id: account.id.clone(),
        quota: quota_section(account, now),
        models: model_section(account, query),
        discovery: DiscoveryControl { visible: account.supports_discovery(), busy },
    }
}

fn quota_section(account: &Account, now: DateTime<Utc>) -> QuotaSection {
    let models = account.quota_models();
    if models.is_empty() {
        return QuotaSection::NoData;
    }

    QuotaSection::Rows(
        models
            .iter()
            .map(|m| QuotaRow {
                name: m.name.clone(),
                percentage: m.percentage,
                display_percentage: m.display_percentage(),
                tier: m.tier(),
                reset_label: format_reset_time(m.reset_time(), now),
            })
            .collect(),
    )
}

fn model_section(account: &Account, query: &str) -> ModelSection {
    let models = account.supported_models();
    if models.is_empty() {
        return if account.supports_discovery() {
            ModelSection::NoCustomModels
        } else {
            ModelSection::Hidden
        };
    }

    let matched = filter_models(models, query);
    if matched.is_empty() {
        ModelSection::NoResults
    } else {
        ModelSection::Chips(matched)
    }
}

/// Account details view state: the live search query plus the coordinator
/// that owns discovery for every account shown.
#[derive(Debug, Clone)]
pub struct AccountQuotaView {
    coordinator: Arc<RefreshCoordinator>,
    query: String,
}

impl AccountQuotaView {
    pub fn new(coordinator: Arc<RefreshCoordinator>) -> Self {
        Self { coordinator, query: String::new() }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn render(&self, account: &Account) -> AccountView {
        self.render_at(account, Utc::now())
    }

    pub fn render_at(&self, account: &Account, now: DateTime<Utc>) -> AccountView {
        build_account_view(account, &self.query, self.coordinator.is_busy(&account.id), now)
    }

    /// Trigger discovery for `account` and return the notice to show, if any.
    ///
    /// A trigger while the control is busy is a no-op and yields no notice.
    pub async fn request_refresh(
        &self,
        account: &Account,
        settings: &DiscoverySettings,
    ) -> Option<RefreshNotice> {
        let result = self.coordinator.refresh(account, settings).await;
        RefreshNotice::from_result(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::refresh::NoticeLevel;
    use crate::test_helpers::{antigravity_account, custom_account, MemoryRepository, StubDiscovery};
    use quotadeck_types::QuotaData;
    use tokio::sync::Notify;

    fn now() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().expect("fixture time")
    }

    fn with_quota(mut account: Account, rows: &[(&str, f64, Option<&str>)]) -> Account {
        let mut quota = QuotaData::new();
        for (name, pct, reset) in rows {
            quota.add_model(name.to_string(), *pct, reset.map(str::to_string));
        }
        account.update_quota(quota);
        account
    }

    #[test]
    fn test_custom_account_with_quota_and_models() {
        let mut account = with_quota(
            custom_account("c1"),
            &[("gpt-4o", 75.0, Some("2026-03-01T14:30:00Z")), ("o3", 20.0, None)],
        );
        account.set_supported_models(vec!["gpt-4o".into(), "o3".into(), "gpt-4.1".into()]);

        let view = build_account_view(&account, "GPT", false, now());

        assert_eq!(
            view.quota,
            QuotaSection::Rows(vec![
                QuotaRow {
                    name: "gpt-4o".into(),
                    percentage: 75.0,
                    display_percentage: 75.0,
                    tier: QuotaTier::Healthy,
                    reset_label: "2h 30m".into(),
                },
                QuotaRow {
                    name: "o3".into(),
                    percentage: 20.0,
                    display_percentage: 20.0,
                    tier: QuotaTier::Warning,
                    reset_label: "unknown".into(),
                },
            ])
        );
        assert_eq!(view.models, ModelSection::Chips(vec!["gpt-4o".into(), "gpt-4.1".into()]));
        assert!(view.discovery.visible);
        assert!(view.discovery.enabled());
    }

    #[test]
    fn test_query_without_matches_is_no_results() {
        let mut account = custom_account("c1");
        account.set_supported_models(vec!["a".into(), "b".into()]);

        let view = build_account_view(&account, "zzz", false, now());

        assert_eq!(view.quota, QuotaSection::NoData);
        assert_eq!(view.models, ModelSection::NoResults);
    }

    #[test]
    fn test_custom_account_without_models_offers_discovery() {
        let view = build_account_view(&custom_account("c1"), "", false, now());
        assert_eq!(view.models, ModelSection::NoCustomModels);
        assert!(view.discovery.enabled());

        let mut account = custom_account("c1");
        account.supported_models = Some(vec![]);
        let view = build_account_view(&account, "anything", false, now());
        assert_eq!(view.models, ModelSection::NoCustomModels);
    }

    #[test]
    fn test_non_custom_account_hides_discovery() {
        let account = with_quota(antigravity_account("g1"), &[("gemini-3-pro", 5.0, None)]);

        let view = build_account_view(&account, "", false, now());

        assert_eq!(view.models, ModelSection::Hidden);
        assert!(!view.discovery.visible);
        assert!(!view.discovery.enabled());
        match view.quota {
            QuotaSection::Rows(rows) => assert_eq!(rows[0].tier, QuotaTier::Critical),
            QuotaSection::NoData => panic!("expected rows"),
        }
    }

    #[test]
    fn test_non_custom_account_with_models_still_lists_them() {
        let mut account = antigravity_account("g1");
        account.set_supported_models(vec!["claude-sonnet".into()]);

        let view = build_account_view(&account, "", false, now());

        assert_eq!(view.models, ModelSection::Chips(vec!["claude-sonnet".into()]));
        assert!(!view.discovery.visible);
    }

    #[test]
    fn test_out_of_range_percentage_is_clamped_for_display_only() {
        let account = with_quota(custom_account("c1"), &[("m", 130.0, None), ("n", -4.0, None)]);

        let QuotaSection::Rows(rows) = build_account_view(&account, "", false, now()).quota else {
            panic!("expected rows");
        };

        assert_eq!(rows[0].percentage, 130.0);
        assert_eq!(rows[0].display_percentage, 100.0);
        assert_eq!(rows[0].tier, QuotaTier::Healthy);
        assert_eq!(rows[1].display_percentage, 0.0);
        assert_eq!(rows[1].tier, QuotaTier::Critical);
    }

    #[test]
    fn test_busy_disables_control() {
        let view = build_account_view(&custom_account("c1"), "", true, now());
        assert!(view.discovery.visible);
        assert!(view.discovery.busy);
        assert!(!view.discovery.enabled());
    }

    #[tokio::test]
    async fn test_view_reflects_in_flight_refresh() {
        let account = custom_account("c1");
        let gate = Arc::new(Notify::new());
        let discovery = Arc::new(StubDiscovery::returning(&["m1", "m2"]).gated(gate.clone()));
        let repo = Arc::new(MemoryRepository::with_accounts(vec![account.clone()]));
        let coordinator = Arc::new(RefreshCoordinator::new(discovery.clone(), repo.clone()));
        let view = AccountQuotaView::new(coordinator);

        let pending = {
            let view = view.clone();
            let account = account.clone();
            tokio::spawn(async move {
                view.request_refresh(&account, &DiscoverySettings::default()).await
            })
        };
        discovery.started.notified().await;

        assert!(!view.render_at(&account, now()).discovery.enabled());
        assert_eq!(view.request_refresh(&account, &DiscoverySettings::default()).await, None);

        gate.notify_one();
        let notice = pending.await.expect("task").expect("notice");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Discovered 2 models");
        assert_eq!(discovery.call_count(), 1);

        // The held snapshot is stale until the list is fetched again.
        assert_eq!(view.render_at(&account, now()).models, ModelSection::NoCustomModels);
        let updated = repo.accounts.lock().unwrap()[0].clone();
        assert_eq!(
            view.render_at(&updated, now()).models,
            ModelSection::Chips(vec!["m1".into(), "m2".into()])
        );
        assert!(view.render_at(&updated, now()).discovery.enabled());
    }

    #[test]
    fn test_query_is_kept_on_the_view() {
        let repo = Arc::new(MemoryRepository::default());
        let discovery = Arc::new(StubDiscovery::returning(&[]));
        let mut view = AccountQuotaView::new(Arc::new(RefreshCoordinator::new(discovery, repo)));
        let mut account = custom_account("c1");
        account.set_supported_models(vec!["Alpha".into(), "beta".into()]);

        view.set_query("ALP");
        assert_eq!(view.query(), "ALP");
        assert_eq!(view.render(&account).models, ModelSection::Chips(vec!["Alpha".into()]));
    }
}
