use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use quotadeck_core::modules::account::FileAccountRepository;
use quotadeck_core::modules::config::{load_config, resolve_discovery_settings};
use quotadeck_core::modules::feed::AccountFeed;
use quotadeck_core::modules::refresh::NoticeLevel;
use quotadeck_core::modules::repository::find_account;
use quotadeck_core::modules::view::build_account_view;
use quotadeck_core::{
    AccountQuotaView, AccountRepository, AccountView, HttpModelDiscovery, ModelSection,
    QuotaSection, RefreshCoordinator,
};
use quotadeck_types::{Account, QuotaTier};

fn open_repository() -> Result<Arc<FileAccountRepository>> {
    let repo =
        FileAccountRepository::from_default_dir().context("Failed to locate data directory")?;
    tracing::debug!("Using data directory {}", repo.data_dir().display());
    Ok(Arc::new(repo))
}

pub async fn list_accounts(json: bool) -> Result<()> {
    let repo = open_repository()?;
    let accounts = repo.list_accounts().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("{}", "No accounts found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Email", "Provider", "Models", "Lowest Quota", "Status"]);

    for acc in &accounts {
        let status = if acc.disabled {
            Cell::new("Disabled").fg(Color::Red)
        } else {
            Cell::new("Active").fg(Color::Green)
        };

        table.add_row(vec![
            Cell::new(&acc.email),
            Cell::new(acc.provider),
            Cell::new(acc.supported_models().len()),
            lowest_quota_cell(acc),
            status,
        ]);
    }

    println!("{table}");
    println!("\n{} accounts total", accounts.len());
    Ok(())
}

fn lowest_quota_cell(acc: &Account) -> Cell {
    let Some(quota) = acc.quota.as_ref() else {
        return Cell::new("-");
    };
    match (quota.min_quota(), quota.worst_tier()) {
        (Some(min), Some(tier)) => Cell::new(format!("{min:.0}% ({tier})")).fg(tier_color(tier)),
        _ => Cell::new("-"),
    }
}

/// Colour scale indexed by tier weight.
const TIER_COLORS: [Color; 3] = [Color::Green, Color::Yellow, Color::Red];

fn tier_color(tier: QuotaTier) -> Color {
    TIER_COLORS.get(usize::from(tier.weight())).copied().unwrap_or(Color::Red)
}

pub async fn show_account(identifier: &str, query: &str, json: bool) -> Result<()> {
    let repo = open_repository()?;
    let acc = find_account(repo.as_ref(), identifier).await?;
    let view = build_account_view(&acc, query, false, chrono::Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} ({})", acc.email.cyan().bold(), acc.provider);
    print_view(&view, query);
    Ok(())
}

fn print_view(view: &AccountView, query: &str) {
    println!("\n{}", "Quota".bold());
    match &view.quota {
        QuotaSection::NoData => println!("  {}", "No quota data".dimmed()),
        QuotaSection::Rows(rows) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Model", "Remaining", "Tier", "Resets In"]);
            for row in rows {
                table.add_row(vec![
                    Cell::new(&row.name),
                    Cell::new(format!("{:.0}%", row.display_percentage)),
                    Cell::new(row.tier).fg(tier_color(row.tier)),
                    Cell::new(&row.reset_label),
                ]);
            }
            println!("{table}");
        },
    }

    match &view.models {
        ModelSection::Hidden => {},
        ModelSection::NoCustomModels => {
            println!("\n{}", "Supported Models".bold());
            println!(
                "  {} Run `quotadeck account discover {}` to fetch them.",
                "No models discovered yet.".yellow(),
                view.account_id
            );
        },
        ModelSection::NoResults => {
            println!("\n{}", "Supported Models".bold());
            println!("  {}", format!("No models match '{query}'").yellow());
        },
        ModelSection::Chips(models) => {
            println!("\n{} ({})", "Supported Models".bold(), models.len());
            for model in models {
                println!("  • {model}");
            }
        },
    }

    if view.discovery.visible {
        let hint = if view.discovery.enabled() { "available" } else { "in progress" };
        println!("\nDiscovery: {hint}");
    }
}

pub async fn discover_models(identifier: &str) -> Result<()> {
    let repo = open_repository()?;
    let acc = find_account(repo.as_ref(), identifier).await?;

    let config = load_config().context("Failed to load configuration")?;
    let settings = resolve_discovery_settings(config.as_ref());

    let feed = AccountFeed::new(repo.clone());
    let coordinator = RefreshCoordinator::new(Arc::new(HttpModelDiscovery::new()), repo.clone())
        .with_feed(feed.clone());
    let view = AccountQuotaView::new(Arc::new(coordinator));

    println!("{}", format!("Discovering models for {}...", acc.email).cyan());

    let Some(notice) = view.request_refresh(&acc, &settings).await else {
        return Ok(());
    };

    match notice.level {
        NoticeLevel::Success => {
            println!("{} {}", "✓".green(), notice.message.green());
            if let Some(updated) = feed.account(&acc.id) {
                print_view(&view.render(&updated), view.query());
            }
            Ok(())
        },
        NoticeLevel::Error => {
            anyhow::bail!("{}", notice.message)
        },
    }
}
