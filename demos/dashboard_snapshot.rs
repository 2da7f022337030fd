// Fetch every site from a running server and print the dashboard as text bar charts.
//
// Usage: cargo run --example dashboard_snapshot -- [BASE_URL] [day|hour] [SITE,SITE...]
//   BASE_URL  default: http://127.0.0.1:8080
//   day|hour  default: day
//   sites     default: all loaded sites
//
// Sites, timezone, date format, load policy and timeout come from CONFIG_FILE (default config.toml).

use std::env;
use visitboard::config::AppConfig;
use visitboard::dashboard::{DashboardView, RetrievalClient, SelectionState, load_all};
use visitboard::models::Granularity;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let base_url = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("http://127.0.0.1:8080");
    let granularity: Granularity = args.get(2).map(String::as_str).unwrap_or("day").parse()?;
    let selection: SelectionState = args
        .get(3)
        .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let config = AppConfig::load()?;
    let dashboard = &config.dashboard;
    let client = RetrievalClient::new(base_url, dashboard.request_timeout())?;
    let loaded = load_all(
        &client,
        &config.sites,
        dashboard.load_policy,
        dashboard.request_timeout(),
    )
    .await?;

    let mut view = DashboardView::new(loaded, dashboard.clock());
    view.set_selection(selection);
    view.set_granularity(granularity);
    let render = view.render();

    println!("{} ({})", render.title, render.granularity);
    for chart in &render.charts {
        println!("\n{}", chart.name);
        for dataset in &chart.chart.datasets {
            for (label, count) in chart.chart.labels.iter().zip(&dataset.data) {
                println!("  {:<16} {:>5} {}", label, count, "#".repeat((*count).min(60) as usize));
            }
        }
    }
    for failure in &render.failures {
        println!("\n{}: unavailable ({})", failure.site, failure.message);
    }
    Ok(())
}
