use std::fmt::Write;

use crate::services::dashboard_service::{Dashboard, LIST_PAGE_SIZE};
use crate::utils::{Page, Table};

/// `list [page]`: the coins matching the current search, 20 per page
pub async fn execute(dashboard: &mut Dashboard, out: &mut String, args: &[&str]) -> Result<(), String> {
    let page_num = match args.first() {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|_| format!("❌ Invalid page number: '{}'", arg))?,
        None => 1,
    };

    let names = dashboard.filtered_names().await.map_err(|e| e.to_string())?;
    let page = Page::of(&names, page_num, LIST_PAGE_SIZE)?;

    let mut table = Table::new(&["#", "Coin"]);
    let offset = page.first_index(LIST_PAGE_SIZE);
    for (i, name) in page.items.iter().enumerate() {
        table.add_row(vec![(offset + i + 1).to_string(), name.clone()]);
    }

    let search = &dashboard.state().search;
    let _ = writeln!(
        out,
        "\n== 🪙 Coins{} ==",
        if search.is_empty() { String::new() } else { format!(" matching \"{}\"", search) }
    );
    if names.is_empty() {
        let _ = writeln!(out, "No coins found.");
    } else {
        let _ = writeln!(out, "{}", table.render());
    }
    let _ = writeln!(
        out,
        "Page {}/{} • {} coin(s) • `select #<number>` to pick one",
        page.current_page, page.total_pages, page.total_items
    );
    Ok(())
}
