use std::fmt::Write;

use crate::models::{MAX_DAYS, MIN_DAYS};

pub fn execute(out: &mut String) -> Result<(), String> {
    let sections: [(&str, String); 4] = [
        (
            "🔍 Finding a coin",
            "`search [term]` - Filter coins by name (no term clears the filter)\n\
             `list [page]` - Show the matching coins, 20 per page\n\
             `select <name|#number>` - Pick a coin by name or by `#` and its list number"
                .to_string(),
        ),
        (
            "📉 Price history",
            format!(
                "`days <{}-{}>` - Number of days of history\n\
                 `chart <line|area|bar>` - Chart type\n\
                 `raw [on|off]` - Show the raw API response",
                MIN_DAYS, MAX_DAYS
            ),
        ),
        (
            "🌍 Exchanges",
            "`map` - Show the exchange headquarters map".to_string(),
        ),
        (
            "🎯 General",
            "`reload` - Render the page again\n\
             `help` - Show this help message\n\
             `quit` - Leave the tracker"
                .to_string(),
        ),
    ];

    let _ = writeln!(out, "\n== 📖 Crypto Tracker Commands ==");
    for (title, body) in sections {
        let _ = writeln!(out, "\n{}\n{}", title, body);
    }
    Ok(())
}
