use dominator::{Dom, html};

pub fn render_table_head(columns: &[&str]) -> Dom {
    html!("thead", {
        .children(&mut [
            html!("tr", {
                .children(columns.iter().map(|column| html!("th", {
                    .text(column)
                })))
            }),
        ])
    })
}

pub fn render_experience(years: Option<i64>) -> String {
    match years {
        Some(years) => format!("{} yrs", years),
        None => "-".to_string(),
    }
}

pub fn render_empty_state(message: &str) -> Dom {
    html!("div", {
        .class("empty-state")
        .children(&mut [
            html!("div", {
                .class("empty-icon")
                .text("📭")
            }),
            html!("p", {
                .text(message)
            }),
        ])
    })
}

/// Spinner with a caption, shown in place of a table that has not loaded yet.
pub fn render_table_loading() -> Dom {
    html!("div", {
        .class("loading-container")
        .children(&mut [
            html!("div", {
                .class("spinner")
            }),
            html!("span", {
                .class("loading-text")
                .text("Loading referrals...")
            }),
        ])
    })
}
