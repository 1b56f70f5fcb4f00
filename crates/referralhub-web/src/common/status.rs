use dominator::{Dom, html};
use referralhub_core::models::ReferralStatus;

pub fn render_status_badge(status: ReferralStatus) -> Dom {
    html!("span", {
        .class("status-badge")
        .class(status.css_class())
        .text(&format!("{} {}", status.icon(), status))
    })
}
