use dominator::{Dom, html};

pub struct Spinner;

impl Spinner {
    /// Neutral placeholder shown while nothing can be decided yet.
    pub fn render_spinner(fullscreen: bool) -> Dom {
        html!("div", {
            .class("loading-container")
            .apply_if(fullscreen, |dom| dom.style("min-height", "100vh"))
            .children(&mut [
                html!("div", {
                    .class("spinner")
                }),
                html!("span", {
                    .class("loading-text")
                    .text("Loading...")
                }),
            ])
        })
    }

    pub fn render_small() -> Dom {
        html!("div", {
            .class("spinner")
            .style("width", "18px")
            .style("height", "18px")
            .style("border-width", "2px")
        })
    }
}
