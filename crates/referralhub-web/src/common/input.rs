use dominator::{Dom, clone, html, with_node};
use futures_signals::signal::{Mutable, Signal};
use web_sys::HtmlInputElement;

use super::events;

/// Text input bound both ways to `value`, disabled while `disabled` is true.
pub fn render_input<S>(
    value: &Mutable<String>,
    kind: &str,
    placeholder: &str,
    autocomplete: &str,
    disabled: S,
) -> Dom
where
    S: Signal<Item = bool> + 'static,
{
    html!("input" => HtmlInputElement, {
        .attr("type", kind)
        .attr("placeholder", placeholder)
        .attr("autocomplete", autocomplete)
        .prop_signal("value", value.signal_cloned())
        .prop_signal("disabled", disabled)
        .with_node!(input => {
            .event(clone!(value => move |_: events::Input| {
                value.set(input.value());
            }))
        })
    })
}

pub fn render_field(label: &str, input: Dom) -> Dom {
    html!("div", {
        .class("form-group")
        .children(&mut [
            html!("label", {
                .text(label)
            }),
            input,
        ])
    })
}
