use std::rc::Rc;

use dominator::{Dom, clone, html, link};
use futures_signals::signal::{Mutable, SignalExt};
use futures_signals::signal_vec::SignalVecExt;
use referralhub_core::models::{Role, user_initials};
use referralhub_core::route::Route;

use crate::common::{RouteExt, events};
use crate::query;
use crate::storage::Session;
use crate::utils::AsyncLoader;

/// Frame shared by the signed in views: sidebar with navigation, the current
/// user and logout.
pub struct Layout {
    session: Rc<Session>,
    sidebar_open: Mutable<bool>,
    loader: AsyncLoader,
}

impl Layout {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            sidebar_open: Mutable::new(false),
            loader: AsyncLoader::new(),
        })
    }

    fn fetch_me(layout: Rc<Self>) {
        layout.loader.load(clone!(layout => async move {
            match query::fetch_me(&layout.session).await {
                Ok(user) => layout.session.refresh_user(user),
                Err(e) => warn!("failed to refresh profile: {}", e),
            }
        }));
    }

    fn logout(&self) {
        self.session.logout();
        Route::Login.go_to();
    }

    fn nav_items(role: Option<Role>) -> Vec<(Route, &'static str)> {
        match role {
            Some(Role::Hr) => vec![(Route::Hr, "Dashboard")],
            _ => vec![(Route::Employee, "Dashboard")],
        }
    }

    fn render_sidebar(layout: Rc<Self>) -> Dom {
        let user = layout.session.signal().map(|state| state.user().cloned());

        html!("aside", {
            .class("sidebar")
            .class_signal("open", layout.sidebar_open.signal())
            .children(&mut [
                html!("div", {
                    .class("sidebar-header")
                    .children(&mut [
                        html!("h1", {
                            .text("ReferralHub")
                        }),
                        html!("span", {
                            .class("role-badge")
                            .text_signal(layout.session.signal().map(|state| {
                                state.role().map(|role| role.to_string()).unwrap_or_default()
                            }))
                        }),
                    ])
                }),
                html!("nav", {
                    .class("sidebar-nav")
                    .children(&mut [
                        html!("div", {
                            .class("nav-section")
                            .children(&mut [
                                html!("div", {
                                    .class("nav-section-title")
                                    .text("Navigation")
                                }),
                            ])
                            .children_signal_vec(layout.session.signal()
                                .map(|state| Self::nav_items(state.role()))
                                .to_signal_vec()
                                .map(clone!(layout => move |(route, label)| {
                                    link!(route.url(), {
                                        .class("nav-item")
                                        .class_signal("active", Route::signal().map(move |current| current == route))
                                        .event(clone!(layout => move |_: events::Click| {
                                            layout.sidebar_open.set_neq(false);
                                        }))
                                        .children(&mut [
                                            html!("span", {
                                                .class("nav-icon")
                                                .text("📊")
                                            }),
                                            html!("span", {
                                                .text(label)
                                            }),
                                        ])
                                    })
                                })))
                        }),
                    ])
                }),
                html!("div", {
                    .class("sidebar-footer")
                    .children(&mut [
                        html!("div", {
                            .class("sidebar-user")
                            .child_signal(user.map(|user| user.map(|user| html!("div", {
                                .children(&mut [
                                    html!("div", {
                                        .class("user-avatar")
                                        .text(&user_initials(&user.name))
                                    }),
                                    html!("div", {
                                        .class("user-info")
                                        .children(&mut [
                                            html!("div", {
                                                .class("user-name")
                                                .text(&user.name)
                                            }),
                                            html!("div", {
                                                .class("user-email")
                                                .text(&user.email)
                                            }),
                                        ])
                                    }),
                                ])
                            }))))
                        }),
                        html!("button", {
                            .class("logout-btn")
                            .text("🚪 Logout")
                            .event(clone!(layout => move |_: events::Click| {
                                layout.logout();
                            }))
                        }),
                    ])
                }),
            ])
        })
    }

    pub fn render(layout: Rc<Self>, content: Dom) -> Dom {
        Self::fetch_me(layout.clone());

        html!("div", {
            .class("app-layout")
            .children(&mut [
                html!("div", {
                    .class("mobile-header")
                    .children(&mut [
                        html!("button", {
                            .class("hamburger-btn")
                            .text("☰")
                            .event(clone!(layout => move |_: events::Click| {
                                layout.sidebar_open.replace_with(|open| !*open);
                            }))
                        }),
                        html!("h1", {
                            .text("ReferralHub")
                        }),
                    ])
                }),
                html!("div", {
                    .class("sidebar-overlay")
                    .class_signal("open", layout.sidebar_open.signal())
                    .event(clone!(layout => move |_: events::Click| {
                        layout.sidebar_open.set_neq(false);
                    }))
                }),
                Self::render_sidebar(layout.clone()),
                html!("main", {
                    .class("main-content")
                    .children(&mut [content])
                }),
            ])
        })
    }
}
