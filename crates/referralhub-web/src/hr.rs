use std::collections::HashMap;
use std::rc::Rc;

use dominator::{Dom, clone, html, with_node};
use futures_signals::{
    map_ref,
    signal::{Mutable, Signal, SignalExt},
    signal_vec::{MutableVec, SignalVecExt},
};
use gloo_timers::future::TimeoutFuture;
use referralhub_core::form::ROW_FEEDBACK_DELAY_MS;
use referralhub_core::models::{Referral, ReferralStats, ReferralStatus};
use referralhub_core::referral::{StatusChange, StatusRow};
use web_sys::HtmlSelectElement;

use crate::common::{
    Spinner, events, render_empty_state, render_experience, render_status_badge,
    render_table_head, render_table_loading,
};
use crate::query;
use crate::storage::Session;
use crate::utils::AsyncLoader;

/// One line of the referral table. Survives refetches as long as the
/// referral is still listed, so a request in flight keeps its row.
struct ReferralRow {
    id: String,
    state: Mutable<StatusRow>,
    request: AsyncLoader,
    feedback_timer: AsyncLoader,
}

impl ReferralRow {
    fn new(referral: Referral) -> Rc<Self> {
        Rc::new(Self {
            id: referral.id.clone(),
            state: Mutable::new(StatusRow::new(referral)),
            request: AsyncLoader::new(),
            feedback_timer: AsyncLoader::new(),
        })
    }

    fn clear_feedback_later(&self) {
        let state = self.state.clone();
        self.feedback_timer.load(async move {
            TimeoutFuture::new(ROW_FEEDBACK_DELAY_MS).await;
            state.lock_mut().clear_feedback();
        });
    }
}

pub struct HrDashboard {
    session: Rc<Session>,
    rows: MutableVec<Rc<ReferralRow>>,
    loaded: Mutable<bool>,
    error: Mutable<Option<String>>,
    loader: AsyncLoader,
}

impl HrDashboard {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            rows: MutableVec::new(),
            loaded: Mutable::new(false),
            error: Mutable::new(None),
            loader: AsyncLoader::new(),
        })
    }

    fn fetch_referrals(dashboard: Rc<Self>) {
        dashboard.loader.load(clone!(dashboard => async move {
            match query::fetch_all_referrals(&dashboard.session).await {
                Ok(referrals) => {
                    dashboard.reconcile(referrals);
                    dashboard.error.set_neq(None);
                    dashboard.loaded.set_neq(true);
                }
                Err(e) => {
                    error!("failed to fetch referrals: {}", e);
                    dashboard.error.set(Some(e.to_string()));
                }
            }
        }));
    }

    fn reconcile(&self, referrals: Vec<Referral>) {
        let mut rows = self.rows.lock_mut();
        let existing: HashMap<String, Rc<ReferralRow>> = rows
            .iter()
            .map(|row| (row.id.clone(), row.clone()))
            .collect();

        let next = referrals
            .into_iter()
            .map(|referral| match existing.get(&referral.id) {
                Some(row) => {
                    row.state.lock_mut().sync(referral);
                    row.clone()
                }
                None => ReferralRow::new(referral),
            })
            .collect();

        rows.replace_cloned(next);
    }

    fn change_status(dashboard: Rc<Self>, row: Rc<ReferralRow>, status: ReferralStatus) {
        let Some(change) = row.state.lock_mut().choose(status) else {
            return;
        };
        row.feedback_timer.cancel();

        row.request.load(clone!(dashboard, row => async move {
            let id = change.referral_id.clone();
            match query::update_referral_status(&dashboard.session, id, change.status).await {
                Ok(status) => {
                    info!("referral {} is now {}", change.referral_id, status);
                    row.state.lock_mut().confirm(&StatusChange { status, ..change });
                    row.clear_feedback_later();
                    Self::fetch_referrals(dashboard.clone());
                }
                Err(e) => {
                    warn!("failed to update referral {}: {}", change.referral_id, e);
                    row.state.lock_mut().reject(&change, e.to_string());
                }
            }
        }));
    }

    fn stats_signal(&self) -> impl Signal<Item = ReferralStats> + use<> {
        self.rows
            .signal_vec_cloned()
            .map_signal(|row| row.state.signal_ref(|state| state.referral.clone()))
            .to_signal_map(ReferralStats::tally)
            .dedupe()
    }

    fn render_stat<S>(icon: &str, color: &str, label: &str, value: S) -> Dom
    where
        S: Signal<Item = usize> + 'static,
    {
        html!("div", {
            .class("stat-card")
            .children(&mut [
                html!("div", {
                    .class(["stat-icon", color])
                    .text(icon)
                }),
                html!("div", {
                    .class("stat-info")
                    .children(&mut [
                        html!("div", {
                            .class("stat-value")
                            .text_signal(value.map(|value| value.to_string()))
                        }),
                        html!("div", {
                            .class("stat-label")
                            .text(label)
                        }),
                    ])
                }),
            ])
        })
    }

    fn render_stats(dashboard: Rc<Self>) -> Dom {
        let stats = dashboard.stats_signal().broadcast();

        html!("div", {
            .class("stats-row")
            .children(&mut [
                Self::render_stat("📊", "blue", "Total Referrals", stats.signal().map(|s| s.total)),
                Self::render_stat("⏳", "amber", "Pending", stats.signal().map(|s| s.pending)),
                Self::render_stat("✅", "green", "Hired", stats.signal().map(|s| s.hired)),
                Self::render_stat("❌", "red", "Rejected", stats.signal().map(|s| s.rejected)),
            ])
        })
    }

    fn render_status_select(dashboard: Rc<Self>, row: Rc<ReferralRow>) -> Dom {
        html!("select" => HtmlSelectElement, {
            .class("status-select")
            .children(&mut ReferralStatus::ALL.map(|status| html!("option", {
                .attr("value", status.as_str())
                .text(status.as_str())
            })))
            .prop_signal("value", row.state.signal_ref(|state| state.selected.as_str()))
            .prop_signal("disabled", row.state.signal_ref(|state| state.pending))
            .with_node!(select => {
                .event(clone!(dashboard, row => move |_: events::Change| {
                    match select.value().parse::<ReferralStatus>() {
                        Ok(status) => Self::change_status(dashboard.clone(), row.clone(), status),
                        Err(e) => warn!("{}", e),
                    }
                }))
            })
        })
    }

    fn render_row(dashboard: Rc<Self>, row: Rc<ReferralRow>) -> Dom {
        let referral = row.state.lock_ref().referral.clone();

        html!("tr", {
            .children(&mut [
                html!("td", {
                    .text(&referral.candidate.name)
                }),
                html!("td", {
                    .text(&referral.candidate.email)
                }),
                html!("td", {
                    .text(&render_experience(referral.candidate.experience_years))
                }),
                html!("td", {
                    .text(&referral.referred_by.name)
                }),
                html!("td", {
                    .child_signal(row.state.signal_ref(|state| state.committed()).dedupe().map(|status| {
                        Some(render_status_badge(status))
                    }))
                }),
                html!("td", {
                    .children(&mut [
                        html!("div", {
                            .style("display", "flex")
                            .style("align-items", "center")
                            .style("gap", "8px")
                            .children(&mut [
                                Self::render_status_select(dashboard.clone(), row.clone()),
                            ])
                            .child_signal(row.state.signal_ref(|state| state.pending).dedupe().map(|pending| {
                                pending.then(Spinner::render_small)
                            }))
                            .child_signal(row.state.signal_ref(|state| state.feedback.clone()).map(|feedback| {
                                feedback.map(|feedback| html!("span", {
                                    .style("font-size", "0.78rem")
                                    .style("color", if feedback.is_error() {
                                        "var(--accent-danger)"
                                    } else {
                                        "var(--accent-success)"
                                    })
                                    .text(&feedback.text())
                                }))
                            }))
                        }),
                    ])
                }),
            ])
        })
    }

    fn render_referrals(dashboard: Rc<Self>) -> Dom {
        let content = map_ref! {
            let loaded = dashboard.loaded.signal(),
            let loading = dashboard.loader.is_loading(),
            let empty = dashboard.rows.signal_vec_cloned().is_empty() =>
            (*loaded, *loading, *empty)
        }
        .dedupe()
        .map(clone!(dashboard => move |state| match state {
            (false, true, _) => Some(render_table_loading()),
            (false, false, _) => None,
            (true, _, true) => Some(render_empty_state("No referrals have been submitted yet.")),
            (true, _, false) => Some(html!("div", {
                .class("table-container")
                .children(&mut [
                    html!("table", {
                        .class("data-table")
                        .children(&mut [
                            render_table_head(&["Candidate", "Email", "Experience", "Referred By", "Status", "Update"]),
                            html!("tbody", {
                                .children_signal_vec(dashboard.rows.signal_vec_cloned().map(clone!(dashboard => move |row| {
                                    Self::render_row(dashboard.clone(), row)
                                })))
                            }),
                        ])
                    }),
                ])
            })),
        }));

        html!("div", {
            .class("card")
            .children(&mut [
                html!("div", {
                    .class("card-header")
                    .children(&mut [
                        html!("h3", {
                            .text("📋 All Referrals")
                        }),
                        html!("span", {
                            .class("loading-text")
                            .text_signal(dashboard.rows.signal_vec_cloned().len().map(|len| format!("{} total", len)))
                        }),
                    ])
                }),
                html!("div", {
                    .child_signal(dashboard.error.signal_cloned().map(|error| {
                        error.map(|error| html!("div", {
                            .class("error-message")
                            .text(&error)
                        }))
                    }))
                }),
                html!("div", {
                    .child_signal(content)
                }),
            ])
        })
    }

    pub fn render(dashboard: Rc<Self>) -> Dom {
        Self::fetch_referrals(dashboard.clone());

        html!("div", {
            .children(&mut [
                html!("div", {
                    .class("page-header")
                    .children(&mut [
                        html!("h2", {
                            .text("HR Dashboard")
                        }),
                        html!("p", {
                            .text("Manage all referrals and update candidate statuses")
                        }),
                    ])
                }),
                Self::render_stats(dashboard.clone()),
                Self::render_referrals(dashboard),
            ])
        })
    }
}
