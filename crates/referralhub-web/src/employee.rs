use std::rc::Rc;

use dominator::{Dom, EventOptions, clone, html, with_node};
use futures_signals::{
    map_ref,
    signal::{Mutable, Signal, SignalExt},
    signal_vec::{MutableVec, SignalVecExt},
};
use referralhub_core::form::{CandidateInput, ReferralInput, Submission};
use referralhub_core::models::{Referral, unique_candidates};
use web_sys::HtmlSelectElement;

use crate::common::{
    Banner, events, render_empty_state, render_experience, render_field, render_input,
    render_status_badge, render_table_head, render_table_loading,
};
use crate::query;
use crate::storage::Session;
use crate::utils::AsyncLoader;

struct CandidateForm {
    name: Mutable<String>,
    email: Mutable<String>,
    experience_years: Mutable<String>,
    submission: Mutable<Submission<()>>,
    banner: Rc<Banner>,
    loader: AsyncLoader,
}

impl CandidateForm {
    fn new() -> Self {
        Self {
            name: Mutable::new("".to_string()),
            email: Mutable::new("".to_string()),
            experience_years: Mutable::new("".to_string()),
            submission: Mutable::new(Submission::Idle),
            banner: Banner::new(),
            loader: AsyncLoader::new(),
        }
    }
}

struct ReferralForm {
    candidate_id: Mutable<String>,
    submission: Mutable<Submission<()>>,
    banner: Rc<Banner>,
    loader: AsyncLoader,
}

impl ReferralForm {
    fn new() -> Self {
        Self {
            candidate_id: Mutable::new("".to_string()),
            submission: Mutable::new(Submission::Idle),
            banner: Banner::new(),
            loader: AsyncLoader::new(),
        }
    }
}

pub struct EmployeeDashboard {
    session: Rc<Session>,
    referrals: MutableVec<Referral>,
    loaded: Mutable<bool>,
    error: Mutable<Option<String>>,
    loader: AsyncLoader,
    candidate_form: CandidateForm,
    referral_form: ReferralForm,
}

impl EmployeeDashboard {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            referrals: MutableVec::new(),
            loaded: Mutable::new(false),
            error: Mutable::new(None),
            loader: AsyncLoader::new(),
            candidate_form: CandidateForm::new(),
            referral_form: ReferralForm::new(),
        })
    }

    fn fetch_referrals(dashboard: Rc<Self>) {
        dashboard.loader.load(clone!(dashboard => async move {
            match query::fetch_my_referrals(&dashboard.session).await {
                Ok(referrals) => {
                    dashboard.referrals.lock_mut().replace_cloned(referrals);
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

    fn create_candidate(dashboard: Rc<Self>) {
        let form = &dashboard.candidate_form;
        form.banner.clear();

        let input = match CandidateInput::validate(
            &form.name.lock_ref(),
            &form.email.lock_ref(),
            &form.experience_years.lock_ref(),
        ) {
            Ok(input) => input,
            Err(e) => {
                form.submission.lock_mut().reject(e.clone());
                form.banner.error(e.to_string());
                return;
            }
        };

        if !form.submission.lock_mut().begin() {
            return;
        }

        form.loader.load(clone!(dashboard => async move {
            let form = &dashboard.candidate_form;
            match query::create_candidate(&dashboard.session, input).await {
                Ok(candidate) => {
                    info!("created candidate {}", candidate.id);
                    form.submission.lock_mut().settle(Ok(()));
                    form.name.set("".to_string());
                    form.email.set("".to_string());
                    form.experience_years.set("".to_string());
                    form.banner.success(format!(
                        "Candidate \"{}\" created successfully!",
                        candidate.name
                    ));
                    dashboard.referral_form.candidate_id.set(candidate.id);
                }
                Err(e) => {
                    form.submission.lock_mut().settle(Err(e.to_string()));
                    form.banner.error(e.to_string());
                }
            }
        }));
    }

    fn create_referral(dashboard: Rc<Self>) {
        let form = &dashboard.referral_form;
        form.banner.clear();

        let input = match ReferralInput::validate(&form.candidate_id.lock_ref()) {
            Ok(input) => input,
            Err(e) => {
                form.submission.lock_mut().reject(e.clone());
                form.banner.error(e.to_string());
                return;
            }
        };

        if !form.submission.lock_mut().begin() {
            return;
        }

        form.loader.load(clone!(dashboard => async move {
            let form = &dashboard.referral_form;
            match query::create_referral(&dashboard.session, input).await {
                Ok(referral) => {
                    info!("submitted referral {}", referral.id);
                    form.submission.lock_mut().settle(Ok(()));
                    form.candidate_id.set("".to_string());
                    form.banner.success(format!(
                        "Referral for \"{}\" submitted!",
                        referral.candidate.name
                    ));
                    Self::fetch_referrals(dashboard.clone());
                }
                Err(e) => {
                    form.submission.lock_mut().settle(Err(e.to_string()));
                    form.banner.error(e.to_string());
                }
            }
        }));
    }

    fn render_candidate_form(dashboard: Rc<Self>) -> Dom {
        let form = &dashboard.candidate_form;

        html!("div", {
            .class("card")
            .children(&mut [
                html!("div", {
                    .class("card-header")
                    .children(&mut [
                        html!("h3", {
                            .text("➕ Add Candidate")
                        }),
                    ])
                }),
                Banner::render(form.banner.clone()),
                html!("form", {
                    .children(&mut [
                        render_field("Candidate Name", render_input(
                            &form.name,
                            "text",
                            "Jane Smith",
                            "off",
                            form.submission.signal_ref(Submission::is_pending),
                        )),
                        render_field("Candidate Email", render_input(
                            &form.email,
                            "email",
                            "jane@email.com",
                            "off",
                            form.submission.signal_ref(Submission::is_pending),
                        )),
                        render_field("Experience (Years)", render_input(
                            &form.experience_years,
                            "number",
                            "3",
                            "off",
                            form.submission.signal_ref(Submission::is_pending),
                        )),
                        html!("button", {
                            .class(["btn", "btn-primary", "btn-full"])
                            .attr("type", "submit")
                            .prop_signal("disabled", form.submission.signal_ref(Submission::is_pending))
                            .text_signal(form.submission.signal_ref(|s| {
                                if s.is_pending() { "Creating..." } else { "Create Candidate" }
                            }))
                            .event_with_options(&EventOptions::preventable(), clone!(dashboard => move |e: events::Click| {
                                e.prevent_default();
                                Self::create_candidate(dashboard.clone());
                            }))
                        }),
                    ])
                }),
            ])
        })
    }

    fn render_candidate_select(dashboard: Rc<Self>) -> impl Signal<Item = Option<Dom>> {
        dashboard
            .referrals
            .signal_vec_cloned()
            .to_signal_cloned()
            .map(|referrals| unique_candidates(&referrals))
            .dedupe_cloned()
            .map(clone!(dashboard => move |candidates| {
                if candidates.is_empty() {
                    return None;
                }

                let candidate_id = dashboard.referral_form.candidate_id.clone();
                let mut options = vec![html!("option", {
                    .attr("value", "")
                    .prop_signal("selected", candidate_id.signal_ref(|id| id.is_empty()))
                    .text("-- Select --")
                })];
                options.extend(candidates.into_iter().map(|candidate| {
                    let id = candidate.id.clone();
                    html!("option", {
                        .attr("value", &candidate.id)
                        .prop_signal("selected", candidate_id.signal_ref(move |selected| *selected == id))
                        .text(&format!("{} ({})", candidate.name, candidate.email))
                    })
                }));

                Some(render_field("Or select from your candidates", html!("select" => HtmlSelectElement, {
                    .children(&mut options)
                    .prop_signal("disabled", dashboard.referral_form.submission.signal_ref(Submission::is_pending))
                    .with_node!(select => {
                        .event(clone!(candidate_id => move |_: events::Change| {
                            candidate_id.set(select.value());
                        }))
                    })
                })))
            }))
    }

    fn render_referral_form(dashboard: Rc<Self>) -> Dom {
        let form = &dashboard.referral_form;

        html!("div", {
            .class("card")
            .children(&mut [
                html!("div", {
                    .class("card-header")
                    .children(&mut [
                        html!("h3", {
                            .text("🔗 Create Referral")
                        }),
                    ])
                }),
                Banner::render(form.banner.clone()),
                html!("form", {
                    .children(&mut [
                        render_field("Candidate ID", render_input(
                            &form.candidate_id,
                            "text",
                            "Enter candidate ID",
                            "off",
                            form.submission.signal_ref(Submission::is_pending),
                        )),
                        html!("div", {
                            .child_signal(Self::render_candidate_select(dashboard.clone()))
                        }),
                        html!("button", {
                            .class(["btn", "btn-primary", "btn-full"])
                            .attr("type", "submit")
                            .prop_signal("disabled", map_ref! {
                                let pending = form.submission.signal_ref(Submission::is_pending),
                                let empty = form.candidate_id.signal_ref(|id| id.trim().is_empty()) =>
                                *pending || *empty
                            })
                            .text_signal(form.submission.signal_ref(|s| {
                                if s.is_pending() { "Submitting..." } else { "Submit Referral" }
                            }))
                            .event_with_options(&EventOptions::preventable(), clone!(dashboard => move |e: events::Click| {
                                e.prevent_default();
                                Self::create_referral(dashboard.clone());
                            }))
                        }),
                    ])
                }),
            ])
        })
    }

    fn render_referral_row(referral: &Referral) -> Dom {
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
                    .children(&mut [render_status_badge(referral.status)])
                }),
            ])
        })
    }

    fn render_referrals(dashboard: Rc<Self>) -> Dom {
        let content = map_ref! {
            let loaded = dashboard.loaded.signal(),
            let loading = dashboard.loader.is_loading(),
            let empty = dashboard.referrals.signal_vec_cloned().is_empty() =>
            (*loaded, *loading, *empty)
        }
        .dedupe()
        .map(clone!(dashboard => move |state| match state {
            (false, true, _) => Some(render_table_loading()),
            (false, false, _) => None,
            (true, _, true) => Some(render_empty_state(
                "No referrals yet. Create a candidate and submit a referral to get started!",
            )),
            (true, _, false) => Some(html!("div", {
                .class("table-container")
                .children(&mut [
                    html!("table", {
                        .class("data-table")
                        .children(&mut [
                            render_table_head(&["Candidate", "Email", "Experience", "Status"]),
                            html!("tbody", {
                                .children_signal_vec(dashboard.referrals.signal_vec_cloned().map(|referral| {
                                    Self::render_referral_row(&referral)
                                }))
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
                            .text("📋 My Referrals")
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
                            .text("Employee Dashboard")
                        }),
                        html!("p", {
                            .text("Create candidates, submit referrals, and track their status")
                        }),
                    ])
                }),
                html!("div", {
                    .class(["card-grid", "card-grid-2"])
                    .style("margin-bottom", "32px")
                    .children(&mut [
                        Self::render_candidate_form(dashboard.clone()),
                        Self::render_referral_form(dashboard.clone()),
                    ])
                }),
                Self::render_referrals(dashboard),
            ])
        })
    }
}
