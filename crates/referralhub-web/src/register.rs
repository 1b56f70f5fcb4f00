use std::rc::Rc;

use dominator::{Dom, EventOptions, clone, html, link, with_node};
use futures_signals::signal::Mutable;
use referralhub_core::form::{RegisterInput, Submission};
use referralhub_core::models::Role;
use referralhub_core::route::Route;
use web_sys::HtmlSelectElement;

use crate::common::{Banner, RouteExt, events, render_field, render_input};
use crate::query;
use crate::storage::Session;
use crate::utils::AsyncLoader;

pub struct Register {
    name: Mutable<String>,
    email: Mutable<String>,
    password: Mutable<String>,
    role: Mutable<Role>,
    submission: Mutable<Submission<()>>,
    banner: Rc<Banner>,
    loader: AsyncLoader,
}

impl Register {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            name: Mutable::new("".to_string()),
            email: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            role: Mutable::new(Role::Employee),
            submission: Mutable::new(Submission::Idle),
            banner: Banner::new(),
            loader: AsyncLoader::new(),
        })
    }

    fn register(register: Rc<Self>, session: Rc<Session>) {
        register.banner.clear();

        let input = match RegisterInput::validate(
            &register.name.lock_ref(),
            &register.email.lock_ref(),
            &register.password.lock_ref(),
            register.role.get(),
        ) {
            Ok(input) => input,
            Err(e) => {
                register.banner.error(e.to_string());
                return;
            }
        };

        if !register.submission.lock_mut().begin() {
            return;
        }

        register.loader.load(clone!(register => async move {
            match query::register(input).await {
                Ok((token, user)) => {
                    let route = user.role.default_route();
                    register.submission.lock_mut().settle(Ok(()));
                    match session.login(token, user) {
                        Ok(_) => route.go_to(),
                        Err(e) => {
                            error!("failed to store session: {}", e);
                            register.banner.error(e.to_string());
                        }
                    }
                }
                Err(e) => {
                    let message = match e.to_string() {
                        message if message.is_empty() => {
                            "Registration failed. Please try again.".to_string()
                        }
                        message => message,
                    };
                    register.password.set("".to_string());
                    register.submission.lock_mut().settle(Err(message.clone()));
                    register.banner.error(message);
                }
            }
        }));
    }

    fn render_role_select(register: Rc<Self>) -> Dom {
        html!("select" => HtmlSelectElement, {
            .children(&mut [Role::Employee, Role::Hr].map(|role| html!("option", {
                .attr("value", role.as_str())
                .text(role.label())
            })))
            .prop_signal("value", register.role.signal_ref(|role| role.as_str()))
            .prop_signal("disabled", register.submission.signal_ref(Submission::is_pending))
            .with_node!(select => {
                .event(clone!(register => move |_: events::Change| {
                    match select.value().parse::<Role>() {
                        Ok(role) => register.role.set_neq(role),
                        Err(e) => warn!("{}", e),
                    }
                }))
            })
        })
    }

    pub fn render(register: Rc<Self>, session: Rc<Session>) -> Dom {
        html!("div", {
            .class("auth-page")
            .children(&mut [
                html!("div", {
                    .class("auth-card")
                    .children(&mut [
                        html!("div", {
                            .class("logo")
                            .children(&mut [
                                html!("h1", {
                                    .text("ReferralHub")
                                }),
                                html!("p", {
                                    .text("Job Referral Management System")
                                }),
                            ])
                        }),
                        html!("h2", {
                            .text("Create your account")
                        }),
                        Banner::render(register.banner.clone()),
                        html!("form", {
                            .children(&mut [
                                render_field("Full Name", render_input(
                                    &register.name,
                                    "text",
                                    "John Doe",
                                    "name",
                                    register.submission.signal_ref(Submission::is_pending),
                                )),
                                render_field("Email Address", render_input(
                                    &register.email,
                                    "email",
                                    "you@company.com",
                                    "email",
                                    register.submission.signal_ref(Submission::is_pending),
                                )),
                                render_field("Password", render_input(
                                    &register.password,
                                    "password",
                                    "Min. 6 characters",
                                    "new-password",
                                    register.submission.signal_ref(Submission::is_pending),
                                )),
                                render_field("Role", Self::render_role_select(register.clone())),
                                html!("button", {
                                    .class(["btn", "btn-primary", "btn-full"])
                                    .attr("type", "submit")
                                    .prop_signal("disabled", register.submission.signal_ref(Submission::is_pending))
                                    .text_signal(register.submission.signal_ref(|s| {
                                        if s.is_pending() { "Creating account..." } else { "Create Account" }
                                    }))
                                    .event_with_options(&EventOptions::preventable(), clone!(register, session => move |e: events::Click| {
                                        e.prevent_default();
                                        Self::register(register.clone(), session.clone());
                                    }))
                                }),
                            ])
                        }),
                        html!("div", {
                            .class("auth-link")
                            .text("Already have an account? ")
                            .children(&mut [
                                link!(Route::Login.url(), {
                                    .text("Sign in")
                                })
                            ])
                        }),
                    ])
                })
            ])
        })
    }
}
