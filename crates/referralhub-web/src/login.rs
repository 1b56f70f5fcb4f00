use std::rc::Rc;

use dominator::{Dom, EventOptions, clone, html, link};
use futures_signals::signal::Mutable;
use referralhub_core::form::{LoginInput, Submission};
use referralhub_core::route::Route;

use crate::common::{Banner, RouteExt, events, render_field, render_input};
use crate::query;
use crate::storage::Session;
use crate::utils::AsyncLoader;

pub struct Login {
    email: Mutable<String>,
    password: Mutable<String>,
    submission: Mutable<Submission<()>>,
    banner: Rc<Banner>,
    loader: AsyncLoader,
}

impl Login {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            email: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            submission: Mutable::new(Submission::Idle),
            banner: Banner::new(),
            loader: AsyncLoader::new(),
        })
    }

    fn login(login: Rc<Self>, session: Rc<Session>) {
        login.banner.clear();

        let input = match LoginInput::validate(&login.email.lock_ref(), &login.password.lock_ref())
        {
            Ok(input) => input,
            Err(e) => {
                login.banner.error(e.to_string());
                return;
            }
        };

        if !login.submission.lock_mut().begin() {
            return;
        }

        login.loader.load(clone!(login => async move {
            match query::login(input).await {
                Ok((token, user)) => {
                    let route = user.role.default_route();
                    login.submission.lock_mut().settle(Ok(()));
                    match session.login(token, user) {
                        Ok(_) => route.go_to(),
                        Err(e) => {
                            error!("failed to store session: {}", e);
                            login.banner.error(e.to_string());
                        }
                    }
                }
                Err(e) => {
                    let message = match e.to_string() {
                        message if message.is_empty() => {
                            "Login failed. Please check your credentials.".to_string()
                        }
                        message => message,
                    };
                    login.password.set("".to_string());
                    login.submission.lock_mut().settle(Err(message.clone()));
                    login.banner.error(message);
                }
            }
        }));
    }

    pub fn render(login: Rc<Self>, session: Rc<Session>) -> Dom {
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
                            .text("Welcome back")
                        }),
                        Banner::render(login.banner.clone()),
                        html!("form", {
                            .children(&mut [
                                render_field("Email Address", render_input(
                                    &login.email,
                                    "email",
                                    "you@company.com",
                                    "email",
                                    login.submission.signal_ref(Submission::is_pending),
                                )),
                                render_field("Password", render_input(
                                    &login.password,
                                    "password",
                                    "Enter your password",
                                    "current-password",
                                    login.submission.signal_ref(Submission::is_pending),
                                )),
                                html!("button", {
                                    .class(["btn", "btn-primary", "btn-full"])
                                    .attr("type", "submit")
                                    .prop_signal("disabled", login.submission.signal_ref(Submission::is_pending))
                                    .text_signal(login.submission.signal_ref(|s| {
                                        if s.is_pending() { "Signing in..." } else { "Sign In" }
                                    }))
                                    .event_with_options(&EventOptions::preventable(), clone!(login, session => move |e: events::Click| {
                                        e.prevent_default();
                                        Self::login(login.clone(), session.clone());
                                    }))
                                }),
                            ])
                        }),
                        html!("div", {
                            .class("auth-link")
                            .text("Don't have an account? ")
                            .children(&mut [
                                link!(Route::Register.url(), {
                                    .text("Create one")
                                })
                            ])
                        }),
                    ])
                })
            ])
        })
    }
}
