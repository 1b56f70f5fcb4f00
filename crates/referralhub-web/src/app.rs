use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::{map_ref, signal::SignalExt};
use referralhub_core::guard::Access;
use referralhub_core::route::Route;

use crate::common::{Layout, RouteExt, Spinner};
use crate::employee::EmployeeDashboard;
use crate::hr::HrDashboard;
use crate::login::Login;
use crate::register::Register;
use crate::storage::Session;

pub struct App {
    session: Rc<Session>,
}

impl App {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(App { session })
    }

    fn render_route(app: &Rc<Self>, route: Route) -> Dom {
        let session = app.session.clone();
        match route {
            Route::Login => Login::render(Login::new(), session),
            Route::Register => Register::render(Register::new(), session),
            Route::Employee => Layout::render(
                Layout::new(session.clone()),
                EmployeeDashboard::render(EmployeeDashboard::new(session)),
            ),
            Route::Hr => Layout::render(
                Layout::new(session.clone()),
                HrDashboard::render(HrDashboard::new(session)),
            ),
            Route::Root | Route::NotFound => Spinner::render_spinner(true),
        }
    }

    pub fn render(app: Rc<Self>) -> Dom {
        let access = map_ref! {
            let route = Route::signal(),
            let state = app.session.signal() =>
            (*route, route.access(state))
        };

        html!("div", {
            .child_signal(access.dedupe().map(clone!(app => move |(route, access)| {
                match access {
                    Access::Wait => Some(Spinner::render_spinner(true)),
                    Access::Redirect(target) => {
                        debug!("redirect {} -> {}", route.url(), target.url());
                        target.replace();
                        None
                    }
                    Access::Render => Some(Self::render_route(&app, route)),
                }
            })))
        })
    }
}
