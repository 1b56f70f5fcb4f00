use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::future::TimeoutFuture;
use referralhub_core::form::SUCCESS_BANNER_DELAY_MS;

use crate::utils::AsyncLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Inline message above a form. Success messages clear themselves, errors
/// stay until the next attempt.
pub struct Banner {
    notice: Mutable<Option<Notice>>,
    timer: AsyncLoader,
}

impl Banner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            notice: Mutable::new(None),
            timer: AsyncLoader::new(),
        })
    }

    pub fn success(&self, message: String) {
        self.notice.set(Some(Notice::Success(message)));

        let notice = self.notice.clone();
        self.timer.load(async move {
            TimeoutFuture::new(SUCCESS_BANNER_DELAY_MS).await;
            notice.set(None);
        });
    }

    pub fn error(&self, message: String) {
        self.timer.cancel();
        self.notice.set(Some(Notice::Error(message)));
    }

    pub fn clear(&self) {
        self.timer.cancel();
        self.notice.set(None);
    }

    pub fn render(banner: Rc<Self>) -> Dom {
        html!("div", {
            .child_signal(banner.notice.signal_cloned().map(|notice| {
                notice.map(|notice| match notice {
                    Notice::Success(message) => html!("div", {
                        .class("success-message")
                        .text(&message)
                    }),
                    Notice::Error(message) => html!("div", {
                        .class("error-message")
                        .text(&message)
                    }),
                })
            }))
        })
    }
}
