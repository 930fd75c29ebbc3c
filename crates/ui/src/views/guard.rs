use dioxus::prelude::*;
use dioxus_router::Link;
use services::GuardDecision;
use services::auth::{require_admin, require_auth};

use crate::context::use_auth_status;
use crate::routes::Route;

/// Render `children` only for signed-in users; everyone else gets a sign-in prompt
/// that comes back to `return_to`.
#[component]
pub fn RequireAuth(return_to: Route, children: Element) -> Element {
    let status = use_auth_status().get();
    let decision = require_auth(&status, &return_to.to_string());
    gate(decision, children)
}

#[component]
pub fn RequireAdmin(children: Element) -> Element {
    let status = use_auth_status().get();
    gate(require_admin(&status), children)
}

fn gate(decision: GuardDecision, children: Element) -> Element {
    match decision {
        GuardDecision::Allow => children,
        GuardDecision::RedirectToLogin { return_to } => rsx! {
            div { class: "gate",
                h2 { "Sign in required" }
                p { "Please sign in to continue." }
                Link {
                    class: "btn",
                    to: Route::Login { return_to: return_to.unwrap_or_default() },
                    "Login"
                }
            }
        },
        GuardDecision::Denied => rsx! {
            div { class: "gate",
                h2 { "Access denied" }
                p { "You do not have admin privileges." }
                Link { class: "btn", to: Route::QuizList {}, "Back to quizzes" }
            }
        },
    }
}
