use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::AuthError;
use storage::StorageError;

use crate::context::{AppContext, use_auth_status};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{LoginForm, RegisterForm, login_destination};

#[component]
pub fn LoginView(return_to: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let on_submit = use_callback(move |()| {
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message()));
                return;
            }
        };
        let auth = ctx.auth();
        let destination = login_destination(&return_to);
        busy.set(true);
        spawn(async move {
            let outcome = auth.login(&request).await;
            busy.set(false);
            match outcome {
                Ok(_) => {
                    error.set(None);
                    navigator.push(destination);
                }
                Err(err) => error.set(Some(ViewError::from(err).message())),
            }
        });
    });

    rsx! {
        div { class: "page auth-page",
            h2 { "Login" }
            form {
                class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                label { "Username"
                    input {
                        value: "{form.read().username}",
                        oninput: move |evt| form.write().username = evt.value(),
                    }
                }
                label { "Password"
                    input {
                        r#type: "password",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                button { r#type: "submit", disabled: busy(),
                    if busy() { "Signing in..." } else { "Login" }
                }
            }
            p { "No account? "
                Link { to: Route::Register {}, "Register" }
            }
        }
    }
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let status = use_auth_status().get();
    let mut form = use_signal(RegisterForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = use_callback(move |()| {
        let snapshot = form.read().clone();
        let request = match snapshot.validate() {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message().to_string()));
                return;
            }
        };
        let auth = ctx.auth();
        busy.set(true);
        spawn(async move {
            let outcome = if snapshot.as_admin {
                auth.register_admin(&request).await
            } else {
                auth.register(&request).await
            };
            busy.set(false);
            match outcome {
                Ok(message) => {
                    error.set(None);
                    notice.set(Some(message));
                    form.set(RegisterForm::default());
                }
                Err(err) => {
                    notice.set(None);
                    error.set(Some(registration_error(err)));
                }
            }
        });
    });

    rsx! {
        div { class: "page auth-page",
            h2 { "Register" }
            form {
                class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                label { "Username"
                    input {
                        value: "{form.read().username}",
                        oninput: move |evt| form.write().username = evt.value(),
                    }
                }
                label { "Email"
                    input {
                        r#type: "email",
                        value: "{form.read().email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                }
                label { "Password"
                    input {
                        r#type: "password",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                }
                label { "Confirm password"
                    input {
                        r#type: "password",
                        value: "{form.read().confirm_password}",
                        oninput: move |evt| form.write().confirm_password = evt.value(),
                    }
                }
                if status.is_admin() {
                    label { class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: form.read().as_admin,
                            onchange: move |evt| form.write().as_admin = evt.checked(),
                        }
                        "Administrator account"
                    }
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                if let Some(message) = notice() {
                    p { class: "notice", "{message}" }
                }
                button { r#type: "submit", disabled: busy(),
                    if busy() { "Registering..." } else { "Register" }
                }
            }
            p { "Already registered? "
                Link { to: Route::Login { return_to: String::new() }, "Login" }
            }
        }
    }
}

/// Backend validation messages are shown as-is; everything else uses the generic text.
fn registration_error(err: AuthError) -> String {
    match err {
        AuthError::Storage(StorageError::Http { message, .. }) if !message.is_empty() => message,
        other => ViewError::from(other).message().to_string(),
    }
}
