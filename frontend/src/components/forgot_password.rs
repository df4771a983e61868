use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;
use plantguard::route::AppRoute;

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, Mail};
use crate::notify::use_notifier;
use crate::web::router::Link;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let email = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (is_sent, set_is_sent) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked();

        set_is_submitting.set(true);
        let api = auth.api.clone();
        spawn_local(async move {
            match flow::forgot_password(&*api, &address).await {
                Ok(()) => {
                    notifier.success("Password reset email sent!");
                    set_is_sent.set(true);
                }
                Err(e) => notifier.client_error(&e),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <Link to=AppRoute::Login class="self-start flex items-center gap-2 text-base-content/70">
                    <ArrowLeft attr:class="h-4 w-4" />"Back to Login"
                </Link>
                <div class="card w-full shadow-2xl bg-base-100">
                    <Show
                        when=move || is_sent.get()
                        fallback=move || view! {
                            <form class="card-body" on:submit=on_submit.clone()>
                                <h1 class="text-2xl font-bold text-center">"Forgot your password?"</h1>
                                <p class="text-center text-base-content/70">
                                    "Enter your email and we'll send you a link to reset it."
                                </p>
                                <input
                                    type="email"
                                    placeholder="you@example.com"
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                    prop:value=email
                                    class="input input-bordered mt-4"
                                    required
                                />
                                <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() { "Sending..." } else { "Send Reset Link" }}
                                </button>
                            </form>
                        }
                    >
                        <div class="card-body items-center text-center">
                            <div class="p-4 bg-primary/10 rounded-full text-primary">
                                <Mail attr:class="h-8 w-8" />
                            </div>
                            <h1 class="text-2xl font-bold">"Check your email"</h1>
                            <p class="text-base-content/70">
                                "We sent a password reset link to " <span class="font-medium">{move || email.get()}</span>
                            </p>
                            <button class="btn btn-ghost btn-sm" on:click=move |_| set_is_sent.set(false)>
                                "Use a different email"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
