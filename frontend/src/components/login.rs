use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;
use plantguard::forms::LoginForm;
use plantguard::route::AppRoute;

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, Eye, EyeOff, Leaf};
use crate::notify::use_notifier;
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };

        set_is_submitting.set(true);
        let api = auth.api.clone();
        spawn_local(async move {
            match flow::login(&*api, &form).await {
                Ok(next) => {
                    notifier.success("Login successful!");
                    router.navigate_to(next);
                }
                Err(e) => notifier.client_error(&e),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <Link to=AppRoute::Landing class="self-start flex items-center gap-2 text-base-content/70">
                    <ArrowLeft attr:class="h-4 w-4" />"Back to Home"
                </Link>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="flex flex-col items-center gap-2 mb-4">
                            <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                <Leaf attr:class="h-8 w-8" />
                            </div>
                            <h1 class="text-2xl font-bold">"Welcome back"</h1>
                            <p class="text-base-content/70">"Sign in to continue to PlantGuard"</p>
                        </div>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                                <Link to=AppRoute::ForgotPassword class="label-text-alt link link-primary">
                                    "Forgot password?"
                                </Link>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    placeholder="••••••••"
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered join-item flex-1"
                                    required
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-4 w-4" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-4 w-4" /> }.into_any()
                                    }}
                                </button>
                            </div>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Signup class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
