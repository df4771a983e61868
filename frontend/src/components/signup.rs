//! 注册页面，包含密码强度提示

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;
use plantguard::forms::{PASSWORD_REQUIREMENTS, SignupForm, StrengthLevel, password_strength};
use plantguard::route::AppRoute;

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, Check, Leaf, X};
use crate::notify::use_notifier;
use crate::web::router::{Link, use_router};

/// 表单状态，字段使用 `RwSignal` 以便在闭包间复制
#[derive(Clone, Copy)]
struct SignupFields {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    phone: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
}

impl SignupFields {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
        }
    }

    fn to_form(self) -> SignupForm {
        SignupForm {
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            phone: self.phone.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
        }
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
                required
            />
        </div>
    }
}

#[component]
fn StrengthMeter(password: RwSignal<String>) -> impl IntoView {
    let strength = Memo::new(move |_| password.with(|p| password_strength(p)));
    let level = move || StrengthLevel::from_strength(strength.get());
    let bar_class = move || match level() {
        StrengthLevel::Weak => "progress progress-error w-full",
        StrengthLevel::Medium => "progress progress-warning w-full",
        StrengthLevel::Strong => "progress progress-success w-full",
    };

    view! {
        <Show when=move || password.with(|p| !p.is_empty())>
            <div class="mt-2 space-y-2">
                <div class="flex items-center gap-2">
                    <progress class=bar_class value=move || strength.get().to_string() max=PASSWORD_REQUIREMENTS.len().to_string()></progress>
                    <span class="text-xs w-16 text-right">{move || level().label()}</span>
                </div>
                <ul class="text-xs space-y-1">
                    {PASSWORD_REQUIREMENTS
                        .iter()
                        .map(|req| {
                            let test = req.test;
                            let met = move || password.with(|p| test(p));
                            view! {
                                <li class=move || if met() { "flex items-center gap-1 text-success" } else { "flex items-center gap-1 text-base-content/50" }>
                                    {move || if met() {
                                        view! { <Check attr:class="h-3 w-3" /> }.into_any()
                                    } else {
                                        view! { <X attr:class="h-3 w-3" /> }.into_any()
                                    }}
                                    {req.label}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </Show>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let fields = SignupFields::new();
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = fields.to_form();

        set_is_submitting.set(true);
        let api = auth.api.clone();
        spawn_local(async move {
            match flow::signup(&*api, &form).await {
                Ok(next) => {
                    notifier.success("Account created successfully!");
                    router.navigate_to(next);
                }
                Err(e) => notifier.client_error(&e),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <Link to=AppRoute::Landing class="self-start flex items-center gap-2 text-base-content/70">
                    <ArrowLeft attr:class="h-4 w-4" />"Back to Home"
                </Link>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="flex flex-col items-center gap-2 mb-2">
                            <Leaf attr:class="h-8 w-8 text-primary" />
                            <h1 class="text-2xl font-bold">"Create your account"</h1>
                        </div>

                        <div class="grid grid-cols-2 gap-3">
                            <TextField id="first_name" label="First Name" value=fields.first_name />
                            <TextField id="last_name" label="Last Name" value=fields.last_name />
                        </div>
                        <TextField id="phone" label="Phone" kind="tel" placeholder="+1 555 123 4567" value=fields.phone />
                        <TextField id="email" label="Email" kind="email" placeholder="you@example.com" value=fields.email />
                        <TextField id="password" label="Password" kind="password" value=fields.password />
                        <StrengthMeter password=fields.password />
                        <TextField id="confirm_password" label="Confirm Password" kind="password" value=fields.confirm_password />
                        <Show when=move || {
                            let confirm = fields.confirm_password.get();
                            !confirm.is_empty() && confirm != fields.password.get()
                        }>
                            <p class="text-xs text-error">"Passwords do not match"</p>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
