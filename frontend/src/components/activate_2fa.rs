//! 启用双因素认证页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;

use crate::auth::use_auth;
use crate::components::icons::{Download, ShieldCheck};
use crate::notify::use_notifier;
use crate::web::download_text;
use crate::web::router::use_router;

#[component]
pub fn ActivateTwoFactorPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let (is_submitting, set_is_submitting) = signal(false);

    let on_activate = move |_| {
        set_is_submitting.set(true);
        let api = auth.api.clone();
        spawn_local(async move {
            match flow::activate_two_factor(&*api).await {
                Ok(activation) => {
                    let codes = &activation.recovery_codes;
                    if !codes.is_empty() {
                        if let Err(e) = download_text(codes.file_name(), &codes.to_text()) {
                            plantguard::log_warn!("[2FA] Recovery code download failed: {:?}", e);
                        }
                    }
                    notifier.success("2FA activated. Save your recovery codes!");
                    router.navigate_to(activation.next);
                }
                Err(e) => notifier.client_error(&e),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card w-full shadow-2xl bg-base-100">
                    <div class="card-body items-center text-center">
                        <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-10 w-10" />
                        </div>
                        <h1 class="text-2xl font-bold">"Secure your account"</h1>
                        <p class="text-base-content/70">
                            "Enable two-factor authentication with an authenticator app. Your recovery codes will be downloaded automatically, keep them somewhere safe."
                        </p>
                        <button class="btn btn-primary w-full mt-4 gap-2" on:click=on_activate disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Activating..." }.into_any()
                            } else {
                                view! { <Download attr:class="h-4 w-4" /> "Activate 2FA" }.into_any()
                            }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
