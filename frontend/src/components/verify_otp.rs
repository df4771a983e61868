//! 验证码页面：展示启用时下发的二维码，并提供 45 秒刷新倒计时

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;
use plantguard::forms::{OTP_LENGTH, sanitize_otp_input};

use crate::auth::use_auth;
use crate::components::icons::ShieldCheck;
use crate::notify::use_notifier;
use crate::web::Interval;
use crate::web::router::use_router;

/// 验证器应用的刷新周期
const COUNTDOWN_SECS: u32 = 45;

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();
    let record = auth.record;

    let otp = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (countdown, set_countdown) = signal(COUNTDOWN_SECS);

    // 页面卸载时 Interval 随 StoredValue 一起释放
    let _timer = StoredValue::new_local(Interval::new(1000, move || {
        set_countdown.update(|c| *c = if *c == 0 { COUNTDOWN_SECS } else { *c - 1 });
    }));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let code = otp.get_untracked();

        set_is_submitting.set(true);
        let api = auth.api.clone();
        spawn_local(async move {
            match flow::verify_otp(&*api, &code).await {
                Ok(next) => {
                    notifier.success("OTP verified successfully!");
                    router.navigate_to(next);
                }
                Err(e) => {
                    // 401 时会话已被清除，路由服务会自动跳转到登录页
                    notifier.client_error(&e);
                    otp.set(String::new());
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body items-center text-center" on:submit=on_submit>
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-2xl font-bold">"Two-factor verification"</h1>

                        {move || record.get().qr_data_url.map(|qr| view! {
                            <div class="space-y-2">
                                <p class="text-sm text-base-content/70">"Scan this QR code with your authenticator app"</p>
                                <img src=qr alt="2FA QR code" class="w-48 h-48 mx-auto rounded-lg border border-base-300" />
                            </div>
                        })}

                        <p class="text-base-content/70">"Enter the 6-digit code from your authenticator app"</p>
                        <input
                            type="text"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            maxlength=OTP_LENGTH.to_string()
                            placeholder="000000"
                            on:input=move |ev| otp.set(sanitize_otp_input(&event_target_value(&ev)))
                            prop:value=otp
                            class="input input-bordered text-center text-2xl tracking-[0.5em] font-mono w-full"
                        />
                        <p class="text-xs text-base-content/50">
                            "Code refreshes in " {move || countdown.get()} "s"
                        </p>
                        <button
                            class="btn btn-primary w-full"
                            disabled=move || is_submitting.get() || otp.with(|c| c.len() != OTP_LENGTH)
                        >
                            {move || if is_submitting.get() { "Verifying..." } else { "Verify" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
