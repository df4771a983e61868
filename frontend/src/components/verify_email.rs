use leptos::prelude::*;
use plantguard::route::AppRoute;

use crate::components::icons::{ArrowLeft, Check, Mail};
use crate::notify::use_notifier;
use crate::web::router::Link;

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <Link to=AppRoute::Landing class="self-start flex items-center gap-2 text-base-content/70">
                    <ArrowLeft attr:class="h-4 w-4" />"Back to Home"
                </Link>
                <div class="card w-full shadow-2xl bg-base-100">
                    <div class="card-body items-center text-center">
                        <div class="p-5 bg-primary/10 rounded-full text-primary mb-2">
                            <Mail attr:class="h-10 w-10" />
                        </div>
                        <h1 class="text-2xl font-semibold">"Verify Your Email"</h1>
                        <p class="text-base-content/70">
                            "We've sent a verification link to your email address. Please check your inbox and click the link to activate your account."
                        </p>
                        <div class="alert alert-success my-4">
                            <Check attr:class="h-5 w-5" />
                            <span>"Verification email sent successfully"</span>
                        </div>
                        <p class="text-sm text-base-content/70">"Didn't receive the email? Check your spam folder or"</p>
                        <button
                            class="btn btn-outline w-full"
                            on:click=move |_| notifier.success("Verification email resent")
                        >
                            "Resend Verification Email"
                        </button>
                        <div class="divider"></div>
                        <p class="text-sm text-base-content/70">"Already verified?"</p>
                        <Link to=AppRoute::Login class="btn btn-primary w-full">"Continue to Login"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
