//! PlantGuard 前端应用
//!
//! 采用 Context-Driven 架构，业务逻辑全部位于核心库 `plantguard`：
//! - `auth`: 会话上下文（核心库 `SessionStore` 的信号镜像）
//! - `organizer`: 文件夹与图片上下文
//! - `web::router`: 路由服务（守卫由核心库判定）
//! - `components`: UI 组件层

mod auth;
mod notify;
mod organizer;
mod components {
    pub mod activate_2fa;
    pub mod dashboard;
    pub mod forgot_password;
    mod icons;
    pub mod landing;
    pub mod layout;
    pub mod login;
    mod markdown;
    pub mod saved_images;
    pub mod signup;
    pub mod verify_email;
    pub mod verify_otp;
}

use crate::auth::AuthContext;
use crate::components::activate_2fa::ActivateTwoFactorPage;
use crate::components::dashboard::DashboardPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::landing::LandingPage;
use crate::components::layout::DashboardLayout;
use crate::components::login::LoginPage;
use crate::components::saved_images::SavedImagesPage;
use crate::components::signup::SignupPage;
use crate::components::verify_email::VerifyEmailPage;
use crate::components::verify_otp::VerifyOtpPage;
use crate::notify::{Notifier, Toast};
use crate::organizer::OrganizerContext;

use leptos::prelude::*;
use plantguard::route::AppRoute;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod file;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use file::{download_text, object_url, read_file, revoke_object_url};
    pub use http::FetchClient;
    pub use storage::BrowserStorage;
    pub use timer::Interval;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::VerifyEmail => view! { <VerifyEmailPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ActivateTwoFactor => view! { <ActivateTwoFactorPage /> }.into_any(),
        AppRoute::VerifyOtp => view! { <VerifyOtpPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::SavedImages => view! { <SavedImagesPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    };

    if route.uses_dashboard_layout() {
        view! { <DashboardLayout>{page}</DashboardLayout> }.into_any()
    } else {
        page
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话上下文（从 LocalStorage 恢复）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx.clone());

    // 2. 文件夹上下文，验证完成后自动同步
    let organizer_ctx = OrganizerContext::new();
    organizer_ctx.sync_with(&auth_ctx);
    provide_context(organizer_ctx);

    provide_context(Notifier::new());

    // 3. 认证阶段信号注入路由服务
    let phase = auth_ctx.phase_signal();

    view! {
        <Toast />
        <Router phase=phase>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
