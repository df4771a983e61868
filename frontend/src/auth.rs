//! 认证模块
//!
//! 持有核心库的 `SessionStore` 与 API 客户端，并把会话记录镜像到信号中，
//! 路由服务和页面只读取信号。

use std::sync::Arc;

use leptos::prelude::*;
use plantguard::guard::AuthPhase;
use plantguard::{ClientConfig, PlantGuardApi, SessionRecord, SessionStore};

use crate::web::{BrowserStorage, FetchClient};

pub type Api = PlantGuardApi<FetchClient>;

/// 认证上下文
#[derive(Clone)]
pub struct AuthContext {
    pub api: Arc<Api>,
    /// 会话记录（只读镜像）
    pub record: ReadSignal<SessionRecord>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复会话并建立信号镜像
    pub fn new() -> Self {
        let mut config = ClientConfig::from_build_env();
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            config = config.with_asset_origin(origin);
        }

        let session = SessionStore::load(Arc::new(BrowserStorage));
        let (record, set_record) = signal(session.snapshot());
        session.subscribe(move |snapshot| set_record.set(snapshot.clone()));

        let client = FetchClient::new(config.api_base_url.clone());
        Self {
            api: Arc::new(PlantGuardApi::new(config, client, session)),
            record,
        }
    }

    /// 认证阶段信号（用于路由服务注入）
    pub fn phase_signal(&self) -> Signal<AuthPhase> {
        let record = self.record;
        Signal::derive(move || record.get().phase)
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
