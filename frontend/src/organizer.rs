//! 文件夹与图片上下文
//!
//! 包装核心库的 `OrganizerStore`，状态变化同步到信号。

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::OrganizerStore;
use plantguard::organizer::OrganizerState;

use crate::auth::AuthContext;

#[derive(Clone)]
pub struct OrganizerContext {
    pub store: OrganizerStore,
    pub state: ReadSignal<OrganizerState>,
}

impl OrganizerContext {
    pub fn new() -> Self {
        let store = OrganizerStore::new();
        store.initialize_default_folders();

        let (state, set_state) = signal(store.snapshot());
        store.subscribe(move |snapshot| set_state.set(snapshot.clone()));
        Self { store, state }
    }

    /// 跟随认证阶段：验证完成后拉取用户文件夹，会话结束（含 401 过期）时清空
    pub fn sync_with(&self, auth: &AuthContext) {
        let store = self.store.clone();
        let api = auth.api.clone();
        // 只在阶段真正变化时触发，个人资料等字段的更新不会重复拉取
        let record = auth.record;
        let phase = Memo::new(move |_| record.get().phase);

        Effect::new(move |_| {
            let phase = phase.get();
            let store = store.clone();
            let api = api.clone();
            spawn_local(async move {
                // 失败已在存储层记录日志
                let _ = store.sync_with_phase(&*api, phase).await;
            });
        });
    }
}

pub fn use_organizer() -> OrganizerContext {
    use_context::<OrganizerContext>().expect("OrganizerContext should be provided")
}
