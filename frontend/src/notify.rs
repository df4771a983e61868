//! 全局通知（toast）

use leptos::prelude::*;
use plantguard::{ClientError, ClientErrorStatus};

const TOAST_DURATION: std::time::Duration = std::time::Duration::from_secs(3);

/// 当前通知；`seq` 每条消息递增，定时清除只作用于它所属的那一条
#[derive(Debug, Clone, Default, PartialEq)]
struct ToastState {
    seq: u64,
    current: Option<(String, bool)>,
}

impl ToastState {
    fn show(&mut self, text: String, is_error: bool) -> u64 {
        self.seq += 1;
        self.current = Some((text, is_error));
        self.seq
    }

    fn expire(&mut self, seq: u64) {
        if self.seq == seq {
            self.current = None;
        }
    }
}

#[derive(Clone, Copy)]
pub struct Notifier {
    state: RwSignal<ToastState>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ToastState::default()),
        }
    }

    fn show(&self, text: String, is_error: bool) {
        let mut seq = 0;
        self.state.update(|s| seq = s.show(text, is_error));
        let state = self.state;
        set_timeout(move || state.update(|s| s.expire(seq)), TOAST_DURATION);
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.show(msg.into(), false);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.show(msg.into(), true);
    }

    pub fn client_error(&self, err: &ClientError) {
        self.error(err.message());
    }

    /// 只提示客户端拦截的错误；远程调用失败已由存储层记录日志
    pub fn rejection(&self, err: &ClientError) {
        if matches!(
            err.status,
            ClientErrorStatus::Validation | ClientErrorStatus::Forbidden
        ) {
            self.client_error(err);
        }
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 通知提示框，3 秒后自动消失
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_notifier().state;
    let message = Memo::new(move |_| state.with(|s| s.current.clone()));

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = message.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || message.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_timeout_keeps_newer_message() {
        let mut state = ToastState::default();
        let first = state.show("Folder created".into(), false);
        let second = state.show("Image uploaded".into(), false);

        state.expire(first);
        assert_eq!(state.current, Some(("Image uploaded".to_string(), false)));

        state.expire(second);
        assert_eq!(state.current, None);
    }

    #[test]
    fn test_same_text_shown_twice_gets_new_sequence() {
        let mut state = ToastState::default();
        let first = state.show("Failed".into(), true);
        let second = state.show("Failed".into(), true);
        assert_ne!(first, second);

        state.expire(first);
        assert!(state.current.is_some());
    }
}
